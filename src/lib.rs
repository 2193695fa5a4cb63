//! School Console Dashboard library
//!
//! Terminal admin dashboard for a school-management platform. The centre of
//! the crate is the widget layout: which panels are shown, in what order and
//! at what size, persisted per user through a debounced key-value store.
//!
//! The `scd` binary wraps this library with a TUI and a small CLI for
//! inspecting and editing the persisted layout.

/// Configuration file loading, defaults and XDG path resolution.
pub mod config;

/// Dashboard content shown by the widgets.
pub mod data;

/// Widget layout model, persistence store and per-session provider.
pub mod layout;

/// Tracing subscriber setup.
pub mod logging;

/// Key-value storage backends for persisted state.
pub mod storage;

/// Terminal user interface.
pub mod tui;

/// Render units for each widget kind.
pub mod widgets;
