//! Terminal dashboard built on ratatui and crossterm.
//!
//! Shows the enabled widgets on a scrollable two-column grid. Widgets can be
//! reordered by mouse drag or keyboard and shown or hidden with number keys;
//! every change goes through the session's [`crate::layout::LayoutStore`].

pub mod app;
pub mod drag;
pub mod event;
pub mod grid;
pub mod resolver;
pub mod ui;

mod test_utils;
