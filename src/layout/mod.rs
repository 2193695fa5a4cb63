//! Widget layout subsystem.
//!
//! The layout is the ordered, enable-flagged collection of widget descriptors
//! that decides what the dashboard shows and in which sequence.
//!
//! - [`descriptor`]: data model and the fixed default layout.
//! - [`store`]: the single source of truth, with debounced persistence.
//! - [`reorder`]: drag-and-drop reorder arithmetic shared by the grid and CLI.
//! - [`provider`]: the owned per-session handle that views receive.

pub mod descriptor;
pub mod provider;
pub mod reorder;
pub mod store;

pub use descriptor::{default_layout, WidgetDescriptor, WidgetKind};
pub use provider::LayoutProvider;
pub use store::{LayoutStore, DEFAULT_PERSIST_DEBOUNCE, LAYOUT_STORAGE_KEY};

use thiserror::Error;

/// Errors returned by layout mutations that take caller-supplied input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The replacement layout does not contain exactly the current widget ids.
    #[error("layout ids do not match current layout (missing: {missing:?}, unexpected: {unexpected:?})")]
    IdSetMismatch {
        /// Ids present now but absent from the replacement.
        missing: Vec<WidgetKind>,
        /// Ids in the replacement that are not present now.
        unexpected: Vec<WidgetKind>,
    },

    /// The replacement layout breaks a structural invariant.
    #[error("invalid layout: {0}")]
    Invalid(descriptor::LayoutDefect),

    /// A visual position is outside the enabled widget range.
    #[error("position {position} out of range (0..{len})")]
    PositionOutOfRange {
        /// Requested position.
        position: usize,
        /// Number of enabled widgets.
        len: usize,
    },
}
