//! Lazy widget mounting with a one-way visibility latch.
//!
//! Render units are constructed the first time their slot comes within the
//! viewport extended downward by a forward margin, and then kept for the
//! rest of the session. Scrolling a mounted widget out of view never
//! unmounts it. Until then the slot shows a skeleton.

use std::collections::HashMap;

use crate::layout::WidgetKind;
use crate::widgets::{self, Widget};

/// Per-slot visibility. `NotYetVisible -> Visible` only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotVisibility {
    NotYetVisible,
    Visible,
}

/// Maps widget kinds to mounted render units.
pub struct WidgetResolver {
    units: HashMap<WidgetKind, Box<dyn Widget>>,
    /// Extra rows below the viewport that count as visible.
    margin: u16,
}

impl std::fmt::Debug for WidgetResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut mounted: Vec<&WidgetKind> = self.units.keys().collect();
        mounted.sort();
        f.debug_struct("WidgetResolver")
            .field("mounted", &mounted)
            .field("margin", &self.margin)
            .finish()
    }
}

impl WidgetResolver {
    pub fn new(margin: u16) -> Self {
        Self {
            units: HashMap::new(),
            margin,
        }
    }

    /// Records that `kind`'s slot spans content rows `[top, top + height)`
    /// while the viewport shows `[scroll, scroll + viewport_height)`.
    ///
    /// Mounts the unit on first intersection with the extended viewport.
    pub fn observe(
        &mut self,
        kind: WidgetKind,
        top: u16,
        height: u16,
        scroll: u16,
        viewport_height: u16,
    ) -> SlotVisibility {
        if self.units.contains_key(&kind) {
            return SlotVisibility::Visible;
        }
        let window_end = scroll
            .saturating_add(viewport_height)
            .saturating_add(self.margin);
        let slot_end = top.saturating_add(height);
        if top < window_end && slot_end > scroll {
            tracing::debug!(widget = %kind, top, scroll, "mounting widget");
            self.units.insert(kind, widgets::create(kind));
            SlotVisibility::Visible
        } else {
            SlotVisibility::NotYetVisible
        }
    }

    /// The mounted unit, if the slot has been seen.
    pub fn unit(&self, kind: WidgetKind) -> Option<&dyn Widget> {
        self.units.get(&kind).map(|u| u.as_ref())
    }

    pub fn visibility(&self, kind: WidgetKind) -> SlotVisibility {
        if self.units.contains_key(&kind) {
            SlotVisibility::Visible
        } else {
            SlotVisibility::NotYetVisible
        }
    }

    pub fn mounted_count(&self) -> usize {
        self.units.len()
    }
}
