//! Grid packing for the enabled widgets.
//!
//! Widgets are placed row-major on a [`GRID_COLUMNS`]-wide grid in visual
//! order. A widget that does not fit in the rest of the current row starts a
//! new one; each row is as tall as its tallest widget. Coordinates produced
//! here are in *content space*: `y = 0` is the top of the scrollable grid,
//! independent of where the grid sits on screen or how far it is scrolled.

use ratatui::layout::Rect;

use crate::layout::{WidgetDescriptor, WidgetKind};

/// Number of grid columns.
pub const GRID_COLUMNS: u16 = 2;

/// One placed widget, in grid units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// Widget shown in this slot.
    pub id: WidgetKind,
    /// Position among the enabled widgets.
    pub index: usize,
    pub column: u16,
    pub row: u16,
    /// Clamped to [`GRID_COLUMNS`].
    pub column_span: u16,
    pub row_span: u16,
}

/// Result of packing the enabled widgets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridLayout {
    pub slots: Vec<Slot>,
    /// Grid rows used.
    pub rows: u16,
}

/// Packs `enabled` (already in visual order) into grid slots.
pub fn pack(enabled: &[WidgetDescriptor]) -> GridLayout {
    let mut slots = Vec::with_capacity(enabled.len());
    let mut column = 0u16;
    let mut row = 0u16;
    let mut row_height = 0u16;

    for (index, d) in enabled.iter().enumerate() {
        let column_span = d.column_span.clamp(1, GRID_COLUMNS);
        let row_span = d.row_span.max(1);
        if column + column_span > GRID_COLUMNS {
            row = row.saturating_add(row_height);
            column = 0;
            row_height = 0;
        }
        slots.push(Slot {
            id: d.id,
            index,
            column,
            row,
            column_span,
            row_span,
        });
        column += column_span;
        row_height = row_height.max(row_span);
    }

    GridLayout {
        slots,
        rows: row.saturating_add(row_height),
    }
}

impl GridLayout {
    /// Content height in terminal rows.
    pub fn content_height(&self, row_height: u16) -> u16 {
        self.rows.saturating_mul(row_height)
    }

    /// Content-space rectangle of `slot` for a grid `width` columns wide.
    ///
    /// The last grid column absorbs any remainder of the division.
    pub fn slot_rect(&self, slot: &Slot, width: u16, row_height: u16) -> Rect {
        let column_width = width / GRID_COLUMNS;
        let x = slot.column * column_width;
        let w = if slot.column + slot.column_span >= GRID_COLUMNS {
            width.saturating_sub(x)
        } else {
            slot.column_span * column_width
        };
        Rect::new(
            x,
            slot.row.saturating_mul(row_height),
            w,
            slot.row_span.saturating_mul(row_height),
        )
    }

    /// Slot containing the content-space point `(x, y)`.
    pub fn slot_at(&self, x: u16, y: u16, width: u16, row_height: u16) -> Option<&Slot> {
        self.slots.iter().find(|slot| {
            let r = self.slot_rect(slot, width, row_height);
            x >= r.x && x < r.right() && y >= r.y && y < r.bottom()
        })
    }

    /// Slot at visual position `index`.
    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }
}
