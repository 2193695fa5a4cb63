//! Reorder gestures: pointer drag with a movement threshold, and keyboard
//! pick-up / drop.
//!
//! Both produce a `(from, to)` pair of visual positions; the caller applies
//! it with [`crate::layout::reorder::commit_move`].

/// Pointer drag state machine.
///
/// ```text
/// Idle --press on slot--> Armed --moved >= threshold--> Dragging
///   ^                       |                              |
///   +------- release -------+------- release (commit) -----+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerDrag {
    #[default]
    Idle,
    /// Button is down on `origin`; not yet far enough to count as a drag.
    Armed {
        origin: usize,
        column: u16,
        row: u16,
    },
    /// Dragging `origin`; `target` is the slot currently under the pointer.
    Dragging {
        origin: usize,
        target: Option<usize>,
    },
}

/// What a pointer release amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    /// Nothing was pressed, or the drag ended where it started.
    None,
    /// Press and release without crossing the threshold.
    Click(usize),
    /// Drag completed over a different slot.
    Move { from: usize, to: usize },
}

impl PointerDrag {
    /// Button pressed at screen `(column, row)` over `slot` (if any).
    pub fn press(&mut self, slot: Option<usize>, column: u16, row: u16) {
        *self = match slot {
            Some(origin) => PointerDrag::Armed {
                origin,
                column,
                row,
            },
            None => PointerDrag::Idle,
        };
    }

    /// Pointer moved with the button held. Returns `true` if the state changed.
    ///
    /// A drag starts once the Chebyshev distance from the press point reaches
    /// `threshold` cells.
    pub fn motion(&mut self, slot: Option<usize>, column: u16, row: u16, threshold: u16) -> bool {
        match *self {
            PointerDrag::Idle => false,
            PointerDrag::Armed {
                origin,
                column: start_column,
                row: start_row,
            } => {
                let distance = column.abs_diff(start_column).max(row.abs_diff(start_row));
                if distance < threshold {
                    return false;
                }
                tracing::trace!(origin, distance, "drag started");
                *self = PointerDrag::Dragging {
                    origin,
                    target: slot,
                };
                true
            }
            PointerDrag::Dragging { origin, target } => {
                if target == slot {
                    return false;
                }
                *self = PointerDrag::Dragging {
                    origin,
                    target: slot,
                };
                true
            }
        }
    }

    /// Button released over `slot`. Always returns to `Idle`.
    pub fn release(&mut self, slot: Option<usize>) -> Release {
        let outcome = match *self {
            PointerDrag::Idle => Release::None,
            PointerDrag::Armed { origin, .. } => Release::Click(origin),
            PointerDrag::Dragging { origin, .. } => match slot {
                Some(to) if to != origin => Release::Move { from: origin, to },
                _ => Release::None,
            },
        };
        *self = PointerDrag::Idle;
        outcome
    }

    pub fn cancel(&mut self) {
        *self = PointerDrag::Idle;
    }

    /// Position being dragged, once past the threshold.
    pub fn dragging(&self) -> Option<usize> {
        match *self {
            PointerDrag::Dragging { origin, .. } => Some(origin),
            _ => None,
        }
    }

    /// Slot under the pointer during a drag.
    pub fn drop_target(&self) -> Option<usize> {
        match *self {
            PointerDrag::Dragging { target, .. } => target,
            _ => None,
        }
    }
}

/// A widget picked up with the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardGrab {
    /// Position the widget was picked up from.
    pub origin: usize,
    /// Position it will be dropped at.
    pub target: usize,
}

impl KeyboardGrab {
    pub fn new(origin: usize) -> Self {
        Self {
            origin,
            target: origin,
        }
    }

    /// Moves the drop target by `delta`, clamped to `0..len`.
    pub fn shift(&mut self, delta: isize, len: usize) {
        if len == 0 {
            return;
        }
        let last = len - 1;
        self.target = self.target.saturating_add_signed(delta).min(last);
    }

    /// The move to commit, or `None` when dropped in place.
    pub fn drop_move(&self) -> Option<(usize, usize)> {
        (self.origin != self.target).then_some((self.origin, self.target))
    }
}
