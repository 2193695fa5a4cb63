//! Reorder arithmetic for the enabled subset of a layout.
//!
//! Positions are *visual* positions: indices into the enabled widgets sorted
//! by `order`. A move removes the widget at `from`, reinserts it at `to`, and
//! renumbers the enabled subset `0..N-1`. Disabled descriptors keep their
//! array position and `order` untouched.

use std::collections::HashMap;

use super::descriptor::{enabled_sorted, WidgetDescriptor, WidgetKind};
use super::{LayoutError, LayoutStore};

/// Computes the layout after moving visual position `from` to `to`.
///
/// Returns the input unchanged when `from == to`.
pub fn move_enabled(
    layout: &[WidgetDescriptor],
    from: usize,
    to: usize,
) -> Result<Vec<WidgetDescriptor>, LayoutError> {
    let mut sequence: Vec<WidgetKind> = enabled_sorted(layout).iter().map(|d| d.id).collect();
    let len = sequence.len();
    for position in [from, to] {
        if position >= len {
            return Err(LayoutError::PositionOutOfRange { position, len });
        }
    }
    if from == to {
        return Ok(layout.to_vec());
    }

    let moved = sequence.remove(from);
    sequence.insert(to, moved);

    let new_order: HashMap<WidgetKind, i64> = sequence
        .iter()
        .enumerate()
        .map(|(index, id)| (*id, index as i64))
        .collect();

    Ok(layout
        .iter()
        .map(|d| match new_order.get(&d.id) {
            Some(&order) if d.enabled => WidgetDescriptor {
                order,
                ..d.clone()
            },
            _ => d.clone(),
        })
        .collect())
}

/// Applies a visual move to the store.
///
/// Returns `Ok(false)` without touching the store when `from == to`.
pub fn commit_move(store: &mut LayoutStore, from: usize, to: usize) -> Result<bool, LayoutError> {
    let next = move_enabled(store.layout(), from, to)?;
    if from == to {
        return Ok(false);
    }
    tracing::debug!(from, to, "committing widget move");
    store.update_layout(next)?;
    Ok(true)
}
