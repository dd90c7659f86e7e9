use lanewright_core::{AppError, AppResult};

/// Distance left between an automation-placed item and the current extreme.
pub const POSITION_GAP: i64 = 1024;

/// Which end of an ordered collection an item is placed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GapDirection {
    /// Before the current minimum.
    Start,
    /// After the current maximum.
    End,
}

/// Returns a position beyond the current extreme without renumbering.
///
/// `current_extreme` is the minimum for [`GapDirection::Start`] and the maximum
/// for [`GapDirection::End`]; an empty collection starts at zero.
#[must_use]
pub fn assign_gap_position(direction: GapDirection, current_extreme: Option<i64>) -> i64 {
    match (direction, current_extreme) {
        (_, None) => 0,
        (GapDirection::Start, Some(minimum)) => minimum.saturating_sub(POSITION_GAP),
        (GapDirection::End, Some(maximum)) => maximum.saturating_add(POSITION_GAP),
    }
}

/// Moves the item at `from` to `to`, keeping the relative order of the rest.
///
/// `to` is clamped to the last index.
pub fn reorder_within<T>(mut items: Vec<T>, from: usize, to: usize) -> AppResult<Vec<T>> {
    if from >= items.len() {
        return Err(AppError::Validation(format!(
            "cannot move item {from} of a collection with {} items",
            items.len()
        )));
    }

    let item = items.remove(from);
    let to = to.min(items.len());
    items.insert(to, item);

    Ok(items)
}

/// Returns dense positions `0..len`.
#[must_use]
pub fn dense_positions(len: usize) -> Vec<i64> {
    (0..len)
        .map(|index| i64::try_from(index).unwrap_or(i64::MAX))
        .collect()
}
