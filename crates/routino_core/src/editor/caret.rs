//! Caret capture/restore between render-tree coordinates and logical offsets.
//!
//! # Responsibility
//! - Translate a caret inside materialized units into a plain-text offset.
//! - Place a plain-text offset back into a freshly materialized unit list.
//!
//! # Invariants
//! - Both directions only look at unit char lengths, never at unit contents
//!   or token kinds.
//! - An offset on a boundary between two units restores to the start of the
//!   following unit, so repeated capture/restore passes never drift backward.
//! - Out-of-range inputs clamp; neither direction fails.

use crate::model::selection::{CaretPoint, LogicalOffset, SelectionRange};

/// Returns the number of chars that precede `caret` in the rendered units.
///
/// `None` (no live selection) and `CaretPoint::Surface` both capture `0`.
pub fn capture(unit_lengths: &[usize], caret: Option<CaretPoint>) -> LogicalOffset {
    match caret {
        None | Some(CaretPoint::Surface) => 0,
        Some(CaretPoint::Unit { index, offset }) => {
            let Some(unit_len) = unit_lengths.get(index) else {
                return unit_lengths.iter().sum();
            };
            let preceding: usize = unit_lengths[..index].iter().sum();
            preceding + offset.min(*unit_len)
        }
    }
}

/// Captures an anchor/focus pair as a logical range.
pub fn capture_range(
    unit_lengths: &[usize],
    anchor: Option<CaretPoint>,
    focus: Option<CaretPoint>,
) -> SelectionRange {
    SelectionRange::new(capture(unit_lengths, anchor), capture(unit_lengths, focus))
}

/// Places `offset` into the unit list described by `unit_lengths`.
pub fn restore(offset: LogicalOffset, unit_lengths: &[usize]) -> CaretPoint {
    let Some(last_index) = unit_lengths.len().checked_sub(1) else {
        return CaretPoint::Surface;
    };

    let mut unit_start = 0;
    for (index, len) in unit_lengths.iter().enumerate() {
        let unit_end = unit_start + len;
        if offset < unit_end || (offset == unit_end && index == last_index) {
            return CaretPoint::Unit {
                index,
                offset: offset - unit_start,
            };
        }
        unit_start = unit_end;
    }

    // Past the end of content: clamp to the end of the last unit.
    CaretPoint::Unit {
        index: last_index,
        offset: unit_lengths[last_index],
    }
}
