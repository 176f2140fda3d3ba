//! Logical selection and render-tree caret coordinates.
//!
//! # Invariants
//! - `LogicalOffset` counts chars of plain content, independent of how the
//!   content is split into rendered units.
//! - `CaretPoint::Unit::offset` counts chars inside one rendered unit.

use serde::{Deserialize, Serialize};

/// Plain-text char position in `[0, content length]`.
pub type LogicalOffset = usize;

/// Ordered anchor/focus pair; `anchor == focus` is a collapsed caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRange {
    pub anchor: LogicalOffset,
    pub focus: LogicalOffset,
}

impl SelectionRange {
    pub fn new(anchor: LogicalOffset, focus: LogicalOffset) -> Self {
        Self { anchor, focus }
    }

    pub fn collapsed(offset: LogicalOffset) -> Self {
        Self::new(offset, offset)
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    pub fn start(&self) -> LogicalOffset {
        self.anchor.min(self.focus)
    }

    pub fn end(&self) -> LogicalOffset {
        self.anchor.max(self.focus)
    }
}

/// Caret position expressed against the rendered units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaretPoint {
    /// The editing surface itself; used when it has no children.
    Surface,
    /// `offset` chars into the `index`-th rendered unit.
    Unit { index: usize, offset: usize },
}

#[cfg(test)]
mod tests {
    use super::SelectionRange;

    #[test]
    fn backward_selection_reports_ordered_bounds() {
        let range = SelectionRange::new(9, 3);
        assert_eq!(range.start(), 3);
        assert_eq!(range.end(), 9);
        assert!(!range.is_collapsed());
        assert!(SelectionRange::collapsed(4).is_collapsed());
    }
}
