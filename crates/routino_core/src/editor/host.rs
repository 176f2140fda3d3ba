//! Rendering host contract and an in-memory host implementation.
//!
//! # Responsibility
//! - Define what the editor pipeline needs from whatever renders tokens.
//! - Provide `HeadlessHost`, used by the CLI, the FFI layer and tests.
//!
//! # Invariants
//! - A host exposes its current units in order with stable char lengths.
//! - `materialize` replaces every unit and drops the live caret, exactly like
//!   rebuilding an editable DOM subtree does.
//! - Typing into a `HeadlessHost` edits the unit under the caret, so unit
//!   boundaries drift from token boundaries until the next pass.

use crate::editor::caret::{capture, restore};
use crate::model::selection::{CaretPoint, SelectionRange};
use crate::model::token::{RevealState, Token};
use log::debug;

/// Rendering/selection host consumed by the editing session.
///
/// The "run after commit" primitive is inverted: the host calls
/// `EditingSession::on_render_committed` once materialized units are live.
pub trait RenderHost {
    /// Char lengths of the rendered units, in order.
    fn unit_lengths(&self) -> Vec<usize>;
    /// End point of the live selection, if any.
    fn caret(&self) -> Option<CaretPoint>;
    /// Collapses the live selection to `caret`.
    fn set_caret(&mut self, caret: CaretPoint);
    /// Replaces every rendered unit with one unit per token.
    fn materialize(&mut self, tokens: &[Token]);
    /// Applies reveal states to units that are already rendered.
    fn restyle(&mut self, tokens: &[Token]);
    /// Plain text currently shown by the host.
    fn plain_text(&self) -> String;
    /// Inserts `text` at the live caret, replacing nothing.
    fn insert_at_caret(&mut self, text: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct HostUnit {
    text: String,
    reveal: RevealState,
}

/// Host that keeps rendered units in memory.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    units: Vec<HostUnit>,
    anchor: Option<CaretPoint>,
    focus: Option<CaretPoint>,
    materialize_count: usize,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host showing `text` as one unstyled unit with no selection.
    pub fn with_plain_text(text: &str) -> Self {
        let mut host = Self::new();
        host.set_plain_text(text);
        host
    }

    /// Replaces the shown text with one unit, as a note load does.
    pub fn set_plain_text(&mut self, text: &str) {
        self.units.clear();
        if !text.is_empty() {
            self.units.push(HostUnit {
                text: text.to_string(),
                reveal: RevealState::Clear,
            });
        }
        self.anchor = None;
        self.focus = None;
    }

    /// Selects the logical range `[anchor, focus]` against current units.
    pub fn select(&mut self, range: SelectionRange) {
        let lengths = self.unit_lengths();
        self.anchor = Some(restore(range.anchor, &lengths));
        self.focus = Some(restore(range.focus, &lengths));
    }

    /// Clears the live selection.
    pub fn deselect(&mut self) {
        self.anchor = None;
        self.focus = None;
    }

    /// Live selection in logical offsets.
    pub fn selection_range(&self) -> Option<SelectionRange> {
        let lengths = self.unit_lengths();
        let focus = self.focus?;
        let anchor = self.anchor.unwrap_or(focus);
        Some(SelectionRange::new(
            capture(&lengths, Some(anchor)),
            capture(&lengths, Some(focus)),
        ))
    }

    /// Logical offset of the live caret end, if any.
    pub fn caret_offset(&self) -> Option<usize> {
        self.caret()
            .map(|caret| capture(&self.unit_lengths(), Some(caret)))
    }

    /// Deletes the char before the caret. Returns whether anything changed.
    pub fn delete_backward(&mut self) -> bool {
        let lengths = self.unit_lengths();
        let Some(offset) = self.caret_offset() else {
            return false;
        };
        if offset == 0 {
            return false;
        }

        // Address the char as the last one of its unit's prefix.
        let (index, local) = locate_before(offset, &lengths);
        let unit = &mut self.units[index];
        if let Some((byte_index, _)) = unit.text.char_indices().nth(local - 1) {
            unit.text.remove(byte_index);
        }
        if unit.text.is_empty() {
            self.units.remove(index);
        }

        let caret = restore(offset - 1, &self.unit_lengths());
        self.anchor = Some(caret);
        self.focus = Some(caret);
        true
    }

    pub fn unit_texts(&self) -> Vec<&str> {
        self.units.iter().map(|unit| unit.text.as_str()).collect()
    }

    pub fn unit_reveals(&self) -> Vec<RevealState> {
        self.units.iter().map(|unit| unit.reveal).collect()
    }

    /// Number of `materialize` calls so far.
    pub fn materialize_count(&self) -> usize {
        self.materialize_count
    }

    /// Shown text with every obscured char replaced by `mask`.
    pub fn masked_preview(&self, mask: char) -> String {
        self.units
            .iter()
            .map(|unit| match unit.reveal {
                RevealState::Clear => unit.text.clone(),
                RevealState::Obscured => unit.text.chars().map(|_| mask).collect(),
            })
            .collect()
    }
}

impl RenderHost for HeadlessHost {
    fn unit_lengths(&self) -> Vec<usize> {
        self.units
            .iter()
            .map(|unit| unit.text.chars().count())
            .collect()
    }

    fn caret(&self) -> Option<CaretPoint> {
        let lengths = self.unit_lengths();
        match (self.anchor, self.focus) {
            (Some(anchor), Some(focus)) => {
                if capture(&lengths, Some(anchor)) > capture(&lengths, Some(focus)) {
                    Some(anchor)
                } else {
                    Some(focus)
                }
            }
            (anchor, focus) => focus.or(anchor),
        }
    }

    fn set_caret(&mut self, caret: CaretPoint) {
        self.anchor = Some(caret);
        self.focus = Some(caret);
    }

    fn materialize(&mut self, tokens: &[Token]) {
        self.units = tokens
            .iter()
            .map(|token| HostUnit {
                text: token.text.clone(),
                reveal: token.reveal,
            })
            .collect();
        self.anchor = None;
        self.focus = None;
        self.materialize_count += 1;
    }

    fn restyle(&mut self, tokens: &[Token]) {
        if tokens.len() != self.units.len() {
            debug!(
                "event=restyle_skipped module=host units={} tokens={}",
                self.units.len(),
                tokens.len()
            );
            return;
        }
        for (unit, token) in self.units.iter_mut().zip(tokens) {
            unit.reveal = token.reveal;
        }
    }

    fn plain_text(&self) -> String {
        self.units.iter().map(|unit| unit.text.as_str()).collect()
    }

    fn insert_at_caret(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let inserted = text.chars().count();
        let caret = match self.caret() {
            Some(CaretPoint::Unit { index, offset }) if index < self.units.len() => {
                let unit = &mut self.units[index];
                let local = offset.min(unit.text.chars().count());
                let byte_index = unit
                    .text
                    .char_indices()
                    .nth(local)
                    .map_or(unit.text.len(), |(byte_index, _)| byte_index);
                unit.text.insert_str(byte_index, text);
                CaretPoint::Unit {
                    index,
                    offset: local + inserted,
                }
            }
            _ => {
                // No caret inside a unit: append to the end of the surface.
                let lengths = self.unit_lengths();
                let end = lengths.iter().sum();
                match restore(end, &lengths) {
                    CaretPoint::Unit { index, offset } => {
                        self.units[index].text.push_str(text);
                        CaretPoint::Unit {
                            index,
                            offset: offset + inserted,
                        }
                    }
                    CaretPoint::Surface => {
                        self.units.push(HostUnit {
                            text: text.to_string(),
                            reveal: RevealState::Clear,
                        });
                        CaretPoint::Unit {
                            index: 0,
                            offset: inserted,
                        }
                    }
                }
            }
        };
        self.anchor = Some(caret);
        self.focus = Some(caret);
    }
}

/// Unit index and 1-based local position of the char ending at `offset`.
fn locate_before(offset: usize, lengths: &[usize]) -> (usize, usize) {
    let mut unit_start = 0;
    for (index, len) in lengths.iter().enumerate() {
        let unit_end = unit_start + len;
        if offset <= unit_end && offset > unit_start {
            return (index, offset - unit_start);
        }
        unit_start = unit_end;
    }
    let last = lengths.len().saturating_sub(1);
    (last, lengths.get(last).copied().unwrap_or(0))
}
