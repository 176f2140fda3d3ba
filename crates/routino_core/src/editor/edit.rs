//! Classification of user edits into scheduling tiers.
//!
//! # Invariants
//! - Edits that can move a token boundary (whitespace, punctuation, line
//!   breaks) schedule `Immediate`; everything else schedules `Deferred`.

use crate::editor::scheduler::ScheduleTier;
use once_cell::sync::Lazy;
use regex::Regex;

static BOUNDARY_CHAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[\s.,!?;:'"()\[\]{}\-—–]"#).expect("valid boundary char regex")
});

/// Kind of edit reported by the host alongside new content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditKind {
    /// Typed or pasted text.
    InsertText(String),
    InsertParagraph,
    InsertLineBreak,
    /// Any deletion (backward, forward, cut).
    Delete,
    /// Host-side change with no finer classification.
    Other,
}

impl EditKind {
    pub fn schedule_tier(&self) -> ScheduleTier {
        match self {
            Self::InsertParagraph | Self::InsertLineBreak => ScheduleTier::Immediate,
            Self::InsertText(text) if BOUNDARY_CHAR_RE.is_match(text) => ScheduleTier::Immediate,
            Self::InsertText(_) | Self::Delete | Self::Other => ScheduleTier::Deferred,
        }
    }
}
