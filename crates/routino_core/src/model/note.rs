//! Note domain model.
//!
//! # Responsibility
//! - Define the in-memory note record held by the note store.
//! - Provide the default title rule for untitled notes.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `number` is the creation ordinal and only feeds default titles.
//! - At most one note in a store has `is_active == true`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a note.
pub type NoteId = Uuid;

/// One note held in volatile memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    /// Creation ordinal, starting at 1.
    pub number: u32,
    pub title: String,
    /// Raw plain text; never contains render markup.
    pub content: String,
    /// Unix epoch milliseconds of creation or the last title/content write.
    pub last_touched_ms: i64,
    pub is_active: bool,
}

impl Note {
    /// Creates an inactive, empty note with the default title for `number`.
    pub fn new(number: u32, now_ms: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            number,
            title: default_title(number),
            content: String::new(),
            last_touched_ms: now_ms,
            is_active: false,
        }
    }

    /// Replaces the title, falling back to the default one when blank.
    pub fn set_title(&mut self, title: &str, now_ms: i64) {
        self.title = if title.trim().is_empty() {
            default_title(self.number)
        } else {
            title.to_string()
        };
        self.last_touched_ms = now_ms;
    }

    pub fn set_content(&mut self, content: impl Into<String>, now_ms: i64) {
        self.content = content.into();
        self.last_touched_ms = now_ms;
    }
}

/// Default title for the note created as ordinal `number`.
pub fn default_title(number: u32) -> String {
    format!("New Note {number}")
}
