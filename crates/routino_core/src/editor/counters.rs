//! Word and character counters for the status bar.

use crate::editor::tokenizer::WHITESPACE_RUN_RE;
use serde::{Deserialize, Serialize};

/// Counts over trimmed note content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextCounters {
    pub words: usize,
    pub chars: usize,
}

impl TextCounters {
    pub fn measure(content: &str) -> Self {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Self::default();
        }
        Self {
            words: WHITESPACE_RUN_RE.split(trimmed).count(),
            chars: trimmed.chars().count(),
        }
    }

    pub fn word_label(&self) -> String {
        if self.words == 1 {
            "1 word".to_string()
        } else {
            format!("{} words", self.words)
        }
    }

    pub fn char_label(&self) -> String {
        format!("{} characters", self.chars)
    }
}
