//! Token model for the privacy-blur pipeline.
//!
//! Tokens are recomputed from note content on every segmentation pass and
//! are never persisted.

use serde::{Deserialize, Serialize};

/// Segment class of one token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Maximal run of whitespace characters.
    Whitespace,
    /// Maximal run of non-whitespace characters.
    Word,
}

/// Visibility of one token in the rendered editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealState {
    Clear,
    Obscured,
}

/// One segment of note content tagged with its visibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub kind: TokenKind,
    pub reveal: RevealState,
}

impl Token {
    pub fn new(text: impl Into<String>, kind: TokenKind, reveal: RevealState) -> Self {
        Self {
            text: text.into(),
            kind,
            reveal,
        }
    }

    /// Length in chars, the unit used by logical offsets.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_whitespace(&self) -> bool {
        self.kind == TokenKind::Whitespace
    }

    pub fn is_obscured(&self) -> bool {
        self.reveal == RevealState::Obscured
    }
}

/// Char lengths of `tokens`, in order.
pub fn token_lengths(tokens: &[Token]) -> Vec<usize> {
    tokens.iter().map(Token::char_len).collect()
}
