//! Whitespace/word segmentation of raw note content.
//!
//! # Invariants
//! - Concatenating token texts in order reproduces the input exactly.
//! - Adjacent tokens never share a kind (runs are maximal).
//! - Whitespace tokens are always `Clear`.

use crate::model::token::{RevealState, Token, TokenKind};
use once_cell::sync::Lazy;
use regex::Regex;

pub(crate) static WHITESPACE_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace run regex"));

/// Splits `content` into maximal whitespace and word runs.
///
/// Word tokens start `Obscured` when `blur_enabled`, else `Clear`.
pub fn tokenize(content: &str, blur_enabled: bool) -> Vec<Token> {
    let word_reveal = if blur_enabled {
        RevealState::Obscured
    } else {
        RevealState::Clear
    };

    let mut tokens = Vec::new();
    let mut cursor = 0;
    for run in WHITESPACE_RUN_RE.find_iter(content) {
        if run.start() > cursor {
            tokens.push(Token::new(
                &content[cursor..run.start()],
                TokenKind::Word,
                word_reveal,
            ));
        }
        tokens.push(Token::new(
            run.as_str(),
            TokenKind::Whitespace,
            RevealState::Clear,
        ));
        cursor = run.end();
    }
    if cursor < content.len() {
        tokens.push(Token::new(&content[cursor..], TokenKind::Word, word_reveal));
    }
    tokens
}

/// Plain text of a rendered token list.
pub fn render_plain(tokens: &[Token]) -> String {
    tokens.iter().map(|token| token.text.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::{render_plain, tokenize};
    use crate::model::token::{RevealState, TokenKind};

    #[test]
    fn empty_input_yields_no_tokens() {
        assert!(tokenize("", true).is_empty());
    }

    #[test]
    fn keeps_whitespace_runs_verbatim() {
        let content = "  two\t\twords \n";
        let tokens = tokenize(content, true);
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["  ", "two", "\t\t", "words", " \n"]);
        assert_eq!(render_plain(&tokens), content);
    }

    #[test]
    fn word_reveal_follows_blur_flag() {
        let blurred = tokenize("a b", true);
        assert_eq!(blurred[0].reveal, RevealState::Obscured);
        assert_eq!(blurred[1].kind, TokenKind::Whitespace);
        assert_eq!(blurred[1].reveal, RevealState::Clear);

        let clear = tokenize("a b", false);
        assert!(clear.iter().all(|t| t.reveal == RevealState::Clear));
    }

    #[test]
    fn multibyte_words_stay_whole() {
        let tokens = tokenize("☐ café ✨", true);
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["☐", " ", "café", " ", "✨"]);
        assert_eq!(tokens[2].char_len(), 4);
    }
}
