//! Per-token visibility derived from blur setting, selection and hover.
//!
//! # Responsibility
//! - Decide `Clear` vs `Obscured` for every token from current inputs only.
//!
//! # Invariants
//! - Token text and kind are never changed.
//! - The result depends only on the arguments; there is no per-token state
//!   carried between calls.

use crate::model::selection::SelectionRange;
use crate::model::token::{RevealState, Token};

/// Recomputes reveal state for `tokens`.
///
/// A token is `Clear` when blur is off, when it is whitespace, when its char
/// span intersects `selection`, or when it is the `hover` token index.
pub fn compute_reveal(
    tokens: &[Token],
    selection: Option<SelectionRange>,
    hover: Option<usize>,
    blur_enabled: bool,
) -> Vec<Token> {
    let mut span_start = 0;
    tokens
        .iter()
        .enumerate()
        .map(|(index, token)| {
            let span_end = span_start + token.char_len();
            let clear = !blur_enabled
                || token.is_whitespace()
                || hover == Some(index)
                || selection.is_some_and(|range| intersects(range, span_start, span_end));
            span_start = span_end;

            let mut revealed = token.clone();
            revealed.reveal = if clear {
                RevealState::Clear
            } else {
                RevealState::Obscured
            };
            revealed
        })
        .collect()
}

/// Whether `range` touches the char span `[start, end)`.
///
/// A collapsed caret counts when it sits inside the span or on either edge.
fn intersects(range: SelectionRange, start: usize, end: usize) -> bool {
    if range.is_collapsed() {
        let caret = range.focus;
        return start <= caret && caret <= end;
    }
    range.start() < end && start < range.end()
}

#[cfg(test)]
mod tests {
    use super::compute_reveal;
    use crate::editor::tokenizer::tokenize;
    use crate::model::selection::SelectionRange;
    use crate::model::token::RevealState;

    fn states(content: &str, selection: Option<SelectionRange>, hover: Option<usize>) -> Vec<RevealState> {
        compute_reveal(&tokenize(content, true), selection, hover, true)
            .into_iter()
            .map(|t| t.reveal)
            .collect()
    }

    #[test]
    fn blur_off_clears_everything() {
        let tokens = tokenize("secret plans here", true);
        let revealed = compute_reveal(&tokens, None, None, false);
        assert!(revealed.iter().all(|t| !t.is_obscured()));
    }

    #[test]
    fn hover_reveals_only_target_token() {
        use RevealState::{Clear, Obscured};
        assert_eq!(
            states("one two three", None, Some(2)),
            vec![Obscured, Clear, Clear, Clear, Obscured]
        );
    }

    #[test]
    fn collapsed_caret_reveals_touching_word() {
        use RevealState::{Clear, Obscured};
        assert_eq!(
            states("one two", Some(SelectionRange::collapsed(3)), None),
            vec![Clear, Clear, Obscured]
        );
        assert_eq!(
            states("one two", Some(SelectionRange::collapsed(4)), None),
            vec![Obscured, Clear, Clear]
        );
    }

    #[test]
    fn range_ending_on_boundary_does_not_reveal_next_word() {
        use RevealState::{Clear, Obscured};
        assert_eq!(
            states("one two", Some(SelectionRange::new(0, 4)), None),
            vec![Clear, Clear, Obscured]
        );
        assert_eq!(
            states("one two", Some(SelectionRange::new(5, 1)), None),
            vec![Clear, Clear, Clear]
        );
    }
}
