//! Sequence tokenization

use crate::options::EmptySequence;

/// Split already-trimmed sequence text on `,` and trim each token.
///
/// Empty tokens are kept so failed or missing entries stay positional.
/// Empty input yields no tokens under [`EmptySequence::Empty`] and a single
/// empty token under [`EmptySequence::SingleToken`].
pub fn split_sequence(text: &str, empty: EmptySequence) -> Vec<&str> {
    if text.is_empty() && empty == EmptySequence::Empty {
        return Vec::new();
    }
    text.split(',').map(str::trim).collect()
}
