//! Internal helpers for input normalization.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation so that category names compare equal no matter how they were
//! typed.

use unicode_normalization::UnicodeNormalization;

use crate::{EngineError, ResultEngine};

/// Normalize a category name for display and comparison.
///
/// Trims, collapses internal whitespace runs to a single space and applies
/// Unicode NFC so that composed and decomposed accents match.
pub(crate) fn normalize_category_display(input: &str) -> ResultEngine<String> {
    let mut out = String::new();
    for token in input.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.extend(token.nfc());
    }
    if out.is_empty() {
        return Err(EngineError::InvalidEntry(
            "category must not be empty".to_string(),
        ));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace() {
        assert_eq!(
            normalize_category_display("  Eating   out ").unwrap(),
            "Eating out"
        );
    }

    #[test]
    fn composes_accents() {
        let decomposed = "Cafe\u{301}";
        assert_eq!(normalize_category_display(decomposed).unwrap(), "Caf\u{e9}");
    }

    #[test]
    fn rejects_blank() {
        assert!(matches!(
            normalize_category_display(" \t "),
            Err(EngineError::InvalidEntry(_))
        ));
    }
}
