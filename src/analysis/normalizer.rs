//! Canonicalization of raw symptom text.
//!
//! The default normalizer lower-cases the input, replaces every character
//! outside `a-z` and whitespace with a space, collapses whitespace runs and
//! trims the ends:
//!
//! ```
//! use symptom_triage::analysis::normalize;
//!
//! assert_eq!(normalize("  Runny nose,\tSNEEZING!! "), "runny nose sneezing");
//! assert_eq!(normalize("123 ..."), "");
//! ```
//!
//! An empty result means the input carried no usable signal.

use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::analysis::char_filter::{CharFilter, LowercaseCharFilter, PatternReplaceCharFilter};

lazy_static! {
    static ref NON_LETTER: Regex = Regex::new(r"[^a-z\s]").expect("static pattern is valid");
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").expect("static pattern is valid");
    static ref DEFAULT_NORMALIZER: TextNormalizer = TextNormalizer::new();
}

/// Normalize `text` with the default symptom normalizer.
pub fn normalize(text: &str) -> String {
    DEFAULT_NORMALIZER.normalize(text)
}

/// A chain of char filters followed by a trim.
#[derive(Clone)]
pub struct TextNormalizer {
    char_filters: Vec<Arc<dyn CharFilter>>,
}

impl TextNormalizer {
    /// Create the default normalizer: lowercase, strip non-letters, collapse
    /// whitespace.
    pub fn new() -> Self {
        Self::empty()
            .add_filter(Arc::new(LowercaseCharFilter::new()))
            .add_filter(Arc::new(PatternReplaceCharFilter::from_regex(
                NON_LETTER.clone(),
                " ",
            )))
            .add_filter(Arc::new(PatternReplaceCharFilter::from_regex(
                WHITESPACE_RUN.clone(),
                " ",
            )))
    }

    /// Create a normalizer with no char filters; it only trims.
    pub fn empty() -> Self {
        TextNormalizer {
            char_filters: Vec::new(),
        }
    }

    /// Append a char filter to the chain.
    pub fn add_filter(mut self, filter: Arc<dyn CharFilter>) -> Self {
        self.char_filters.push(filter);
        self
    }

    /// Get the char filters applied by this normalizer, in order.
    pub fn filters(&self) -> &[Arc<dyn CharFilter>] {
        &self.char_filters
    }

    /// Run every char filter over `text` and trim the result.
    pub fn normalize(&self, text: &str) -> String {
        let mut output = text.to_string();
        for filter in &self.char_filters {
            output = filter.filter(&output);
        }
        output.trim().to_string()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TextNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextNormalizer")
            .field(
                "char_filters",
                &self.char_filters.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_basic() {
        assert_eq!(
            normalize("High fever, severe cough, body aches, chills, fatigue"),
            "high fever severe cough body aches chills fatigue"
        );
        assert_eq!(
            normalize("Urinary Tract Infection (UTI)"),
            "urinary tract infection uti"
        );
    }

    #[test]
    fn test_normalize_empty_and_blank() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \t\n "), "");
        assert_eq!(normalize("!!! 42 ???"), "");
    }

    #[test]
    fn test_normalize_non_ascii_letters_become_spaces() {
        assert_eq!(normalize("naïve café"), "na ve caf");
        assert_eq!(normalize("FIÈVRE"), "fi vre");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            "",
            "  Runny nose,\tSNEEZING!! ",
            "left-arm pain (sharp) 3x/day",
            "naïve café\u{00a0}fever",
            "\u{2003}em space\u{2003}",
            "ALL CAPS\n\nnew lines",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn test_output_alphabet() {
        let out = normalize("Mixed: ÄÖÜ, 123, tabs\tand\u{00a0}nbsp");
        assert!(out.chars().all(|c| c.is_ascii_lowercase() || c == ' '));
        assert!(!out.contains("  "));
        assert_eq!(out, out.trim());
    }

    #[test]
    fn test_filter_chain() {
        let normalizer = TextNormalizer::new();
        let names: Vec<&str> = normalizer.filters().iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["lowercase", "pattern_replace", "pattern_replace"]);

        let trim_only = TextNormalizer::empty();
        assert_eq!(trim_only.normalize("  Fever, "), "Fever,");
    }
}
