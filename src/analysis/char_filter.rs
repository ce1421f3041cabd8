//! Char filters that rewrite the text string before it is tokenized.
//!
//! # Available Filters
//!
//! - [`lowercase::LowercaseCharFilter`] - Unicode-aware lowercasing
//! - [`pattern_replace::PatternReplaceCharFilter`] - Regex-based replacement
//!
//! # Examples
//!
//! ```
//! use symptom_triage::analysis::char_filter::CharFilter;
//! use symptom_triage::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
//!
//! let filter = PatternReplaceCharFilter::new(r"[0-9]+", " ").unwrap();
//! assert_eq!(filter.filter("fever 39c"), "fever  c");
//! ```

pub mod lowercase;
pub mod pattern_replace;

pub use lowercase::LowercaseCharFilter;
pub use pattern_replace::PatternReplaceCharFilter;

/// Trait for character filters that transform text before tokenization.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text and return the rewritten text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}
