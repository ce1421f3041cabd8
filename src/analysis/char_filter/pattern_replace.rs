use regex::Regex;

use super::CharFilter;
use crate::error::{Result, TriageError};

/// A char filter that replaces every match of a regex pattern.
#[derive(Clone, Debug)]
pub struct PatternReplaceCharFilter {
    pattern: Regex,
    replacement: String,
}

impl PatternReplaceCharFilter {
    /// Create a new pattern replace char filter.
    pub fn new(pattern: &str, replacement: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| TriageError::analysis(format!("Invalid regex pattern: {e}")))?;
        Ok(Self::from_regex(regex, replacement))
    }

    /// Create a filter from an already compiled regex.
    pub fn from_regex(pattern: Regex, replacement: &str) -> Self {
        Self {
            pattern,
            replacement: replacement.to_string(),
        }
    }

    /// Get the regex pattern used by this filter.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl CharFilter for PatternReplaceCharFilter {
    fn filter(&self, input: &str) -> String {
        // `NoExpand` keeps `$` in the replacement literal.
        self.pattern
            .replace_all(input, regex::NoExpand(&self.replacement))
            .into_owned()
    }

    fn name(&self) -> &'static str {
        "pattern_replace"
    }
}
