use super::CharFilter;

/// A char filter that lowercases the whole input.
///
/// Lowercasing is Unicode-aware, so `"É"` becomes `"é"`; a later filter is
/// responsible for dropping anything outside the ASCII letter range.
#[derive(Clone, Debug, Default)]
pub struct LowercaseCharFilter;

impl LowercaseCharFilter {
    /// Create a new lowercase char filter.
    pub fn new() -> Self {
        LowercaseCharFilter
    }
}

impl CharFilter for LowercaseCharFilter {
    fn filter(&self, input: &str) -> String {
        input.to_lowercase()
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}
