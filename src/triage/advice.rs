//! Condition -> advice lookup.

use std::collections::BTreeMap;

/// Resolves the advice text for a condition label.
///
/// Lookups never fail: unknown conditions get a default text.
pub trait AdviceResolver: Send + Sync {
    fn lookup(&self, condition: &str) -> String;
}

/// A fixed advice table with a fallback text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdviceTable {
    entries: BTreeMap<String, String>,
    fallback: String,
}

impl AdviceTable {
    pub fn new(fallback: &str) -> Self {
        Self {
            entries: BTreeMap::new(),
            fallback: fallback.to_string(),
        }
    }

    /// Set the advice for `condition`, replacing any previous entry.
    pub fn insert(&mut self, condition: &str, advice: &str) {
        self.entries
            .insert(condition.to_string(), advice.to_string());
    }

    /// Set the advice for `condition` unless it already has one.
    pub fn insert_if_absent(&mut self, condition: &str, advice: &str) {
        self.entries
            .entry(condition.to_string())
            .or_insert_with(|| advice.to_string());
    }

    /// The stored advice for `condition`, without falling back.
    pub fn get(&self, condition: &str) -> Option<&str> {
        self.entries.get(condition).map(String::as_str)
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl AdviceResolver for AdviceTable {
    fn lookup(&self, condition: &str) -> String {
        self.get(condition)
            .unwrap_or(self.fallback.as_str())
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_fallback() {
        let mut table = AdviceTable::new("No specific advice found.");
        table.insert("Flu", "Rest.");

        assert_eq!(table.lookup("Flu"), "Rest.");
        assert_eq!(table.lookup("flu"), "No specific advice found.");
        assert_eq!(table.lookup(""), "No specific advice found.");
        assert_eq!(table.get("Allergy"), None);
    }

    #[test]
    fn test_insert_if_absent_keeps_first() {
        let mut table = AdviceTable::new("none");
        table.insert_if_absent("Emergency", "first");
        table.insert_if_absent("Emergency", "second");
        assert_eq!(table.lookup("Emergency"), "first");

        table.insert("Emergency", "third");
        assert_eq!(table.lookup("Emergency"), "third");
        assert_eq!(table.len(), 1);
        assert!(!table.is_empty());
        assert_eq!(table.fallback(), "none");
    }
}
