//! Common types for symptom classification.

use serde::{Deserialize, Serialize};

/// A labeled training document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingExample {
    /// Free-text symptom description.
    pub text: String,
    /// Condition label.
    pub label: String,
}

impl TrainingExample {
    pub fn new<T: Into<String>, L: Into<String>>(text: T, label: L) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}

/// The arg-max label of a distribution and its probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub label: String,
    /// Posterior probability of `label`, in [0, 1].
    pub confidence: f64,
}

/// Probability assigned to one label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassProbability {
    pub label: String,
    pub probability: f64,
}

/// Feature weight of one vocabulary term in a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermWeight {
    pub term: String,
    pub weight: f64,
}

/// Posterior distribution over labels, stored in sorted label order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProbabilityDistribution {
    entries: Vec<ClassProbability>,
}

impl ProbabilityDistribution {
    /// Build a distribution from `(label, probability)` entries.
    ///
    /// Entries are expected in sorted label order; [`best`](Self::best)
    /// relies on that order to break ties.
    pub fn new(entries: Vec<ClassProbability>) -> Self {
        Self { entries }
    }

    /// The most probable label. Among equal maxima the first label in sorted
    /// order wins.
    pub fn best(&self) -> Option<PredictionResult> {
        let mut best: Option<&ClassProbability> = None;
        for entry in &self.entries {
            match best {
                Some(current) if entry.probability <= current.probability => {}
                _ => best = Some(entry),
            }
        }
        best.map(|entry| PredictionResult {
            label: entry.label.clone(),
            confidence: entry.probability,
        })
    }

    /// Probability of `label`, if it is a known class.
    pub fn probability(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| entry.probability)
    }

    /// Entries ordered by descending probability; ties keep label order.
    pub fn ranked(&self) -> Vec<ClassProbability> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.probability.total_cmp(&a.probability));
        ranked
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassProbability> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all probabilities (1.0 up to rounding for a fitted model).
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|entry| entry.probability).sum()
    }
}
