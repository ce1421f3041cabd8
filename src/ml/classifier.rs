//! Symptom classifier trait definition.

use crate::error::{Result, TriageError};
use crate::ml::types::{PredictionResult, ProbabilityDistribution, TermWeight};

/// Symptom classifier trait.
///
/// Implementations are trained once and are read-only afterwards, so a
/// classifier can be shared between threads and queried concurrently.
pub trait SymptomClassifier: Send + Sync {
    /// Posterior distribution over every known label for `text`.
    fn predict_distribution(&self, text: &str) -> Result<ProbabilityDistribution>;

    /// Arg-max label of [`predict_distribution`](Self::predict_distribution).
    fn predict(&self, text: &str) -> Result<PredictionResult> {
        self.predict_distribution(text)?
            .best()
            .ok_or_else(|| TriageError::model("classifier has no labels"))
    }

    /// Labels this classifier can predict, in sorted order.
    fn labels(&self) -> &[String];

    /// In-vocabulary terms of `text` with their feature weights, in
    /// vocabulary order. Classifiers without a term vocabulary return nothing.
    fn term_weights(&self, _text: &str) -> Result<Vec<TermWeight>> {
        Ok(Vec::new())
    }

    /// Number of distinct terms the classifier knows.
    fn vocabulary_size(&self) -> usize {
        0
    }

    /// Prior probability of `label`, if the classifier has one.
    fn prior(&self, _label: &str) -> Option<f64> {
        None
    }

    /// Get the name of this classifier for debugging and logging.
    fn name(&self) -> &str;
}
