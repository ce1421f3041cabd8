//! Multinomial Naive Bayes over non-negative feature vectors.
//!
//! Training sums the feature vectors of each class, adds the smoothing
//! constant `alpha` to every feature and normalizes the result into the
//! per-class conditional distribution `P(term | class)`. Class priors are the
//! relative document counts.
//!
//! Scoring works in log space:
//!
//! ```text
//! score(c) = ln P(c) + Σ_t x[t] · ln P(t | c)
//! P(c | x) = exp(score(c) - max) / Σ_k exp(score(k) - max)
//! ```

use std::collections::BTreeMap;

use log::debug;

use crate::error::{Result, TriageError};
use crate::ml::types::{ClassProbability, ProbabilityDistribution};

/// A multinomial Naive Bayes model.
///
/// Classes are kept in sorted order; every per-class vector is indexed the
/// same way.
#[derive(Debug, Clone)]
pub struct MultinomialNaiveBayes {
    /// Additive smoothing constant.
    alpha: f64,
    /// Class labels, sorted.
    classes: Vec<String>,
    /// Number of training documents per class.
    class_count: Vec<usize>,
    /// ln P(class).
    class_log_prior: Vec<f64>,
    /// ln P(term | class), one row per class.
    feature_log_prob: Vec<Vec<f64>>,
    /// Length of the feature vectors.
    n_features: usize,
}

impl MultinomialNaiveBayes {
    /// Create an unfitted model with the given smoothing constant.
    pub fn new(alpha: f64) -> Result<Self> {
        if !alpha.is_finite() || alpha <= 0.0 {
            return Err(TriageError::model(format!(
                "smoothing alpha must be a positive finite number, got {alpha}"
            )));
        }

        Ok(Self {
            alpha,
            classes: Vec::new(),
            class_count: Vec::new(),
            class_log_prior: Vec::new(),
            feature_log_prob: Vec::new(),
            n_features: 0,
        })
    }

    /// Fit the model; the class set is the set of distinct `labels`.
    pub fn fit(&mut self, vectors: &[Vec<f64>], labels: &[String]) -> Result<()> {
        self.fit_with_classes(vectors, labels, &[])
    }

    /// Fit the model against a declared class set.
    ///
    /// Every declared class must have at least one training document, and
    /// every label must be declared. An empty `classes` slice declares the
    /// distinct labels themselves.
    pub fn fit_with_classes(
        &mut self,
        vectors: &[Vec<f64>],
        labels: &[String],
        classes: &[String],
    ) -> Result<()> {
        if vectors.is_empty() {
            return Err(TriageError::EmptyCorpus);
        }
        if vectors.len() != labels.len() {
            return Err(TriageError::model(format!(
                "got {} feature vectors but {} labels",
                vectors.len(),
                labels.len()
            )));
        }

        let n_features = vectors[0].len();
        if n_features == 0 {
            return Err(TriageError::model("feature vectors are empty"));
        }
        for (i, vector) in vectors.iter().enumerate() {
            if vector.len() != n_features {
                return Err(TriageError::model(format!(
                    "feature vector {i} has length {}, expected {n_features}",
                    vector.len()
                )));
            }
            if vector.iter().any(|x| !x.is_finite() || *x < 0.0) {
                return Err(TriageError::model(format!(
                    "feature vector {i} has negative or non-finite entries"
                )));
            }
        }
        if labels.iter().any(|label| label.is_empty()) {
            return Err(TriageError::model("labels must not be empty"));
        }

        // Sorted class -> (document count, summed features)
        let mut per_class: BTreeMap<&str, (usize, Vec<f64>)> = BTreeMap::new();
        for class in classes {
            per_class
                .entry(class.as_str())
                .or_insert_with(|| (0, vec![0.0; n_features]));
        }
        for (vector, label) in vectors.iter().zip(labels) {
            if !classes.is_empty() && !classes.contains(label) {
                return Err(TriageError::model(format!(
                    "label '{label}' is not among the declared classes"
                )));
            }
            let (count, sums) = per_class
                .entry(label.as_str())
                .or_insert_with(|| (0, vec![0.0; n_features]));
            *count += 1;
            for (sum, x) in sums.iter_mut().zip(vector) {
                *sum += x;
            }
        }

        if let Some((class, _)) = per_class.iter().find(|(_, (count, _))| *count == 0) {
            return Err(TriageError::MissingLabel(class.to_string()));
        }

        let n_documents = vectors.len() as f64;
        let mut fitted_classes = Vec::with_capacity(per_class.len());
        let mut class_count = Vec::with_capacity(per_class.len());
        let mut class_log_prior = Vec::with_capacity(per_class.len());
        let mut feature_log_prob = Vec::with_capacity(per_class.len());

        for (class, (count, sums)) in per_class {
            let smoothed: Vec<f64> = sums.iter().map(|sum| sum + self.alpha).collect();
            let total: f64 = smoothed.iter().sum();
            if !total.is_finite() {
                return Err(TriageError::model(format!(
                    "smoothed feature total for '{class}' overflows with alpha={}",
                    self.alpha
                )));
            }
            let log_probs: Vec<f64> = smoothed.iter().map(|s| (s / total).ln()).collect();
            if log_probs.iter().any(|lp| !lp.is_finite()) {
                return Err(TriageError::model(format!(
                    "conditional probabilities for '{class}' are not finite with alpha={}",
                    self.alpha
                )));
            }
            feature_log_prob.push(log_probs);
            class_log_prior.push((count as f64 / n_documents).ln());
            class_count.push(count);
            fitted_classes.push(class.to_string());
        }

        debug!(
            "fitted multinomial naive bayes: {} classes, {} features, alpha={}",
            fitted_classes.len(),
            n_features,
            self.alpha
        );

        self.classes = fitted_classes;
        self.class_count = class_count;
        self.class_log_prior = class_log_prior;
        self.feature_log_prob = feature_log_prob;
        self.n_features = n_features;

        Ok(())
    }

    /// Per-class log-scores `ln P(c) + Σ x[t] ln P(t | c)`, in class order.
    ///
    /// Entries beyond the fitted feature count are ignored.
    pub fn joint_log_likelihood(&self, vector: &[f64]) -> Vec<f64> {
        self.class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(prior, log_probs)| {
                prior
                    + vector
                        .iter()
                        .zip(log_probs)
                        .map(|(x, log_p)| x * log_p)
                        .sum::<f64>()
            })
            .collect()
    }

    /// Posterior distribution over the classes for `vector`.
    pub fn predict_distribution(&self, vector: &[f64]) -> ProbabilityDistribution {
        let scores = self.joint_log_likelihood(vector);
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
        let total: f64 = exps.iter().sum();

        ProbabilityDistribution::new(
            self.classes
                .iter()
                .zip(exps)
                .map(|(label, e)| ClassProbability {
                    label: label.clone(),
                    probability: e / total,
                })
                .collect(),
        )
    }

    /// Whether [`fit`](Self::fit) has completed successfully.
    pub fn is_fitted(&self) -> bool {
        !self.classes.is_empty()
    }

    /// Class labels in sorted order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Number of training documents per class, in class order.
    pub fn class_counts(&self) -> &[usize] {
        &self.class_count
    }

    /// Prior probability of `label`.
    pub fn class_prior(&self, label: &str) -> Option<f64> {
        self.class_index(label)
            .map(|idx| self.class_log_prior[idx].exp())
    }

    /// Smoothed `P(term | label)` for every term.
    pub fn conditional_probabilities(&self, label: &str) -> Option<Vec<f64>> {
        self.class_index(label)
            .map(|idx| self.feature_log_prob[idx].iter().map(|lp| lp.exp()).collect())
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    fn class_index(&self, label: &str) -> Option<usize> {
        self.classes.iter().position(|class| class == label)
    }
}
