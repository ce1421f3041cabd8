//! The triage engine: normalize, classify, decide.

use std::sync::Arc;

use log::{debug, error, info};
use rayon::prelude::*;

use crate::analysis::analyzer::SimpleAnalyzer;
use crate::analysis::normalizer::TextNormalizer;
use crate::config::TriageConfig;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::ml::classifier::SymptomClassifier;
use crate::ml::ml_classifier::NaiveBayesTextClassifier;
use crate::ml::types::ProbabilityDistribution;

use super::advice::AdviceResolver;
use super::policy::{Decision, DecisionPolicy, Outcome};

/// Answers symptom queries against a trained, read-only model.
///
/// The engine holds no mutable state, so one instance can serve concurrent
/// queries without locking.
#[derive(Clone)]
pub struct TriageEngine {
    normalizer: TextNormalizer,
    classifier: Arc<dyn SymptomClassifier>,
    advice: Arc<dyn AdviceResolver>,
    policy: DecisionPolicy,
}

impl std::fmt::Debug for TriageEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriageEngine")
            .field("classifier", &self.classifier.name())
            .field("labels", &self.classifier.labels().len())
            .field("threshold", &self.policy.threshold())
            .finish()
    }
}

impl TriageEngine {
    /// Assemble an engine from its parts.
    pub fn new(
        classifier: Arc<dyn SymptomClassifier>,
        advice: Arc<dyn AdviceResolver>,
        policy: DecisionPolicy,
    ) -> Self {
        Self {
            normalizer: TextNormalizer::new(),
            classifier,
            advice,
            policy,
        }
    }

    /// Train on `dataset` and take the advice table from its records.
    pub fn from_dataset(dataset: &Dataset, config: &TriageConfig) -> Result<Self> {
        config.validate()?;

        let classifier = NaiveBayesTextClassifier::train(
            &dataset.examples(),
            Arc::new(SimpleAnalyzer::whitespace()),
            &config.model,
        )?;
        let advice = dataset.advice_table(&config.policy.fallback_advice);

        info!(
            "Triage engine ready: {} labels, {} advice entries, threshold {}",
            classifier.labels().len(),
            advice.len(),
            config.policy.confidence_threshold
        );

        Ok(Self::new(
            Arc::new(classifier),
            Arc::new(advice),
            DecisionPolicy::new(config.policy.clone()),
        ))
    }

    /// Engine trained on the built-in reference dataset with default settings.
    pub fn reference() -> Result<Self> {
        Self::from_dataset(&Dataset::reference(), &TriageConfig::default())
    }

    /// Classify one query. Never fails.
    pub fn classify(&self, text: &str) -> Outcome {
        self.classify_with_decision(text).0
    }

    /// Classify one query and report which policy branch produced the outcome.
    pub fn classify_with_decision(&self, text: &str) -> (Outcome, Decision) {
        let normalized = self.normalizer.normalize(text);
        if normalized.is_empty() {
            debug!("Query has no usable text");
            return self.policy.decide(None, self.advice.as_ref());
        }

        let prediction = match self.classifier.predict(&normalized) {
            Ok(prediction) => prediction,
            Err(e) => {
                error!("Classification of {normalized:?} failed: {e}");
                return (self.policy.uncertain(0.0), Decision::Uncertain);
            }
        };

        let (outcome, decision) = self.policy.decide(Some(&prediction), self.advice.as_ref());
        debug!(
            "Query {normalized:?}: best label {} ({:.4}) -> {decision:?}",
            prediction.label, prediction.confidence
        );
        (outcome, decision)
    }

    /// Classify many queries in parallel; outcomes keep the input order.
    pub fn classify_batch<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Vec<Outcome> {
        texts
            .par_iter()
            .map(|text| self.classify(text.as_ref()))
            .collect()
    }

    /// Like [`classify_batch`](Self::classify_batch), keeping the policy branch of each query.
    pub fn classify_batch_with_decisions<S: AsRef<str> + Sync>(
        &self,
        texts: &[S],
    ) -> Vec<(Outcome, Decision)> {
        texts
            .par_iter()
            .map(|text| self.classify_with_decision(text.as_ref()))
            .collect()
    }

    /// Full posterior distribution for a query.
    ///
    /// Input without usable text yields an empty distribution.
    pub fn distribution(&self, text: &str) -> Result<ProbabilityDistribution> {
        let normalized = self.normalizer.normalize(text);
        if normalized.is_empty() {
            return Ok(ProbabilityDistribution::default());
        }
        self.classifier.predict_distribution(&normalized)
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    pub fn classifier(&self) -> &dyn SymptomClassifier {
        self.classifier.as_ref()
    }

    pub fn policy(&self) -> &DecisionPolicy {
        &self.policy
    }
}
