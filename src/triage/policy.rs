//! Confidence-thresholded decision policy.
//!
//! A query ends in exactly one of four branches, checked in this order:
//!
//! 1. the normalized input is empty -> [`Decision::NoInput`]
//! 2. confidence `<` threshold -> [`Decision::Uncertain`]
//! 3. label is the emergency label -> [`Decision::Emergency`]
//! 4. otherwise -> [`Decision::Confident`]
//!
//! The threshold check comes first, so a low-confidence emergency prediction
//! is reported as uncertain.

use serde::{Deserialize, Serialize};

use crate::config::PolicyConfig;
use crate::ml::types::PredictionResult;
use crate::triage::advice::AdviceResolver;

/// Final answer for one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    #[serde(rename = "predicted_condition")]
    pub condition: String,
    pub confidence: f64,
    pub advice: String,
}

/// Branch of the decision policy taken for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// No usable text; the classifier was not consulted.
    NoInput,
    /// Best label is below the confidence threshold.
    Uncertain,
    /// Confident emergency prediction; fixed escalation advice.
    Emergency,
    /// Confident prediction with advice from the advice table.
    Confident,
}

/// Turns predictions into outcomes.
#[derive(Debug, Clone, Default)]
pub struct DecisionPolicy {
    config: PolicyConfig,
}

impl DecisionPolicy {
    pub fn new(config: PolicyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    pub fn threshold(&self) -> f64 {
        self.config.confidence_threshold
    }

    /// Outcome for input that normalizes to the empty string.
    pub fn no_input(&self) -> Outcome {
        Outcome {
            condition: self.config.unknown_condition.clone(),
            confidence: 0.0,
            advice: self.config.empty_input_message.clone(),
        }
    }

    /// Uncertain outcome carrying `confidence`.
    pub fn uncertain(&self, confidence: f64) -> Outcome {
        Outcome {
            condition: self.config.uncertain_condition.clone(),
            confidence,
            advice: self.config.uncertain_message.clone(),
        }
    }

    /// Which branch a query falls into. `None` means the input had no
    /// usable text and was never classified.
    ///
    /// A non-finite confidence is never trusted.
    pub fn branch(&self, prediction: Option<&PredictionResult>) -> Decision {
        match prediction {
            None => Decision::NoInput,
            Some(p)
                if !p.confidence.is_finite() || p.confidence < self.config.confidence_threshold =>
            {
                Decision::Uncertain
            }
            Some(p) if p.label == self.config.emergency_label => Decision::Emergency,
            Some(_) => Decision::Confident,
        }
    }

    /// Outcome for a query, together with the branch that produced it.
    pub fn decide(
        &self,
        prediction: Option<&PredictionResult>,
        advice: &dyn AdviceResolver,
    ) -> (Outcome, Decision) {
        let decision = self.branch(prediction);
        let outcome = match (decision, prediction) {
            (Decision::Uncertain, Some(p)) if p.confidence.is_finite() => {
                self.uncertain(p.confidence)
            }
            (Decision::Uncertain, _) => self.uncertain(0.0),
            (Decision::Emergency, Some(p)) => Outcome {
                condition: p.label.clone(),
                confidence: p.confidence,
                advice: self.config.emergency_message.clone(),
            },
            (Decision::Confident, Some(p)) => Outcome {
                condition: p.label.clone(),
                confidence: p.confidence,
                advice: advice.lookup(&p.label),
            },
            (Decision::NoInput, _) | (_, None) => self.no_input(),
        };
        (outcome, decision)
    }
}
