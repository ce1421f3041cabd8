//! Configuration for the triage engine.
//!
//! Configuration is plain serde data with defaults for every field, so a JSON
//! file only needs to name the values it overrides:
//!
//! ```
//! use symptom_triage::config::TriageConfig;
//!
//! let config: TriageConfig =
//!     serde_json::from_str(r#"{ "policy": { "confidence_threshold": 0.7 } }"#).unwrap();
//! assert_eq!(config.policy.confidence_threshold, 0.7);
//! assert_eq!(config.model.smoothing_alpha, 0.1);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TriageError};

/// Minimum posterior probability for a confident prediction.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.55;

/// Additive smoothing constant of the Naive Bayes model.
pub const DEFAULT_SMOOTHING_ALPHA: f64 = 0.1;

/// Label whose confident predictions get the fixed escalation message.
pub const EMERGENCY_LABEL: &str = "Emergency";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageConfig {
    /// Model training configuration.
    pub model: ModelConfig,
    /// Decision policy configuration.
    pub policy: PolicyConfig,
}

impl TriageConfig {
    /// Load a configuration from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: TriageConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Override the confidence threshold.
    pub fn with_confidence_threshold(mut self, threshold: f64) -> Self {
        self.policy.confidence_threshold = threshold;
        self
    }

    /// Override the smoothing constant.
    pub fn with_smoothing_alpha(mut self, alpha: f64) -> Self {
        self.model.smoothing_alpha = alpha;
        self
    }

    /// Check every value for consistency.
    pub fn validate(&self) -> Result<()> {
        self.model.validate()?;
        self.policy.validate()
    }
}

/// Configuration for training the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Additive smoothing constant (> 0).
    pub smoothing_alpha: f64,

    /// Closed label set. Every listed label must have training examples and
    /// every training label must be listed. Empty means "whatever labels the
    /// corpus contains".
    pub labels: Vec<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            smoothing_alpha: DEFAULT_SMOOTHING_ALPHA,
            labels: Vec::new(),
        }
    }
}

impl ModelConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.smoothing_alpha.is_finite() || self.smoothing_alpha <= 0.0 {
            return Err(TriageError::config(format!(
                "smoothing_alpha must be positive, got {}",
                self.smoothing_alpha
            )));
        }
        Ok(())
    }
}

/// Configuration for turning predictions into outcomes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Predictions below this confidence are reported as uncertain.
    pub confidence_threshold: f64,

    /// Label that triggers the escalation message.
    pub emergency_label: String,

    /// Condition reported for input without usable text.
    pub unknown_condition: String,

    /// Condition reported for low-confidence predictions.
    pub uncertain_condition: String,

    /// Advice for input without usable text.
    pub empty_input_message: String,

    /// Advice for low-confidence predictions.
    pub uncertain_message: String,

    /// Advice for confident emergency predictions.
    pub emergency_message: String,

    /// Advice when the advice table has no entry for a condition.
    pub fallback_advice: String,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            emergency_label: EMERGENCY_LABEL.to_string(),
            unknown_condition: "Unknown".to_string(),
            uncertain_condition: "Uncertain/General".to_string(),
            empty_input_message: "Please enter some symptoms to get a response.".to_string(),
            uncertain_message: "I am not confident in a specific diagnosis. Please provide \
                                more details or consult a healthcare professional."
                .to_string(),
            emergency_message: "Your symptoms may indicate a medical emergency. Please seek \
                                immediate medical attention or call emergency services."
                .to_string(),
            fallback_advice: "No specific advice found.".to_string(),
        }
    }
}

impl PolicyConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(TriageError::config(format!(
                "confidence_threshold must lie in [0, 1], got {}",
                self.confidence_threshold
            )));
        }
        if self.emergency_label.is_empty() {
            return Err(TriageError::config("emergency_label must not be empty"));
        }
        Ok(())
    }
}
