//! # Symptom Triage
//!
//! Maps free-text symptom descriptions to a likely condition, a confidence
//! score and canned advice.
//!
//! ## Pipeline
//!
//! - Text normalization through a chain of char filters
//! - TF-IDF term weighting over a sorted vocabulary
//! - Multinomial Naive Bayes with additive smoothing
//! - A confidence-thresholded decision policy with an emergency override
//!
//! ```
//! use symptom_triage::prelude::*;
//!
//! # fn main() -> symptom_triage::error::Result<()> {
//! let engine = TriageEngine::reference()?;
//! let outcome = engine.classify("high fever, severe cough, body aches, chills, fatigue");
//! assert_eq!(outcome.condition, "Flu");
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod ml;
pub mod triage;

pub mod prelude {
    pub use crate::analysis::{Analyzer, SimpleAnalyzer, TextNormalizer, normalize};
    pub use crate::config::{ModelConfig, PolicyConfig, TriageConfig};
    pub use crate::dataset::{Dataset, SymptomRecord};
    pub use crate::error::{Result, TriageError};
    pub use crate::ml::{ProbabilityDistribution, SymptomClassifier, TrainingExample};
    pub use crate::triage::{AdviceResolver, AdviceTable, Decision, Outcome, TriageEngine};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
