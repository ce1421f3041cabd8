//! Statistical text classification.
//!
//! - [`tfidf::TfIdfVectorizer`] builds the vocabulary and turns text into
//!   L2-normalized TF-IDF weight vectors.
//! - [`naive_bayes::MultinomialNaiveBayes`] scores weight vectors against each
//!   label and returns a posterior distribution.
//! - [`ml_classifier::NaiveBayesTextClassifier`] wires normalization,
//!   weighting and scoring together behind the [`classifier::SymptomClassifier`]
//!   trait.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use symptom_triage::analysis::SimpleAnalyzer;
//! use symptom_triage::config::ModelConfig;
//! use symptom_triage::ml::{NaiveBayesTextClassifier, SymptomClassifier, TrainingExample};
//!
//! # fn main() -> symptom_triage::error::Result<()> {
//! let examples = vec![
//!     TrainingExample::new("runny nose, sneezing", "Common Cold"),
//!     TrainingExample::new("chest pain, shortness of breath", "Emergency"),
//! ];
//!
//! let classifier = NaiveBayesTextClassifier::train(
//!     &examples,
//!     Arc::new(SimpleAnalyzer::whitespace()),
//!     &ModelConfig::default(),
//! )?;
//!
//! let prediction = classifier.predict("sneezing and a runny nose")?;
//! assert_eq!(prediction.label, "Common Cold");
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod ml_classifier;
pub mod naive_bayes;
pub mod tfidf;
pub mod types;

pub use classifier::SymptomClassifier;
pub use ml_classifier::NaiveBayesTextClassifier;
pub use naive_bayes::MultinomialNaiveBayes;
pub use tfidf::TfIdfVectorizer;
pub use types::{
    ClassProbability, PredictionResult, ProbabilityDistribution, TermWeight, TrainingExample,
};
