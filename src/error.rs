//! Error types for the triage library.
//!
//! All fallible operations return [`Result`], whose error type is
//! [`TriageError`]. Errors only arise while setting up an engine (loading a
//! dataset or configuration, fitting the model); classifying a query never
//! fails.
//!
//! # Examples
//!
//! ```
//! use symptom_triage::error::{Result, TriageError};
//!
//! fn check_threshold(threshold: f64) -> Result<()> {
//!     if !(0.0..=1.0).contains(&threshold) {
//!         return Err(TriageError::config("threshold must lie in [0, 1]"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_threshold(1.5).is_err());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for triage operations.
#[derive(Error, Debug)]
pub enum TriageError {
    /// I/O errors (reading dataset or configuration files).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Analysis-related errors (char filters, tokenization)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// The training corpus contained no examples.
    #[error("Training corpus is empty")]
    EmptyCorpus,

    /// A declared label has no training examples.
    #[error("Label '{0}' has no training examples")]
    MissingLabel(String),

    /// Normalizing the training texts produced no tokens at all.
    #[error("Vocabulary is empty after normalizing {documents} training documents")]
    EmptyVocabulary { documents: usize },

    /// Model fitting errors (shape mismatches, invalid parameters)
    #[error("Model error: {0}")]
    Model(String),

    /// Invalid configuration values
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for operations that may fail with TriageError.
pub type Result<T> = std::result::Result<T, TriageError>;

impl TriageError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        TriageError::Analysis(msg.into())
    }

    /// Create a new model error.
    pub fn model<S: Into<String>>(msg: S) -> Self {
        TriageError::Model(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        TriageError::Config(msg.into())
    }

    /// Whether this error was raised while building a model, as opposed to
    /// reading input files.
    pub fn is_setup_error(&self) -> bool {
        matches!(
            self,
            TriageError::EmptyCorpus
                | TriageError::MissingLabel(_)
                | TriageError::EmptyVocabulary { .. }
                | TriageError::Model(_)
                | TriageError::Config(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = TriageError::model("vector length mismatch");
        assert_eq!(error.to_string(), "Model error: vector length mismatch");

        let error = TriageError::config("bad threshold");
        assert_eq!(error.to_string(), "Configuration error: bad threshold");

        let error = TriageError::MissingLabel("Flu".to_string());
        assert_eq!(error.to_string(), "Label 'Flu' has no training examples");

        let error = TriageError::EmptyVocabulary { documents: 3 };
        assert_eq!(
            error.to_string(),
            "Vocabulary is empty after normalizing 3 training documents"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let triage_error = TriageError::from(io_error);

        match triage_error {
            TriageError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
        assert!(!TriageError::Json(serde_json::from_str::<u8>("x").unwrap_err()).is_setup_error());
        assert!(TriageError::EmptyCorpus.is_setup_error());
    }
}
