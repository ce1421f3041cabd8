//! TF-IDF + multinomial Naive Bayes text classifier.

use std::sync::Arc;

use log::info;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::normalizer::TextNormalizer;
use crate::config::ModelConfig;
use crate::error::Result;

use super::classifier::SymptomClassifier;
use super::naive_bayes::MultinomialNaiveBayes;
use super::tfidf::TfIdfVectorizer;
use super::types::{ProbabilityDistribution, TermWeight, TrainingExample};

/// Text classifier built from a normalizer, a TF-IDF vectorizer and a
/// multinomial Naive Bayes model.
///
/// Input text is normalized before it is weighted, so callers may pass raw
/// or already normalized text.
#[derive(Debug, Clone)]
pub struct NaiveBayesTextClassifier {
    normalizer: TextNormalizer,
    vectorizer: TfIdfVectorizer,
    model: MultinomialNaiveBayes,
}

impl NaiveBayesTextClassifier {
    /// Train a classifier from labeled examples.
    pub fn train(
        examples: &[TrainingExample],
        analyzer: Arc<dyn Analyzer>,
        config: &ModelConfig,
    ) -> Result<Self> {
        let normalizer = TextNormalizer::new();

        let documents: Vec<String> = examples
            .iter()
            .map(|example| normalizer.normalize(&example.text))
            .collect();
        let labels: Vec<String> = examples
            .iter()
            .map(|example| example.label.clone())
            .collect();

        let mut vectorizer = TfIdfVectorizer::new(analyzer);
        let vectors = vectorizer.fit_transform(&documents)?;

        let mut model = MultinomialNaiveBayes::new(config.smoothing_alpha)?;
        model.fit_with_classes(&vectors, &labels, &config.labels)?;

        info!(
            "Trained naive bayes classifier: {} documents, {} terms, {} labels",
            vectorizer.n_documents(),
            vectorizer.vocabulary_size(),
            model.classes().len()
        );

        Ok(Self {
            normalizer,
            vectorizer,
            model,
        })
    }

    /// Weight vector for `text` after normalization.
    pub fn features(&self, text: &str) -> Result<Vec<f64>> {
        self.vectorizer
            .transform(&self.normalizer.normalize(text))
    }

    /// The fitted vectorizer.
    pub fn vectorizer(&self) -> &TfIdfVectorizer {
        &self.vectorizer
    }

    /// The fitted Naive Bayes model.
    pub fn model(&self) -> &MultinomialNaiveBayes {
        &self.model
    }
}

impl SymptomClassifier for NaiveBayesTextClassifier {
    fn predict_distribution(&self, text: &str) -> Result<ProbabilityDistribution> {
        let features = self.features(text)?;
        Ok(self.model.predict_distribution(&features))
    }

    fn labels(&self) -> &[String] {
        self.model.classes()
    }

    fn term_weights(&self, text: &str) -> Result<Vec<TermWeight>> {
        let features = self.features(text)?;
        Ok(self
            .vectorizer
            .terms()
            .iter()
            .zip(features)
            .filter(|(_, weight)| *weight > 0.0)
            .map(|(term, weight)| TermWeight {
                term: term.clone(),
                weight,
            })
            .collect())
    }

    fn vocabulary_size(&self) -> usize {
        self.vectorizer.vocabulary_size()
    }

    fn prior(&self, label: &str) -> Option<f64> {
        self.model.class_prior(label)
    }

    fn name(&self) -> &str {
        "tfidf_naive_bayes"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::SimpleAnalyzer;
    use crate::dataset::Dataset;
    use crate::error::TriageError;

    fn reference_classifier(alpha: f64) -> NaiveBayesTextClassifier {
        let config = ModelConfig {
            smoothing_alpha: alpha,
            ..ModelConfig::default()
        };
        NaiveBayesTextClassifier::train(
            &Dataset::reference().examples(),
            Arc::new(SimpleAnalyzer::whitespace()),
            &config,
        )
        .unwrap()
    }

    #[test]
    fn test_vocabulary_matches_distinct_tokens() {
        let classifier = reference_classifier(0.1);
        let normalizer = TextNormalizer::new();
        let mut distinct = std::collections::BTreeSet::new();
        for example in Dataset::reference().examples() {
            for token in normalizer.normalize(&example.text).split_whitespace() {
                distinct.insert(token.to_string());
            }
        }
        assert_eq!(classifier.vectorizer().vocabulary_size(), distinct.len());
        assert_eq!(classifier.vectorizer().vocabulary_size(), 84);
    }

    #[test]
    fn test_labels_sorted() {
        let classifier = reference_classifier(0.1);
        let labels = classifier.labels();
        assert_eq!(labels.len(), 12);
        assert!(labels.windows(2).all(|w| w[0] < w[1]));
        assert!(labels.contains(&"Emergency".to_string()));
    }

    #[test]
    fn test_every_training_record_predicts_its_label() {
        let classifier = reference_classifier(0.1);
        for example in Dataset::reference().examples() {
            let prediction = classifier.predict(&example.text).unwrap();
            assert_eq!(prediction.label, example.label, "text: {}", example.text);
            assert!(prediction.confidence >= 0.55, "text: {}", example.text);
        }
    }

    #[test]
    fn test_reference_alpha_is_prior_dominated() {
        // With alpha = 1 the four Emergency records outweigh the evidence.
        let classifier = reference_classifier(1.0);
        let prediction = classifier
            .predict("high fever, severe cough, body aches, chills, fatigue")
            .unwrap();
        assert_eq!(prediction.label, "Emergency");
        assert!(prediction.confidence < 0.55);
    }

    #[test]
    fn test_empty_and_oov_input_yield_priors() {
        let classifier = reference_classifier(0.1);
        for text in ["", "xyzabc qqq"] {
            let dist = classifier.predict_distribution(text).unwrap();
            assert!((dist.total() - 1.0).abs() < 1e-6);
            assert!((dist.probability("Emergency").unwrap() - 4.0 / 15.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_conditionals_sum_to_one() {
        let classifier = reference_classifier(0.1);
        for label in classifier.labels() {
            let sum: f64 = classifier
                .model()
                .conditional_probabilities(label)
                .unwrap()
                .iter()
                .sum();
            assert!((sum - 1.0).abs() < 1e-6, "label {label}");
        }
    }

    #[test]
    fn test_term_weights() {
        let classifier = reference_classifier(0.1);
        let weights = classifier
            .term_weights("Chest pain and xyz, chest!")
            .unwrap();
        let terms: Vec<&str> = weights.iter().map(|w| w.term.as_str()).collect();
        assert_eq!(terms, vec!["chest", "pain"]);
        let norm: f64 = weights.iter().map(|w| w.weight * w.weight).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-12);

        assert!(classifier.term_weights("xyz").unwrap().is_empty());
        assert_eq!(classifier.vocabulary_size(), 84);
        assert!((classifier.prior("Emergency").unwrap() - 4.0 / 15.0).abs() < 1e-12);
    }

    #[test]
    fn test_training_errors() {
        let analyzer: Arc<dyn Analyzer> = Arc::new(SimpleAnalyzer::whitespace());
        let err = NaiveBayesTextClassifier::train(&[], analyzer.clone(), &ModelConfig::default())
            .unwrap_err();
        assert!(matches!(err, TriageError::EmptyCorpus));

        let examples = vec![TrainingExample::new("123 !!!", "Flu")];
        let err = NaiveBayesTextClassifier::train(&examples, analyzer, &ModelConfig::default())
            .unwrap_err();
        assert!(matches!(err, TriageError::EmptyVocabulary { documents: 1 }));
    }
}
