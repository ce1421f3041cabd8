//! TF-IDF vectorizer for text feature extraction.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use ahash::AHashMap;

use crate::analysis::analyzer::Analyzer;
use crate::error::{Result, TriageError};

/// TF-IDF vectorizer for text feature extraction.
///
/// Terms are indexed in sorted order, so the same corpus always yields the
/// same vocabulary. Weights use the smoothed inverse document frequency
/// `ln((1 + D) / (1 + df)) + 1` and every vector is L2-normalized.
#[derive(Clone)]
pub struct TfIdfVectorizer {
    /// Vocabulary: term -> index mapping.
    vocabulary: AHashMap<String, usize>,
    /// Index -> term, sorted.
    terms: Vec<String>,
    /// Inverse document frequency for each term.
    idf: Vec<f64>,
    /// Total number of documents seen during training.
    n_documents: usize,
    /// Analyzer for tokenization.
    analyzer: Arc<dyn Analyzer>,
}

impl std::fmt::Debug for TfIdfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfIdfVectorizer")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("n_documents", &self.n_documents)
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

impl TfIdfVectorizer {
    /// Create a new TF-IDF vectorizer with the specified analyzer.
    pub fn new(analyzer: Arc<dyn Analyzer>) -> Self {
        Self {
            vocabulary: AHashMap::new(),
            terms: Vec::new(),
            idf: Vec::new(),
            n_documents: 0,
            analyzer,
        }
    }

    /// Fit the vectorizer on normalized training documents.
    pub fn fit(&mut self, documents: &[String]) -> Result<()> {
        if documents.is_empty() {
            return Err(TriageError::EmptyCorpus);
        }

        // Count document frequencies; BTreeMap keeps terms sorted.
        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();
        for doc in documents {
            let unique_tokens: HashSet<String> = self.tokenize(doc)?.into_iter().collect();
            for token in unique_tokens {
                *document_frequency.entry(token).or_insert(0) += 1;
            }
        }

        if document_frequency.is_empty() {
            return Err(TriageError::EmptyVocabulary {
                documents: documents.len(),
            });
        }

        let n_documents = documents.len() as f64;
        let mut vocabulary = AHashMap::with_capacity(document_frequency.len());
        let mut terms = Vec::with_capacity(document_frequency.len());
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (idx, (term, df)) in document_frequency.into_iter().enumerate() {
            idf.push(((1.0 + n_documents) / (1.0 + df as f64)).ln() + 1.0);
            vocabulary.insert(term.clone(), idx);
            terms.push(term);
        }

        self.vocabulary = vocabulary;
        self.terms = terms;
        self.idf = idf;
        self.n_documents = documents.len();

        Ok(())
    }

    /// Fit on `documents` and return the weight vector of each one.
    pub fn fit_transform(&mut self, documents: &[String]) -> Result<Vec<Vec<f64>>> {
        self.fit(documents)?;
        documents.iter().map(|doc| self.transform(doc)).collect()
    }

    /// Transform a document into an L2-normalized TF-IDF vector.
    ///
    /// Tokens outside the vocabulary are ignored; a document with no known
    /// tokens yields the all-zero vector.
    pub fn transform(&self, document: &str) -> Result<Vec<f64>> {
        let mut weights = vec![0.0; self.vocabulary.len()];

        // Count term frequencies
        for token in self.tokenize(document)? {
            if let Some(&idx) = self.vocabulary.get(&token) {
                weights[idx] += 1.0;
            }
        }

        // Apply IDF
        for (weight, idf) in weights.iter_mut().zip(&self.idf) {
            *weight *= idf;
        }

        let norm = weights.iter().map(|w| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for weight in &mut weights {
                *weight /= norm;
            }
        }

        Ok(weights)
    }

    /// Tokenize a document using the configured analyzer.
    pub fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.analyzer.analyze(text)?.map(|token| token.text).collect())
    }

    /// Index of `term`, if it is in the vocabulary.
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Vocabulary terms in index order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// IDF weights in index order.
    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    /// Get the size of the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Number of documents the vectorizer was fitted on.
    pub fn n_documents(&self) -> usize {
        self.n_documents
    }
}
