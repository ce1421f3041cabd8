//! Text analysis: normalization and tokenization of symptom descriptions.
//!
//! Raw input first passes through a [`normalizer::TextNormalizer`], a chain of
//! [`char_filter::CharFilter`]s that canonicalizes the string. The normalized
//! text is then split into [`token::Token`]s by an [`analyzer::Analyzer`].
//!
//! ```text
//! "High FEVER, cough!"  -> normalizer -> "high fever cough"
//! "high fever cough"    -> analyzer   -> ["high", "fever", "cough"]
//! ```

pub mod analyzer;
pub mod char_filter;
pub mod normalizer;
pub mod token;
pub mod tokenizer;

pub use analyzer::{Analyzer, SimpleAnalyzer};
pub use normalizer::{TextNormalizer, normalize};
pub use token::{Token, TokenStream};
pub use tokenizer::{Tokenizer, WhitespaceTokenizer};
