//! Tokenizer implementations for text analysis.
//!
//! ```
//! use symptom_triage::analysis::tokenizer::{Tokenizer, WhitespaceTokenizer};
//!
//! let tokenizer = WhitespaceTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("sore throat").unwrap().collect();
//! assert_eq!(tokens.len(), 2);
//! ```

pub mod whitespace;

pub use whitespace::WhitespaceTokenizer;

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so a trained model holding a tokenizer can
/// be shared between threads.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}
