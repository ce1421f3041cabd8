//! Token types for text analysis.
//!
//! ```
//! use symptom_triage::analysis::token::Token;
//!
//! let token = Token::with_offsets("fever", 1, 5, 10);
//! assert_eq!(token.text, "fever");
//! assert_eq!(token.position, 1);
//! assert_eq!(token.len(), 5);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single unit of text produced by a tokenizer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// The position of the token in the token stream (0-based)
    pub position: usize,

    /// The byte offset where this token starts in the analyzed text
    pub start_offset: usize,

    /// The byte offset where this token ends in the analyzed text
    pub end_offset: usize,
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset: 0,
            end_offset: 0,
        }
    }

    /// Create a new token with explicit byte offsets.
    pub fn with_offsets<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset,
            end_offset,
        }
    }

    /// Length of the token text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether the token text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A stream of tokens, typically produced by a tokenizer or analyzer.
pub type TokenStream = Box<dyn Iterator<Item = Token> + Send>;
