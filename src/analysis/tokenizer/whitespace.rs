//! Whitespace tokenizer implementation.

use super::Tokenizer;

use crate::analysis::token::{Token, TokenStream};
use crate::error::Result;

/// A tokenizer that splits text on whitespace.
#[derive(Clone, Debug, Default)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    /// Create a new whitespace tokenizer.
    pub fn new() -> Self {
        WhitespaceTokenizer
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = Vec::new();
        let mut start: Option<usize> = None;

        for (offset, ch) in text.char_indices() {
            if ch.is_whitespace() {
                if let Some(word_start) = start.take() {
                    tokens.push(Token::with_offsets(
                        &text[word_start..offset],
                        tokens.len(),
                        word_start,
                        offset,
                    ));
                }
            } else if start.is_none() {
                start = Some(offset);
            }
        }

        if let Some(word_start) = start {
            tokens.push(Token::with_offsets(
                &text[word_start..],
                tokens.len(),
                word_start,
                text.len(),
            ));
        }

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_tokenizer() {
        let tokenizer = WhitespaceTokenizer::new();
        let tokens: Vec<Token> = tokenizer.tokenize("hello  world\ttest").unwrap().collect();

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].text, "hello");
        assert_eq!(tokens[1].text, "world");
        assert_eq!(tokens[2].text, "test");
        assert_eq!(tokens[2].position, 2);
    }

    #[test]
    fn test_repeated_words_have_distinct_offsets() {
        let tokenizer = WhitespaceTokenizer::new();
        let tokens: Vec<Token> = tokenizer.tokenize("pain in pain").unwrap().collect();

        assert_eq!(tokens[0].start_offset, 0);
        assert_eq!(tokens[2].start_offset, 8);
        assert_eq!(tokens[2].end_offset, 12);
    }

    #[test]
    fn test_empty_and_blank_input() {
        let tokenizer = WhitespaceTokenizer::new();
        assert_eq!(tokenizer.tokenize("").unwrap().count(), 0);
        assert_eq!(tokenizer.tokenize(" \n\t ").unwrap().count(), 0);
    }

    #[test]
    fn test_tokenizer_name() {
        assert_eq!(WhitespaceTokenizer::new().name(), "whitespace");
    }
}
