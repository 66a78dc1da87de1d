//! Whole-input tokenizer implementation.
//!
//! Used for fields that hold concept identifiers, where the field value is a
//! URI and must reach the expansion filter untouched.

use super::Tokenizer;

use crate::analysis::token::{Token, TokenStream, TokenType};
use crate::error::Result;

/// A tokenizer that treats the entire (trimmed) input as a single token.
#[derive(Clone, Debug, Default)]
pub struct WholeTokenizer;

impl WholeTokenizer {
    /// Create a new whole tokenizer.
    pub fn new() -> Self {
        WholeTokenizer
    }
}

impl Tokenizer for WholeTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(Box::new(std::iter::empty()));
        }

        let start = text.len() - text.trim_start().len();
        let token = Token::with_offsets(trimmed, 0, start, start + trimmed.len())
            .with_token_type(TokenType::Keyword);
        Ok(Box::new(std::iter::once(token)))
    }

    fn name(&self) -> &'static str {
        "whole"
    }
}
