//! Token types for the analysis pipeline.
//!
//! A [`Token`] is the unit that flows between a tokenizer, the token filters
//! and whatever consumes the stream (an indexer or a query parser).
//!
//! # Positions
//!
//! Every token carries a `position_increment` relative to the previously
//! emitted token. Thesaurus expansions are stacked on the slot of the token
//! they were derived from:
//!
//! ```text
//! Input: "fox jumps"
//!
//!   Position 0: "fox"   (pos_inc=1)
//!   Position 1: "jumps" (pos_inc=1)
//!   Position 1: "hops"  (pos_inc=0)  <- same slot, same offsets as "jumps"
//!   Position 1: "leaps" (pos_inc=0)
//! ```
//!
//! # Examples
//!
//! ```
//! use skos_analysis::analysis::token::Token;
//!
//! let token = Token::with_offsets("jumps", 4, 20, 25);
//! assert_eq!(token.text, "jumps");
//! assert_eq!(token.start_offset, 20);
//! assert_eq!(token.end_offset, 25);
//! assert_eq!(token.position_increment, 1);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single unit of text after tokenization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// The absolute position of the token in the stream (0-based)
    pub position: usize,

    /// The byte offset where this token starts in the original text
    pub start_offset: usize,

    /// The byte offset where this token ends in the original text
    pub end_offset: usize,

    /// Position increment from the previous token (default: 1).
    ///
    /// - 1: next slot
    /// - 0: same slot as the previous token (synonyms, expansions)
    /// - >1: skipped slots (e.g. removed stop words upstream)
    pub position_increment: usize,

    /// Where the token came from.
    pub token_type: TokenType,
}

/// Classification of a token's origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenType {
    /// Produced by a tokenizer from the input text
    #[default]
    Word,
    /// Produced by the whole-input tokenizer (ids, URIs)
    Keyword,
    /// Synthetic label emitted by the thesaurus expansion filter
    Expansion,
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token::with_offsets(text, position, 0, 0)
    }

    /// Create a new token with text, position, and byte offsets.
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
            position_increment: 1,
            token_type: TokenType::Word,
        }
    }

    /// Get the length of the token text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Set the position increment.
    pub fn with_position_increment(mut self, increment: usize) -> Self {
        self.position_increment = increment;
        self
    }

    /// Set the token type.
    pub fn with_token_type(mut self, token_type: TokenType) -> Self {
        self.token_type = token_type;
        self
    }

    /// Build the synthetic token stacked on this one for an expansion label.
    ///
    /// The result shares position and offsets and has a position increment of 0.
    pub fn expansion<S: Into<String>>(&self, text: S) -> Self {
        Token {
            text: text.into(),
            position: self.position,
            start_offset: self.start_offset,
            end_offset: self.end_offset,
            position_increment: 0,
            token_type: TokenType::Expansion,
        }
    }

    /// Whether this token is a synthetic thesaurus expansion.
    pub fn is_expansion(&self) -> bool {
        self.token_type == TokenType::Expansion
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A token stream represents a sequence of tokens from the analysis pipeline.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;

/// Trait for types that can produce a token stream.
pub trait IntoTokenStream {
    /// Convert this type into a token stream.
    fn into_token_stream(self) -> TokenStream;
}

impl IntoTokenStream for Vec<Token> {
    fn into_token_stream(self) -> TokenStream {
        Box::new(self.into_iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_creation() {
        let token = Token::new("hello", 0);
        assert_eq!(token.text, "hello");
        assert_eq!(token.position, 0);
        assert_eq!(token.start_offset, 0);
        assert_eq!(token.end_offset, 0);
        assert_eq!(token.position_increment, 1);
        assert_eq!(token.token_type, TokenType::Word);
    }

    #[test]
    fn test_expansion_token_shares_slot() {
        let original = Token::with_offsets("jumps", 4, 10, 15).with_position_increment(2);
        let expansion = original.expansion("hops");

        assert_eq!(expansion.text, "hops");
        assert_eq!(expansion.position, 4);
        assert_eq!(expansion.start_offset, 10);
        assert_eq!(expansion.end_offset, 15);
        assert_eq!(expansion.position_increment, 0);
        assert!(expansion.is_expansion());
        assert!(!original.is_expansion());
    }

    #[test]
    fn test_token_display() {
        let token = Token::new("hello", 0);
        assert_eq!(format!("{token}"), "hello");
    }

    #[test]
    fn test_token_stream() {
        let tokens = vec![Token::new("hello", 0), Token::new("world", 1)];

        let collected: Vec<_> = tokens.into_token_stream().collect();

        assert_eq!(collected.len(), 2);
        assert_eq!(collected[0].text, "hello");
        assert_eq!(collected[1].text, "world");
    }
}
