//! Lowercase filter implementation.
//!
//! # Examples
//!
//! ```
//! use skos_analysis::analysis::token_filter::Filter;
//! use skos_analysis::analysis::token_filter::lowercase::LowercaseFilter;
//! use skos_analysis::analysis::token::Token;
//!
//! let filter = LowercaseFilter::new();
//! let tokens = vec![Token::new("The", 0), Token::new("QUICK", 1)];
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(result[0].text, "the");
//! assert_eq!(result[1].text, "quick");
//! ```

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that converts token text to lowercase.
///
/// Positions, offsets and token types are left untouched.
#[derive(Clone, Debug, Default)]
pub struct LowercaseFilter;

impl LowercaseFilter {
    /// Create a new lowercase filter.
    pub fn new() -> Self {
        LowercaseFilter
    }
}

impl Filter for LowercaseFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(Box::new(tokens.map(|mut token| {
            if token.text.chars().any(char::is_uppercase) {
                token.text = token.text.to_lowercase();
            }
            token
        })))
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::{Token, TokenType};

    #[test]
    fn test_lowercase_filter() {
        let filter = LowercaseFilter::new();
        let tokens = vec![
            Token::with_offsets("Hello", 0, 0, 5),
            Token::new("WORLD", 1).with_position_increment(0),
            Token::new("Waffen", 1).with_token_type(TokenType::Expansion),
        ];

        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].text, "hello");
        assert_eq!(result[0].end_offset, 5);
        assert_eq!(result[1].text, "world");
        assert_eq!(result[1].position_increment, 0);
        assert_eq!(result[2].text, "waffen");
        assert!(result[2].is_expansion());
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(LowercaseFilter::new().name(), "lowercase");
    }
}
