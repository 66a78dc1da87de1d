//! Analyzers: a tokenizer followed by a chain of token filters.

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that turn raw text into a token stream.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod skos;

pub use skos::SkosAnalyzer;
