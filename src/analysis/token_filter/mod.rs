//! Token filter implementations for token transformation.
//!
//! Filters take a token stream and produce a new one. They can rewrite tokens
//! (lowercasing) or stack synthetic tokens on existing positions (thesaurus
//! expansion).
//!
//! ```text
//! Tokenizer → Lowercase → SKOS expansion → Index
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
///
/// The trait requires `Send + Sync` so one filter instance can serve many
/// concurrently analyzed documents.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod lowercase;
pub mod skos;

pub use lowercase::LowercaseFilter;
pub use skos::{SkosExpansionStream, SkosFilter};
