//! Text analysis module.
//!
//! Tokenizers, token filters and analyzers. The SKOS expansion filter lives
//! here next to the plain filters it is chained with.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
