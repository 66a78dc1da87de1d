//! # skos-analysis
//!
//! Thesaurus-backed term expansion for full-text analysis pipelines.
//!
//! ## Features
//!
//! - Load a SKOS concept graph from already-decoded statements
//! - Case- and whitespace-insensitive label lookup, URI lookup
//! - Breadth-first expansion over broader/narrower/related relations
//! - A token filter that stacks expansions at the original token's position
//! - Optional on-disk cache of loaded stores

pub mod analysis;
pub mod cli;
pub mod error;
pub mod skos;

pub mod prelude {
    pub use crate::analysis::analyzer::{Analyzer, SkosAnalyzer};
    pub use crate::analysis::token::{Token, TokenStream};
    pub use crate::analysis::token_filter::{Filter, SkosFilter};
    pub use crate::error::{Result, SkosError};
    pub use crate::skos::{
        EngineBuilder, EngineConfig, ExpansionMode, RelationKind, SharedEngine, SkosEngine,
        Vocabulary, VocabularySource,
    };
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
