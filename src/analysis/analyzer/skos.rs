//! Ready-made analyzer chains around the SKOS expansion filter.
//!
//! The chain depends on the engine's expansion mode:
//!
//! ```text
//! label: UnicodeWordTokenizer → LowercaseFilter → SkosFilter
//! uri:   WholeTokenizer       → SkosFilter      → LowercaseFilter
//! ```
//!
//! Label fields are lowercased before lookup so that indexed originals match
//! lowercased queries. URI fields must reach the filter verbatim (URIs are
//! case-sensitive) and only the emitted labels are lowercased.
//!
//! # Examples
//!
//! ```
//! use skos_analysis::analysis::analyzer::Analyzer;
//! use skos_analysis::skos::engine::EngineBuilder;
//! use skos_analysis::skos::vocabulary::Vocabulary;
//!
//! let vocabulary = Vocabulary::new()
//!     .pref_label("urn:jump", "jumps", None)
//!     .alt_label("urn:jump", "hops", None)
//!     .alt_label("urn:jump", "leaps", None);
//! let engine = EngineBuilder::new().build(&vocabulary).unwrap();
//!
//! let tokens: Vec<_> = engine.analyzer().analyze("The fox JUMPS").unwrap().collect();
//! let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(texts, vec!["the", "fox", "jumps", "hops", "leaps"]);
//! ```

use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::{Filter, LowercaseFilter, SkosFilter};
use crate::analysis::tokenizer::{Tokenizer, UnicodeWordTokenizer, WholeTokenizer};
use crate::error::Result;
use crate::skos::config::ExpansionMode;
use crate::skos::engine::SkosEngine;

/// Tokenizer plus filter chain for one expansion mode.
#[derive(Clone)]
pub struct SkosAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    filters: Vec<Arc<dyn Filter>>,
    mode: ExpansionMode,
}

impl std::fmt::Debug for SkosAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkosAnalyzer")
            .field("tokenizer", &self.tokenizer.name())
            .field(
                "filters",
                &self.filters.iter().map(|filter| filter.name()).collect::<Vec<_>>(),
            )
            .field("mode", &self.mode)
            .finish()
    }
}

impl SkosAnalyzer {
    /// Build the chain matching the engine's mode.
    pub fn new(engine: Arc<SkosEngine>) -> Self {
        let mode = engine.config().mode;
        let skos: Arc<dyn Filter> = Arc::new(SkosFilter::new(engine));
        let lowercase: Arc<dyn Filter> = Arc::new(LowercaseFilter::new());

        match mode {
            ExpansionMode::Label => SkosAnalyzer {
                tokenizer: Arc::new(UnicodeWordTokenizer::new()),
                filters: vec![lowercase, skos],
                mode,
            },
            ExpansionMode::Uri => SkosAnalyzer {
                tokenizer: Arc::new(WholeTokenizer::new()),
                filters: vec![skos, lowercase],
                mode,
            },
        }
    }

    pub fn mode(&self) -> ExpansionMode {
        self.mode
    }

    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    pub fn filters(&self) -> &[Arc<dyn Filter>] {
        &self.filters
    }
}

impl Analyzer for SkosAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = self.tokenizer.tokenize(text)?;
        for filter in &self.filters {
            tokens = filter.filter(tokens)?;
        }
        Ok(tokens)
    }

    fn name(&self) -> &'static str {
        match self.mode {
            ExpansionMode::Label => "skos_label",
            ExpansionMode::Uri => "skos_uri",
        }
    }
}
