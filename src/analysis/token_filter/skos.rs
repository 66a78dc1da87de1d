//! SKOS expansion filter.
//!
//! For every upstream token the filter emits the token unchanged, then one
//! synthetic token per expansion label. Expansions copy the original's
//! position and offsets and carry a position increment of 0, so phrase and
//! span queries see them as alternatives at the same slot:
//!
//! ```text
//! upstream:  fox[16,19) +1   jumps[20,25) +1
//! output:    fox[16,19) +1   jumps[20,25) +1   hops[20,25) +0   leaps[20,25) +0
//! ```
//!
//! All expansions of one token are emitted before the next upstream token is
//! pulled.
//!
//! # Examples
//!
//! ```
//! use skos_analysis::analysis::token::Token;
//! use skos_analysis::analysis::token_filter::Filter;
//! use skos_analysis::skos::engine::EngineBuilder;
//! use skos_analysis::skos::vocabulary::Vocabulary;
//!
//! let vocabulary = Vocabulary::new()
//!     .pref_label("urn:jump", "jumps", None)
//!     .alt_label("urn:jump", "hops", None)
//!     .alt_label("urn:jump", "leaps", None);
//! let engine = EngineBuilder::new().build(&vocabulary).unwrap();
//!
//! let tokens = vec![Token::with_offsets("jumps", 0, 10, 15)];
//! let output: Vec<Token> = engine.filter().filter(Box::new(tokens.into_iter())).unwrap().collect();
//!
//! let texts: Vec<&str> = output.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(texts, vec!["jumps", "hops", "leaps"]);
//! assert!(output.iter().all(|t| t.start_offset == 10 && t.end_offset == 15));
//! assert_eq!(output[1].position_increment, 0);
//! ```

use std::sync::Arc;

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;
use crate::skos::engine::SkosEngine;
use crate::skos::label::same_label;

/// Token filter that stacks thesaurus expansions on each token.
#[derive(Clone, Debug)]
pub struct SkosFilter {
    engine: Arc<SkosEngine>,
}

impl SkosFilter {
    pub fn new(engine: Arc<SkosEngine>) -> Self {
        SkosFilter { engine }
    }

    pub fn engine(&self) -> &Arc<SkosEngine> {
        &self.engine
    }

    /// Wrap any token iterator in an expansion stream.
    pub fn expand_stream<I>(&self, tokens: I) -> SkosExpansionStream<I>
    where
        I: Iterator<Item = Token>,
    {
        SkosExpansionStream::new(tokens, Arc::clone(&self.engine))
    }
}

impl Filter for SkosFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(Box::new(self.expand_stream(tokens)))
    }

    fn name(&self) -> &'static str {
        "skos"
    }
}

enum ExpanderState {
    /// The next output is the next upstream token.
    AwaitingOriginal,
    /// Expansions of `original` remain to be emitted.
    EmittingExpansions {
        original: Token,
        pending: std::vec::IntoIter<String>,
    },
}

/// Pull-based expansion over an upstream token iterator.
pub struct SkosExpansionStream<I> {
    upstream: I,
    engine: Arc<SkosEngine>,
    state: ExpanderState,
}

impl<I> SkosExpansionStream<I>
where
    I: Iterator<Item = Token>,
{
    pub fn new(upstream: I, engine: Arc<SkosEngine>) -> Self {
        SkosExpansionStream {
            upstream,
            engine,
            state: ExpanderState::AwaitingOriginal,
        }
    }
}

impl<I> Iterator for SkosExpansionStream<I>
where
    I: Iterator<Item = Token>,
{
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if let ExpanderState::EmittingExpansions { original, pending } = &mut self.state {
            for label in pending.by_ref() {
                if !same_label(&label, &original.text) {
                    return Some(original.expansion(label));
                }
            }
            self.state = ExpanderState::AwaitingOriginal;
        }

        let token = self.upstream.next()?;
        let expansions = self.engine.expand(&token.text);
        if !expansions.is_empty() {
            self.state = ExpanderState::EmittingExpansions {
                original: token.clone(),
                pending: expansions.into_iter(),
            };
        }
        Some(token)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (upstream_min, _) = self.upstream.size_hint();
        (upstream_min, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::{IntoTokenStream, TokenType};
    use crate::skos::config::ExpansionMode;
    use crate::skos::engine::EngineBuilder;
    use crate::skos::vocabulary::Vocabulary;

    fn engine() -> Arc<SkosEngine> {
        let vocabulary = Vocabulary::new()
            .pref_label("urn:jump", "jumps", Some("en"))
            .alt_label("urn:jump", "hops", Some("en"))
            .alt_label("urn:jump", "leaps", Some("en"))
            .alt_label("urn:jump", "JUMPS", Some("en"))
            .pref_label("urn:fox", "fox", Some("en"))
            .alt_label("urn:fox", "Reynard", Some("en"));
        EngineBuilder::new().build(&vocabulary).unwrap()
    }

    fn stream(tokens: Vec<Token>) -> TokenStream {
        tokens.into_token_stream()
    }

    #[test]
    fn test_expansions_stack_on_original() {
        let filter = SkosFilter::new(engine());
        let tokens = vec![
            Token::with_offsets("the", 0, 0, 3),
            Token::with_offsets("jumps", 1, 10, 15),
        ];

        let output: Vec<Token> = filter.filter(stream(tokens)).unwrap().collect();
        let texts: Vec<&str> = output.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["the", "jumps", "hops", "leaps"]);

        assert_eq!(output[1].position_increment, 1);
        assert_eq!(output[1].token_type, TokenType::Word);
        for expansion in &output[2..] {
            assert_eq!(expansion.start_offset, 10);
            assert_eq!(expansion.end_offset, 15);
            assert_eq!(expansion.position, 1);
            assert_eq!(expansion.position_increment, 0);
            assert!(expansion.is_expansion());
        }
    }

    #[test]
    fn test_original_increment_is_preserved() {
        let filter = SkosFilter::new(engine());
        let tokens = vec![Token::with_offsets("fox", 3, 16, 19).with_position_increment(3)];

        let output: Vec<Token> = filter.filter(stream(tokens)).unwrap().collect();
        assert_eq!(output.len(), 2);
        assert_eq!(output[0].position_increment, 3);
        assert_eq!(output[1].text, "Reynard");
        assert_eq!(output[1].position_increment, 0);
    }

    #[test]
    fn test_groups_are_not_interleaved() {
        let filter = SkosFilter::new(engine());
        let tokens = vec![
            Token::with_offsets("fox", 0, 0, 3),
            Token::with_offsets("jumps", 1, 4, 9),
            Token::with_offsets("fox", 2, 10, 13),
        ];

        let output: Vec<Token> = filter.filter(stream(tokens)).unwrap().collect();
        let shape: Vec<(&str, usize, usize)> = output
            .iter()
            .map(|t| (t.text.as_str(), t.position_increment, t.start_offset))
            .collect();
        assert_eq!(
            shape,
            vec![
                ("fox", 1, 0),
                ("Reynard", 0, 0),
                ("jumps", 1, 4),
                ("hops", 0, 4),
                ("leaps", 0, 4),
                ("fox", 1, 10),
                ("Reynard", 0, 10),
            ]
        );
    }

    #[test]
    fn test_unknown_tokens_pass_through() {
        let filter = SkosFilter::new(engine());
        let tokens = vec![
            Token::with_offsets("quick", 0, 0, 5),
            Token::with_offsets("brown", 1, 6, 11).with_position_increment(2),
        ];

        let output: Vec<Token> = filter.filter(stream(tokens.clone())).unwrap().collect();
        assert_eq!(output, tokens);
    }

    #[test]
    fn test_case_variant_of_original_is_suppressed() {
        let filter = SkosFilter::new(engine());
        let tokens = vec![Token::with_offsets("Jumps", 0, 0, 5)];

        let output: Vec<Token> = filter.filter(stream(tokens)).unwrap().collect();
        let texts: Vec<&str> = output.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["Jumps", "hops", "leaps"]);
    }

    #[test]
    fn test_empty_stream() {
        let filter = SkosFilter::new(engine());
        assert_eq!(filter.filter(stream(Vec::new())).unwrap().count(), 0);
    }

    #[test]
    fn test_uri_mode_filter() {
        let vocabulary = Vocabulary::new()
            .pref_label("urn:c1", "weapons", None)
            .alt_label("urn:c1", "arms", None);
        let engine = EngineBuilder::new()
            .mode(ExpansionMode::Uri)
            .build(&vocabulary)
            .unwrap();

        let tokens = vec![Token::with_offsets("urn:c1", 0, 0, 6)];
        let texts: Vec<String> = engine
            .filter()
            .expand_stream(tokens.into_iter())
            .map(|t| t.text)
            .collect();
        assert_eq!(texts, vec!["urn:c1", "weapons", "arms"]);
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(SkosFilter::new(engine()).name(), "skos");
    }
}
