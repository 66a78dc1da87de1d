//! Expansion resolver: token text to related labels.
//!
//! Resolution seeds a breadth-first walk with the concepts matched by the
//! token (by label or by URI, depending on the mode), emits the labels of
//! every concept reached level by level, and stops at the configured depth or
//! when a level discovers nothing new. A visited set of arena indices keeps
//! cyclic graphs from being revisited; it only grows with the concepts the
//! walk actually reaches.
//!
//! Output is deduplicated on normalized form, never contains the token itself,
//! and is ordered by level, then arena index order within the seed set,
//! then relation order, then label order. Equal inputs give equal output.

use ahash::AHashSet;

use crate::skos::concept::{Concept, ConceptIndex, RelationKind};
use crate::skos::config::{DepthOrigin, ExpansionConfig, ExpansionMode};
use crate::skos::label::normalize;
use crate::skos::store::ConceptStore;

/// A single expansion call.
#[derive(Debug, Clone, Copy)]
pub struct ExpansionRequest<'a> {
    pub token: &'a str,
    pub mode: ExpansionMode,
    pub max_depth: usize,
    pub relations: &'a [RelationKind],
    pub depth_origin: DepthOrigin,
    pub languages: Option<&'a [String]>,
}

impl<'a> ExpansionRequest<'a> {
    /// A request for `token` using the parameters of `config`.
    pub fn new(token: &'a str, config: &'a ExpansionConfig) -> Self {
        ExpansionRequest {
            token,
            mode: config.mode,
            max_depth: config.max_depth,
            relations: &config.relations,
            depth_origin: config.depth_origin,
            languages: config.languages.as_deref(),
        }
    }

    pub fn with_mode(mut self, mode: ExpansionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_relations(mut self, relations: &'a [RelationKind]) -> Self {
        self.relations = relations;
        self
    }
}

/// Borrowed view over a store and its expansion parameters.
#[derive(Debug, Clone, Copy)]
pub struct ExpansionResolver<'a> {
    store: &'a ConceptStore,
    config: &'a ExpansionConfig,
}

impl<'a> ExpansionResolver<'a> {
    pub fn new(store: &'a ConceptStore, config: &'a ExpansionConfig) -> Self {
        ExpansionResolver { store, config }
    }

    /// Expand a token with the configured parameters.
    pub fn expand(&self, token: &str) -> Vec<String> {
        self.expand_with(&ExpansionRequest::new(token, self.config))
    }

    /// Expand with explicit parameters.
    pub fn expand_with(&self, request: &ExpansionRequest<'_>) -> Vec<String> {
        let key = normalize(request.token);
        if key.is_empty() {
            return Vec::new();
        }

        let (seeds, own_label_depth): (&[ConceptIndex], usize) = match request.mode {
            ExpansionMode::Label => {
                let depth = match request.depth_origin {
                    DepthOrigin::SameConcept => 0,
                    DepthOrigin::LabelHop => 1,
                };
                (self.store.candidates(&key), depth)
            }
            ExpansionMode::Uri => {
                let Some(index) = self.store.index_of(request.token) else {
                    return Vec::new();
                };
                return self.walk(&[index], request.max_depth, request, &key);
            }
        };

        if seeds.is_empty() || own_label_depth > request.max_depth {
            return Vec::new();
        }
        self.walk(seeds, request.max_depth - own_label_depth, request, &key)
    }

    fn walk(
        &self,
        seeds: &[ConceptIndex],
        hops: usize,
        request: &ExpansionRequest<'_>,
        key: &str,
    ) -> Vec<String> {
        let mut collector = LabelCollector::new(key, request.languages);
        let mut visited: AHashSet<ConceptIndex> = AHashSet::with_capacity(seeds.len());
        let mut frontier: Vec<ConceptIndex> = Vec::with_capacity(seeds.len());

        for &seed in seeds {
            if (seed as usize) < self.store.len() && visited.insert(seed) {
                frontier.push(seed);
            }
        }
        self.collect_level(&frontier, &mut collector);

        for _ in 0..hops {
            let mut next = Vec::new();
            for &index in &frontier {
                let Some(concept) = self.store.concept(index) else {
                    continue;
                };
                for &kind in request.relations {
                    for &target in concept.relations(kind) {
                        if visited.insert(target) {
                            next.push(target);
                        }
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            self.collect_level(&next, &mut collector);
            frontier = next;
        }

        collector.into_labels()
    }

    fn collect_level(&self, level: &[ConceptIndex], collector: &mut LabelCollector<'_>) {
        for concept in level.iter().filter_map(|&index| self.store.concept(index)) {
            collector.collect(concept);
        }
    }
}

/// Accumulates labels, skipping repeats and the token itself.
struct LabelCollector<'a> {
    seen: AHashSet<String>,
    labels: Vec<String>,
    languages: Option<&'a [String]>,
}

impl<'a> LabelCollector<'a> {
    fn new(token_key: &str, languages: Option<&'a [String]>) -> Self {
        let mut seen = AHashSet::new();
        seen.insert(token_key.to_string());
        LabelCollector {
            seen,
            labels: Vec::new(),
            languages,
        }
    }

    fn collect(&mut self, concept: &Concept) {
        for label in concept.labels() {
            if !self.accepts_language(label.language.as_deref()) {
                continue;
            }
            if self.seen.insert(normalize(&label.value)) {
                self.labels.push(label.value.clone());
            }
        }
    }

    fn accepts_language(&self, language: Option<&str>) -> bool {
        match (self.languages, language) {
            (None, _) | (_, None) => true,
            (Some(languages), Some(language)) => languages
                .iter()
                .any(|accepted| accepted.eq_ignore_ascii_case(language)),
        }
    }

    fn into_labels(self) -> Vec<String> {
        self.labels
    }
}
