//! Engine builder and the shared, immutable expansion engine.
//!
//! An engine is a concept store plus validated expansion parameters. It is
//! built once, wrapped in an `Arc`, and shared by every token filter and
//! analyzer that needs it; nothing in it changes after `build` returns.
//!
//! # Examples
//!
//! ```
//! use skos_analysis::skos::config::ExpansionMode;
//! use skos_analysis::skos::engine::EngineBuilder;
//! use skos_analysis::skos::vocabulary::Vocabulary;
//!
//! let vocabulary = Vocabulary::new()
//!     .pref_label("urn:c1", "weapons", Some("en"))
//!     .alt_label("urn:c1", "arms", Some("en"))
//!     .alt_label("urn:c1", "military equipment", Some("en"));
//!
//! let engine = EngineBuilder::new()
//!     .mode(ExpansionMode::Label)
//!     .max_depth(0)
//!     .build(&vocabulary)
//!     .unwrap();
//!
//! assert_eq!(engine.expand("weapons"), vec!["arms", "military equipment"]);
//! assert!(engine.expand("spoons").is_empty());
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use log::{info, warn};
use parking_lot::RwLock;

use crate::analysis::analyzer::SkosAnalyzer;
use crate::analysis::token_filter::SkosFilter;
use crate::error::Result;
use crate::skos::cache::StoreCache;
use crate::skos::concept::{Concept, RelationKind};
use crate::skos::config::{DepthOrigin, EngineConfig, ExpansionConfig, ExpansionMode};
use crate::skos::resolver::{ExpansionRequest, ExpansionResolver};
use crate::skos::store::ConceptStore;
use crate::skos::vocabulary::VocabularySource;

/// Immutable bundle of a concept store and expansion parameters.
#[derive(Debug, Clone)]
pub struct SkosEngine {
    store: Arc<ConceptStore>,
    config: ExpansionConfig,
    fingerprint: Option<u64>,
}

impl SkosEngine {
    /// Start building an engine.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// A new engine sharing this engine's store with different parameters.
    pub fn reconfigure(&self, config: &EngineConfig) -> Result<Self> {
        Ok(SkosEngine {
            store: Arc::clone(&self.store),
            config: config.validate()?,
            fingerprint: self.fingerprint,
        })
    }

    pub fn store(&self) -> &ConceptStore {
        &self.store
    }

    pub fn config(&self) -> &ExpansionConfig {
        &self.config
    }

    /// Fingerprint of the source, when a cache directory was configured.
    pub fn fingerprint(&self) -> Option<u64> {
        self.fingerprint
    }

    pub fn resolver(&self) -> ExpansionResolver<'_> {
        ExpansionResolver::new(&self.store, &self.config)
    }

    /// Expand a token with the engine's parameters.
    pub fn expand(&self, token: &str) -> Vec<String> {
        self.resolver().expand(token)
    }

    /// Expand with per-call parameters.
    pub fn expand_with(&self, request: &ExpansionRequest<'_>) -> Vec<String> {
        self.resolver().expand_with(request)
    }

    /// A request pre-filled with the engine's parameters.
    pub fn request<'a>(&'a self, token: &'a str) -> ExpansionRequest<'a> {
        ExpansionRequest::new(token, &self.config)
    }

    pub fn lookup_by_id(&self, id: &str) -> Option<&Concept> {
        self.store.lookup_by_id(id)
    }

    pub fn lookup_by_label(&self, label: &str) -> Vec<&str> {
        self.store.lookup_by_label(label)
    }

    /// A token filter expanding against this engine.
    pub fn filter(self: &Arc<Self>) -> SkosFilter {
        SkosFilter::new(Arc::clone(self))
    }

    /// The stock analyzer chain for this engine's mode.
    pub fn analyzer(self: &Arc<Self>) -> SkosAnalyzer {
        SkosAnalyzer::new(Arc::clone(self))
    }
}

/// Builder for [`SkosEngine`].
#[derive(Debug, Clone, Default)]
pub struct EngineBuilder {
    config: EngineConfig,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: EngineConfig) -> Self {
        EngineBuilder { config }
    }

    pub fn mode(mut self, mode: ExpansionMode) -> Self {
        self.config.mode = mode;
        self
    }

    pub fn max_depth(mut self, max_depth: i64) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    pub fn relations<I>(mut self, relations: I) -> Self
    where
        I: IntoIterator<Item = RelationKind>,
    {
        self.config.relations = relations.into_iter().collect();
        self
    }

    pub fn depth_origin(mut self, depth_origin: DepthOrigin) -> Self {
        self.config.depth_origin = depth_origin;
        self
    }

    pub fn languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.languages = Some(languages.into_iter().map(Into::into).collect());
        self
    }

    pub fn cache_dir<P: Into<PathBuf>>(mut self, cache_dir: P) -> Self {
        self.config.cache_dir = Some(cache_dir.into());
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validate the configuration, load the source and return the shared engine.
    ///
    /// Configuration is checked before the source is touched. The cache, when
    /// configured, is consulted and refreshed on a best-effort basis.
    pub fn build<S>(&self, source: &S) -> Result<Arc<SkosEngine>>
    where
        S: VocabularySource + ?Sized,
    {
        let config = self.config.validate()?;

        let cache = self.config.cache_dir.as_ref().map(StoreCache::new);
        let fingerprint = match &cache {
            Some(_) => match source.fingerprint() {
                Ok(fingerprint) => Some(fingerprint),
                Err(e) => {
                    warn!("Cannot fingerprint {}; skipping store cache: {e}", source.describe());
                    None
                }
            },
            None => None,
        };

        let cached = match (&cache, fingerprint) {
            (Some(cache), Some(fingerprint)) => cache.read(fingerprint),
            _ => None,
        };

        let store = match cached {
            Some(store) => {
                info!(
                    "Restored {} concepts for {} from store cache",
                    store.len(),
                    source.describe()
                );
                store
            }
            None => {
                let store = ConceptStore::load(source)?;
                if let (Some(cache), Some(fingerprint)) = (&cache, fingerprint) {
                    if let Err(e) = cache.write(fingerprint, &store) {
                        warn!("Failed to write store cache in {}: {e}", cache.dir().display());
                    }
                }
                store
            }
        };

        Ok(Arc::new(SkosEngine {
            store: Arc::new(store),
            config,
            fingerprint,
        }))
    }
}

/// The current engine of a long-lived component, replaced wholesale on reload.
///
/// Readers clone the `Arc` and keep using it for as long as they like; a
/// replacement never affects streams that already hold the previous engine.
#[derive(Debug)]
pub struct SharedEngine {
    current: RwLock<Arc<SkosEngine>>,
}

impl SharedEngine {
    pub fn new(engine: Arc<SkosEngine>) -> Self {
        SharedEngine {
            current: RwLock::new(engine),
        }
    }

    /// The engine in effect right now.
    pub fn current(&self) -> Arc<SkosEngine> {
        Arc::clone(&self.current.read())
    }

    /// Swap in a new engine, returning the previous one.
    pub fn replace(&self, engine: Arc<SkosEngine>) -> Arc<SkosEngine> {
        std::mem::replace(&mut *self.current.write(), engine)
    }

    /// Build a new engine and swap it in. On failure the current engine stays.
    pub fn rebuild<S>(&self, builder: &EngineBuilder, source: &S) -> Result<Arc<SkosEngine>>
    where
        S: VocabularySource + ?Sized,
    {
        let engine = builder.build(source)?;
        self.replace(Arc::clone(&engine));
        Ok(engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skos::vocabulary::Vocabulary;

    fn vocabulary() -> Vocabulary {
        Vocabulary::new()
            .pref_label("urn:c1", "weapons", Some("en"))
            .alt_label("urn:c1", "arms", Some("en"))
            .alt_label("urn:c1", "military equipment", Some("en"))
            .broader("urn:c1", "urn:c0")
            .pref_label("urn:c0", "equipment", Some("en"))
    }

    #[test]
    fn test_build_and_expand() {
        let engine = EngineBuilder::new().build(&vocabulary()).unwrap();

        assert_eq!(engine.expand("weapons"), vec!["arms", "military equipment"]);
        assert_eq!(engine.lookup_by_label("Weapons"), vec!["urn:c1"]);
        assert_eq!(
            engine.lookup_by_id("urn:c0").unwrap().preferred_label(Some("en")),
            Some("equipment")
        );
        assert!(engine.fingerprint().is_none());
    }

    #[test]
    fn test_configuration_errors_before_load() {
        struct Untouchable;
        impl VocabularySource for Untouchable {
            fn statements(&self) -> Result<crate::skos::vocabulary::StatementIter<'_>> {
                panic!("source must not be read when the configuration is invalid");
            }
        }

        let err = EngineBuilder::new().max_depth(-1).build(&Untouchable).unwrap_err();
        assert!(err.is_configuration());

        let err = EngineBuilder::new()
            .max_depth(1)
            .relations([])
            .build(&Untouchable)
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_empty_vocabulary_builds() {
        let engine = EngineBuilder::new()
            .max_depth(3)
            .build(&Vocabulary::new())
            .unwrap();

        assert!(engine.store().is_empty());
        assert!(engine.expand("anything").is_empty());
    }

    #[test]
    fn test_per_call_request() {
        let engine = EngineBuilder::new().build(&vocabulary()).unwrap();
        let request = engine.request("weapons").with_max_depth(1);

        assert_eq!(
            engine.expand_with(&request),
            vec!["arms", "military equipment", "equipment"]
        );

        let request = engine.request("urn:c1").with_mode(ExpansionMode::Uri);
        assert_eq!(
            engine.expand_with(&request),
            vec!["weapons", "arms", "military equipment"]
        );
    }

    #[test]
    fn test_reconfigure_shares_store() {
        let engine = EngineBuilder::new().build(&vocabulary()).unwrap();
        let deeper = engine
            .reconfigure(&EngineConfig {
                max_depth: 1,
                ..Default::default()
            })
            .unwrap();

        assert!(std::ptr::eq(engine.store(), deeper.store()));
        assert_eq!(deeper.expand("weapons").len(), 3);
    }

    #[test]
    fn test_cache_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let builder = EngineBuilder::new().cache_dir(dir.path());

        let first = builder.build(&vocabulary()).unwrap();
        let fingerprint = first.fingerprint().unwrap();
        assert!(StoreCache::new(dir.path()).path_for(fingerprint).exists());

        let second = builder.build(&vocabulary()).unwrap();
        assert_eq!(second.fingerprint(), Some(fingerprint));
        assert_eq!(second.expand("weapons"), first.expand("weapons"));
    }

    #[test]
    fn test_unwritable_cache_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();

        let engine = EngineBuilder::new()
            .cache_dir(blocker.join("cache"))
            .build(&vocabulary())
            .unwrap();
        assert_eq!(engine.expand("weapons").len(), 2);
    }

    #[test]
    fn test_shared_engine_swap() {
        let old = EngineBuilder::new().build(&vocabulary()).unwrap();
        let shared = SharedEngine::new(Arc::clone(&old));
        let in_flight = shared.current();

        let replacement = Vocabulary::new()
            .pref_label("urn:c1", "weapons", None)
            .alt_label("urn:c1", "armaments", None);
        shared.rebuild(&EngineBuilder::new(), &replacement).unwrap();

        assert_eq!(shared.current().expand("weapons"), vec!["armaments"]);
        assert_eq!(in_flight.expand("weapons"), vec!["arms", "military equipment"]);

        let err = shared
            .rebuild(&EngineBuilder::new().max_depth(-2), &replacement)
            .unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(shared.current().expand("weapons"), vec!["armaments"]);
    }

    #[test]
    fn test_engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SkosEngine>();
        assert_send_sync::<SharedEngine>();
    }
}
