//! SKOS thesaurus support: vocabulary loading, the concept store, and
//! label/URI expansion.
//!
//! ```text
//! VocabularySource → EngineBuilder → ConceptStore → ExpansionResolver ← SkosFilter
//! ```

pub mod cache;
pub mod concept;
pub mod config;
pub mod engine;
pub mod jsonl;
pub mod label;
pub mod resolver;
pub mod store;
pub mod vocabulary;

pub use concept::{Concept, RelationKind};
pub use config::{DepthOrigin, EngineConfig, ExpansionMode};
pub use engine::{EngineBuilder, SharedEngine, SkosEngine};
pub use store::ConceptStore;
pub use vocabulary::{Vocabulary, VocabularySource};
