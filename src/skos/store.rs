//! In-memory concept store.
//!
//! The store is built in one pass over a [`VocabularySource`] and is read-only
//! afterwards. Concepts are kept in an arena (`Vec<Concept>`) and addressed by
//! [`ConceptIndex`]; two hash indexes map URIs and normalized labels to arena
//! indices.
//!
//! Statements the store cannot use are dropped and counted in the
//! [`LoadReport`]; only a failing source or a statement without a subject
//! aborts the load.
//!
//! # Examples
//!
//! ```
//! use skos_analysis::skos::store::ConceptStore;
//! use skos_analysis::skos::vocabulary::Vocabulary;
//!
//! let vocabulary = Vocabulary::new()
//!     .pref_label("urn:c1", "weapons", Some("en"))
//!     .alt_label("urn:c1", "arms", Some("en"));
//!
//! let store = ConceptStore::load(&vocabulary).unwrap();
//! assert_eq!(store.lookup_by_label("ARMS"), vec!["urn:c1"]);
//! assert_eq!(store.lookup_by_id("urn:c1").unwrap().alternate_labels().len(), 1);
//! ```

use ahash::AHashMap;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SkosError};
use crate::skos::concept::{Concept, ConceptIndex, Label, LabelKind, RelationKind};
use crate::skos::label::normalize;
use crate::skos::vocabulary::{Object, Predicate, Statement, VocabularySource};

/// Counters for what happened to each statement during a load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    /// Statements read from the source.
    pub statements: usize,
    /// Statements that changed the store.
    pub applied: usize,
    /// Statements whose predicate is not interpreted.
    pub unknown_predicates: usize,
    /// Relations from a concept to itself.
    pub self_loops: usize,
    /// Blank labels, blank relation targets, or objects of the wrong kind.
    pub malformed: usize,
    /// Exact repeats of an already applied statement.
    pub duplicates: usize,
    /// Extra preferred labels for a language, kept as alternate labels.
    pub demoted_preferred: usize,
}

impl LoadReport {
    /// Number of statements dropped for any reason.
    pub fn skipped(&self) -> usize {
        self.unknown_predicates + self.self_loops + self.malformed + self.duplicates
    }
}

/// Serializable part of a store; the hash indexes are rebuilt on restore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct StoreSnapshot {
    pub(crate) concepts: Vec<Concept>,
    pub(crate) report: LoadReport,
}

/// Read-only SKOS concept graph with URI and label indexes.
#[derive(Debug, Clone, Default)]
pub struct ConceptStore {
    concepts: Vec<Concept>,
    ids: AHashMap<String, ConceptIndex>,
    labels: AHashMap<String, Vec<ConceptIndex>>,
    report: LoadReport,
}

impl ConceptStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a vocabulary source.
    pub fn load<S>(source: &S) -> Result<Self>
    where
        S: VocabularySource + ?Sized,
    {
        let mut store = ConceptStore::new();
        let statements = source.statements().map_err(into_load_error)?;

        for statement in statements {
            let statement = statement.map_err(into_load_error)?;
            store.report.statements += 1;
            store.apply(statement)?;
        }

        info!(
            "Loaded {} concepts and {} distinct labels from {} ({} statements, {} skipped)",
            store.concepts.len(),
            store.labels.len(),
            source.describe(),
            store.report.statements,
            store.report.skipped()
        );

        Ok(store)
    }

    fn apply(&mut self, statement: Statement) -> Result<()> {
        let subject = statement.subject.trim();
        if subject.is_empty() {
            return Err(SkosError::load(format!(
                "Statement #{} has no subject",
                self.report.statements
            )));
        }

        if let Some((kind, language)) = statement.predicate.label() {
            let Object::Literal(value) = &statement.object else {
                warn!("Dropping {kind:?} label of {subject}: object is a resource, not a literal");
                self.report.malformed += 1;
                return Ok(());
            };
            let value = value.trim();
            if value.is_empty() {
                warn!("Dropping blank {kind:?} label of {subject}");
                self.report.malformed += 1;
                return Ok(());
            }
            let subject_index = self.intern(subject)?;
            self.add_label(subject_index, kind, value, language);
            return Ok(());
        }

        if let Some(kind) = statement.predicate.relation() {
            let Object::Resource(target) = &statement.object else {
                warn!("Dropping {kind} relation of {subject}: object is a literal, not a resource");
                self.report.malformed += 1;
                return Ok(());
            };
            let target = target.trim();
            if target.is_empty() {
                warn!("Dropping {kind} relation of {subject}: blank target");
                self.report.malformed += 1;
                return Ok(());
            }
            if target == subject {
                warn!("Dropping self-referential {kind} relation of {subject}");
                self.report.self_loops += 1;
                return Ok(());
            }
            let subject_index = self.intern(subject)?;
            let target_index = self.intern(target)?;
            self.add_relation(subject_index, kind, target_index);
            return Ok(());
        }

        if let Predicate::Other(name) = &statement.predicate {
            debug!("Ignoring statement with unknown predicate {name}");
        }
        self.report.unknown_predicates += 1;
        Ok(())
    }

    /// Arena index for a URI, allocating a concept on first sight.
    fn intern(&mut self, id: &str) -> Result<ConceptIndex> {
        if let Some(&index) = self.ids.get(id) {
            return Ok(index);
        }
        let index = ConceptIndex::try_from(self.concepts.len())
            .map_err(|_| SkosError::load("Vocabulary exceeds the maximum number of concepts"))?;
        self.concepts.push(Concept::new(id));
        self.ids.insert(id.to_string(), index);
        Ok(index)
    }

    fn add_label(&mut self, index: ConceptIndex, kind: LabelKind, value: &str, language: Option<&str>) {
        let concept = &mut self.concepts[index as usize];
        let label = Label::new(value, language.map(str::to_string));

        let mut kind = kind;
        if kind == LabelKind::Preferred {
            if let Some(existing) = concept.preferred_label(language) {
                if existing == value {
                    self.report.duplicates += 1;
                    return;
                }
                warn!(
                    "{} already has preferred label {existing:?} for language {language:?}; keeping {value:?} as alternate",
                    concept.id()
                );
                self.report.demoted_preferred += 1;
                kind = LabelKind::Alternate;
            }
        }

        let labels = concept.labels_mut(kind);
        if labels.contains(&label) {
            self.report.duplicates += 1;
            return;
        }
        labels.push(label);
        self.report.applied += 1;

        let candidates = self.labels.entry(normalize(value)).or_default();
        if let Err(position) = candidates.binary_search(&index) {
            candidates.insert(position, index);
        }
    }

    fn add_relation(&mut self, from: ConceptIndex, kind: RelationKind, to: ConceptIndex) {
        let relations = self.concepts[from as usize].relations_mut(kind);
        if relations.contains(&to) {
            self.report.duplicates += 1;
            return;
        }
        relations.push(to);
        self.report.applied += 1;
    }

    /// Concept for a URI.
    pub fn lookup_by_id(&self, id: &str) -> Option<&Concept> {
        self.index_of(id).map(|index| &self.concepts[index as usize])
    }

    /// Arena index for a URI.
    pub fn index_of(&self, id: &str) -> Option<ConceptIndex> {
        self.ids.get(id.trim()).copied()
    }

    /// URIs of every concept carrying the label, in load order.
    ///
    /// The label is normalized first, so lookups ignore case and spacing.
    pub fn lookup_by_label(&self, label: &str) -> Vec<&str> {
        self.candidates(&normalize(label))
            .iter()
            .map(|&index| self.concepts[index as usize].id())
            .collect()
    }

    /// Arena indices for an already normalized label key.
    pub fn candidates(&self, normalized_label: &str) -> &[ConceptIndex] {
        self.labels
            .get(normalized_label)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Concept at an arena index.
    pub fn concept(&self, index: ConceptIndex) -> Option<&Concept> {
        self.concepts.get(index as usize)
    }

    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    /// Number of distinct normalized labels.
    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    /// What happened during the load that produced this store.
    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    pub(crate) fn to_snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            concepts: self.concepts.clone(),
            report: self.report.clone(),
        }
    }

    pub(crate) fn from_snapshot(snapshot: StoreSnapshot) -> Result<Self> {
        let StoreSnapshot { concepts, report } = snapshot;
        let mut ids = AHashMap::with_capacity(concepts.len());
        let mut labels: AHashMap<String, Vec<ConceptIndex>> = AHashMap::new();

        for (position, concept) in concepts.iter().enumerate() {
            let index = ConceptIndex::try_from(position)
                .map_err(|_| SkosError::serialization("Snapshot has too many concepts"))?;
            let dangling = RelationKind::ALL
                .iter()
                .flat_map(|&kind| concept.relations(kind))
                .any(|&target| target as usize >= concepts.len() || target == index);
            if dangling {
                return Err(SkosError::serialization(format!(
                    "Snapshot relation of {} points outside the arena",
                    concept.id()
                )));
            }

            ids.insert(concept.id().to_string(), index);
            for label in concept.labels() {
                let candidates = labels.entry(normalize(&label.value)).or_default();
                if candidates.last() != Some(&index) {
                    candidates.push(index);
                }
            }
        }

        Ok(ConceptStore {
            concepts,
            ids,
            labels,
            report,
        })
    }
}

fn into_load_error(error: SkosError) -> SkosError {
    match error {
        SkosError::Load(_) => error,
        other => SkosError::load(other.to_string()),
    }
}
