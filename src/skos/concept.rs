//! SKOS concept data model.
//!
//! Concepts live in an arena owned by the
//! [`ConceptStore`](crate::skos::store::ConceptStore) and refer to each other
//! through [`ConceptIndex`] values assigned at load time, never through
//! references. The public identifier of a concept is its URI string.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SkosError};

/// Stable arena index of a concept inside one store.
pub type ConceptIndex = u32;

/// SKOS semantic relation kinds followed during expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    /// `skos:broader` - the object is more general than the subject.
    Broader,

    /// `skos:narrower` - the object is more specific than the subject.
    Narrower,

    /// `skos:related` - associative, non-hierarchical link.
    Related,
}

impl RelationKind {
    /// All relation kinds, in traversal order.
    pub const ALL: [RelationKind; 3] = [
        RelationKind::Broader,
        RelationKind::Narrower,
        RelationKind::Related,
    ];
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Broader => write!(f, "broader"),
            Self::Narrower => write!(f, "narrower"),
            Self::Related => write!(f, "related"),
        }
    }
}

impl FromStr for RelationKind {
    type Err = SkosError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "broader" => Ok(Self::Broader),
            "narrower" => Ok(Self::Narrower),
            "related" => Ok(Self::Related),
            _ => Err(SkosError::configuration(format!(
                "Invalid SKOS relation kind: {s}"
            ))),
        }
    }
}

/// SKOS lexical label kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelKind {
    /// `skos:prefLabel` - at most one per language.
    Preferred,
    /// `skos:altLabel` - synonyms, abbreviations.
    Alternate,
    /// `skos:hiddenLabel` - searchable but not for display (misspellings, codes).
    Hidden,
}

/// A label literal with its optional language tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub value: String,
    pub language: Option<String>,
}

impl Label {
    pub fn new<S: Into<String>>(value: S, language: Option<String>) -> Self {
        Label {
            value: value.into(),
            language,
        }
    }
}

/// A concept with its labels and outgoing relations.
///
/// Relation vectors hold arena indices in first-seen order, without
/// duplicates and never the concept's own index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    pub(crate) id: String,
    pub(crate) preferred: Vec<Label>,
    pub(crate) alternate: Vec<Label>,
    pub(crate) hidden: Vec<Label>,
    pub(crate) broader: Vec<ConceptIndex>,
    pub(crate) narrower: Vec<ConceptIndex>,
    pub(crate) related: Vec<ConceptIndex>,
}

impl Concept {
    pub(crate) fn new<S: Into<String>>(id: S) -> Self {
        Concept {
            id: id.into(),
            ..Default::default()
        }
    }

    /// The concept's URI.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Preferred labels, one per language.
    pub fn preferred_labels(&self) -> &[Label] {
        &self.preferred
    }

    /// Preferred label for a language (`None` = untagged).
    pub fn preferred_label(&self, language: Option<&str>) -> Option<&str> {
        self.preferred
            .iter()
            .find(|label| label.language.as_deref() == language)
            .map(|label| label.value.as_str())
    }

    /// Alternate labels in load order.
    pub fn alternate_labels(&self) -> &[Label] {
        &self.alternate
    }

    /// Hidden labels in load order.
    pub fn hidden_labels(&self) -> &[Label] {
        &self.hidden
    }

    /// Every label in emission order: preferred, alternate, then hidden.
    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.preferred
            .iter()
            .chain(self.alternate.iter())
            .chain(self.hidden.iter())
    }

    /// Arena indices of related concepts for one relation kind.
    pub fn relations(&self, kind: RelationKind) -> &[ConceptIndex] {
        match kind {
            RelationKind::Broader => &self.broader,
            RelationKind::Narrower => &self.narrower,
            RelationKind::Related => &self.related,
        }
    }

    pub(crate) fn relations_mut(&mut self, kind: RelationKind) -> &mut Vec<ConceptIndex> {
        match kind {
            RelationKind::Broader => &mut self.broader,
            RelationKind::Narrower => &mut self.narrower,
            RelationKind::Related => &mut self.related,
        }
    }

    pub(crate) fn labels_mut(&mut self, kind: LabelKind) -> &mut Vec<Label> {
        match kind {
            LabelKind::Preferred => &mut self.preferred,
            LabelKind::Alternate => &mut self.alternate,
            LabelKind::Hidden => &mut self.hidden,
        }
    }

    /// Whether any label was loaded for this concept.
    pub fn has_labels(&self) -> bool {
        !(self.preferred.is_empty() && self.alternate.is_empty() && self.hidden.is_empty())
    }
}
