//! Vocabulary sources: already-decoded SKOS statements.
//!
//! Parsing RDF serializations (Turtle, N3, RDF/XML) is the job of whatever
//! feeds this crate. A [`VocabularySource`] only has to hand out
//! subject/predicate/object [`Statement`]s.
//!
//! # Examples
//!
//! ```
//! use skos_analysis::skos::vocabulary::{Vocabulary, VocabularySource};
//!
//! let vocabulary = Vocabulary::new()
//!     .pref_label("urn:c1", "weapons", Some("en"))
//!     .alt_label("urn:c1", "arms", Some("en"))
//!     .broader("urn:c1", "urn:c0");
//!
//! assert_eq!(vocabulary.len(), 3);
//! assert!(vocabulary.fingerprint().is_ok());
//! ```

use std::hash::Hasher;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::skos::concept::{LabelKind, RelationKind};

const SKOS_NAMESPACE: &str = "http://www.w3.org/2004/02/skos/core#";

/// The predicate of a statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Predicate {
    PreferredLabel { language: Option<String> },
    AlternateLabel { language: Option<String> },
    HiddenLabel { language: Option<String> },
    Broader,
    Narrower,
    Related,
    /// Any predicate this crate does not interpret; ignored at load time.
    Other(String),
}

impl Predicate {
    /// Resolve a predicate name.
    ///
    /// Accepts the full SKOS URI, the `skos:` prefixed form or the bare local
    /// name (`prefLabel`, `altLabel`, `hiddenLabel`, `broader`, `narrower`,
    /// `related`). The language tag only applies to label predicates.
    pub fn from_name(name: &str, language: Option<&str>) -> Self {
        let local = name
            .strip_prefix(SKOS_NAMESPACE)
            .or_else(|| name.strip_prefix("skos:"))
            .unwrap_or(name);
        let language = language.map(str::to_string);

        match local {
            "prefLabel" => Predicate::PreferredLabel { language },
            "altLabel" => Predicate::AlternateLabel { language },
            "hiddenLabel" => Predicate::HiddenLabel { language },
            "broader" => Predicate::Broader,
            "narrower" => Predicate::Narrower,
            "related" => Predicate::Related,
            _ => Predicate::Other(name.to_string()),
        }
    }

    /// The label kind and language, for label predicates.
    pub fn label(&self) -> Option<(LabelKind, Option<&str>)> {
        match self {
            Predicate::PreferredLabel { language } => {
                Some((LabelKind::Preferred, language.as_deref()))
            }
            Predicate::AlternateLabel { language } => {
                Some((LabelKind::Alternate, language.as_deref()))
            }
            Predicate::HiddenLabel { language } => Some((LabelKind::Hidden, language.as_deref())),
            _ => None,
        }
    }

    /// The relation kind, for relation predicates.
    pub fn relation(&self) -> Option<RelationKind> {
        match self {
            Predicate::Broader => Some(RelationKind::Broader),
            Predicate::Narrower => Some(RelationKind::Narrower),
            Predicate::Related => Some(RelationKind::Related),
            _ => None,
        }
    }

    fn tag(&self) -> u8 {
        match self {
            Predicate::PreferredLabel { .. } => 1,
            Predicate::AlternateLabel { .. } => 2,
            Predicate::HiddenLabel { .. } => 3,
            Predicate::Broader => 4,
            Predicate::Narrower => 5,
            Predicate::Related => 6,
            Predicate::Other(_) => 7,
        }
    }
}

/// The object of a statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Object {
    /// A literal string (label predicates).
    Literal(String),
    /// A concept URI (relation predicates).
    Resource(String),
}

/// One subject-predicate-object statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub subject: String,
    pub predicate: Predicate,
    pub object: Object,
}

impl Statement {
    pub fn new<S: Into<String>>(subject: S, predicate: Predicate, object: Object) -> Self {
        Statement {
            subject: subject.into(),
            predicate,
            object,
        }
    }

    fn hash_into(&self, hasher: &mut crc32fast::Hasher) {
        hasher.write(self.subject.as_bytes());
        hasher.write_u8(0);
        hasher.write_u8(self.predicate.tag());
        match &self.predicate {
            Predicate::PreferredLabel { language }
            | Predicate::AlternateLabel { language }
            | Predicate::HiddenLabel { language } => {
                hasher.write(language.as_deref().unwrap_or("").as_bytes());
            }
            Predicate::Other(name) => hasher.write(name.as_bytes()),
            _ => {}
        }
        hasher.write_u8(0);
        match &self.object {
            Object::Literal(value) => {
                hasher.write_u8(b'L');
                hasher.write(value.as_bytes());
            }
            Object::Resource(id) => {
                hasher.write_u8(b'R');
                hasher.write(id.as_bytes());
            }
        }
        hasher.write_u8(0);
    }
}

/// Iterator over the statements of a source.
pub type StatementIter<'a> = Box<dyn Iterator<Item = Result<Statement>> + 'a>;

/// A source of already-decoded SKOS statements.
pub trait VocabularySource {
    /// Start a pass over all statements.
    ///
    /// An `Err` from this call or from any item means the source itself failed
    /// to read and aborts the load.
    fn statements(&self) -> Result<StatementIter<'_>>;

    /// Content fingerprint used to key the persisted store cache.
    ///
    /// The default walks every statement; sources with cheaper access to their
    /// raw bytes should override it.
    fn fingerprint(&self) -> Result<u64> {
        let mut hasher = crc32fast::Hasher::new();
        let mut count: u64 = 0;
        for statement in self.statements()? {
            statement?.hash_into(&mut hasher);
            count += 1;
        }
        Ok((count << 32) | u64::from(hasher.finalize()))
    }

    /// Short description for log messages.
    fn describe(&self) -> String {
        "in-memory vocabulary".to_string()
    }
}

impl VocabularySource for [Statement] {
    fn statements(&self) -> Result<StatementIter<'_>> {
        Ok(Box::new(self.iter().cloned().map(Ok)))
    }
}

impl VocabularySource for Vec<Statement> {
    fn statements(&self) -> Result<StatementIter<'_>> {
        self.as_slice().statements()
    }
}

/// An in-memory vocabulary with builder helpers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    statements: Vec<Statement>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw statement.
    pub fn push(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    /// Add a statement and return self for chaining.
    pub fn statement(mut self, statement: Statement) -> Self {
        self.push(statement);
        self
    }

    pub fn pref_label(self, subject: &str, label: &str, language: Option<&str>) -> Self {
        self.label(subject, "prefLabel", label, language)
    }

    pub fn alt_label(self, subject: &str, label: &str, language: Option<&str>) -> Self {
        self.label(subject, "altLabel", label, language)
    }

    pub fn hidden_label(self, subject: &str, label: &str, language: Option<&str>) -> Self {
        self.label(subject, "hiddenLabel", label, language)
    }

    pub fn broader(self, subject: &str, object: &str) -> Self {
        self.relation(subject, Predicate::Broader, object)
    }

    pub fn narrower(self, subject: &str, object: &str) -> Self {
        self.relation(subject, Predicate::Narrower, object)
    }

    pub fn related(self, subject: &str, object: &str) -> Self {
        self.relation(subject, Predicate::Related, object)
    }

    fn label(self, subject: &str, predicate: &str, label: &str, language: Option<&str>) -> Self {
        self.statement(Statement::new(
            subject,
            Predicate::from_name(predicate, language),
            Object::Literal(label.to_string()),
        ))
    }

    fn relation(self, subject: &str, predicate: Predicate, object: &str) -> Self {
        self.statement(Statement::new(
            subject,
            predicate,
            Object::Resource(object.to_string()),
        ))
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn as_slice(&self) -> &[Statement] {
        &self.statements
    }
}

impl From<Vec<Statement>> for Vocabulary {
    fn from(statements: Vec<Statement>) -> Self {
        Vocabulary { statements }
    }
}

impl VocabularySource for Vocabulary {
    fn statements(&self) -> Result<StatementIter<'_>> {
        self.statements.as_slice().statements()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicate_from_name() {
        assert_eq!(
            Predicate::from_name("http://www.w3.org/2004/02/skos/core#prefLabel", Some("en")),
            Predicate::PreferredLabel {
                language: Some("en".to_string())
            }
        );
        assert_eq!(
            Predicate::from_name("skos:altLabel", None),
            Predicate::AlternateLabel { language: None }
        );
        assert_eq!(Predicate::from_name("broader", Some("en")), Predicate::Broader);
        assert_eq!(
            Predicate::from_name("skos:exactMatch", None),
            Predicate::Other("skos:exactMatch".to_string())
        );
    }

    #[test]
    fn test_predicate_kinds() {
        let pref = Predicate::from_name("prefLabel", Some("de"));
        assert_eq!(pref.label(), Some((LabelKind::Preferred, Some("de"))));
        assert_eq!(pref.relation(), None);
        assert_eq!(Predicate::Related.relation(), Some(RelationKind::Related));
        assert_eq!(Predicate::Other("x".to_string()).label(), None);
    }

    #[test]
    fn test_fingerprint_is_content_based() {
        let a = Vocabulary::new().pref_label("urn:c1", "weapons", Some("en"));
        let b = Vocabulary::new().pref_label("urn:c1", "weapons", Some("en"));
        let c = Vocabulary::new().pref_label("urn:c1", "weapon", Some("en"));
        let d = Vocabulary::new().alt_label("urn:c1", "weapons", Some("en"));

        assert_eq!(a.fingerprint().unwrap(), b.fingerprint().unwrap());
        assert_ne!(a.fingerprint().unwrap(), c.fingerprint().unwrap());
        assert_ne!(a.fingerprint().unwrap(), d.fingerprint().unwrap());
    }

    #[test]
    fn test_vec_source() {
        let statements = vec![Statement::new(
            "urn:c1",
            Predicate::Related,
            Object::Resource("urn:c2".to_string()),
        )];
        let collected: Vec<Statement> = statements
            .statements()
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(collected, statements);
    }
}
