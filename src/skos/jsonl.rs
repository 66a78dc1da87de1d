//! JSON Lines vocabulary source.
//!
//! Each non-empty line holds one already-decoded statement. Literal objects
//! are JSON strings, resource objects are `{"id": ...}`:
//!
//! ```jsonl
//! {"subject": "urn:c1", "predicate": "skos:prefLabel", "object": "weapons", "language": "en"}
//! {"subject": "urn:c1", "predicate": "skos:altLabel", "object": "arms", "language": "en"}
//! {"subject": "urn:c1", "predicate": "skos:broader", "object": {"id": "urn:c0"}}
//! ```
//!
//! Lines starting with `#` are comments.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, SkosError};
use crate::skos::vocabulary::{Object, Predicate, Statement, StatementIter, VocabularySource};

#[derive(Debug, Deserialize)]
struct JsonlStatement {
    #[serde(default)]
    subject: String,
    predicate: String,
    object: JsonlObject,
    #[serde(default)]
    language: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonlObject {
    Resource { id: String },
    Literal(String),
}

impl From<JsonlStatement> for Statement {
    fn from(record: JsonlStatement) -> Self {
        let object = match record.object {
            JsonlObject::Resource { id } => Object::Resource(id),
            JsonlObject::Literal(value) => Object::Literal(value),
        };
        Statement::new(
            record.subject,
            Predicate::from_name(&record.predicate, record.language.as_deref()),
            object,
        )
    }
}

/// Parse a single JSON line into a statement.
pub fn parse_line(line: &str) -> Result<Statement> {
    let record: JsonlStatement = serde_json::from_str(line)?;
    Ok(record.into())
}

/// A vocabulary stored as a JSONL file.
#[derive(Debug, Clone)]
pub struct JsonlVocabulary {
    path: PathBuf,
}

impl JsonlVocabulary {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        JsonlVocabulary {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl VocabularySource for JsonlVocabulary {
    fn statements(&self) -> Result<StatementIter<'_>> {
        let file = File::open(&self.path).map_err(|e| {
            SkosError::load(format!("Failed to open {}: {e}", self.path.display()))
        })?;
        let path = self.path.clone();

        let lines = BufReader::new(file).lines().enumerate().filter_map(move |(index, line)| {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    return Some(Err(SkosError::load(format!(
                        "Failed to read {} line {}: {e}",
                        path.display(),
                        index + 1
                    ))));
                }
            };
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                return None;
            }
            Some(parse_line(trimmed).map_err(|e| {
                SkosError::load(format!("{} line {}: {e}", path.display(), index + 1))
            }))
        });

        Ok(Box::new(lines))
    }

    fn fingerprint(&self) -> Result<u64> {
        let bytes = fs::read(&self.path).map_err(|e| {
            SkosError::load(format!("Failed to read {}: {e}", self.path.display()))
        })?;
        Ok(((bytes.len() as u64) << 32) | u64::from(crc32fast::hash(&bytes)))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
