//! Configuration for thesaurus expansion.
//!
//! [`EngineConfig`] is what the [`EngineBuilder`](crate::skos::engine::EngineBuilder)
//! consumes. It can be filled in programmatically, read from JSON, or parsed
//! from the flat string settings a host search engine hands to a token filter.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SkosError};
use crate::skos::concept::RelationKind;

/// How incoming tokens are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpansionMode {
    /// Tokens are labels, looked up case- and whitespace-insensitively.
    #[default]
    Label,
    /// Tokens are concept URIs.
    Uri,
}

impl fmt::Display for ExpansionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Label => write!(f, "label"),
            Self::Uri => write!(f, "uri"),
        }
    }
}

impl FromStr for ExpansionMode {
    type Err = SkosError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "label" => Ok(Self::Label),
            "uri" => Ok(Self::Uri),
            _ => Err(SkosError::configuration(format!(
                "Unknown expansion mode: {s} (expected 'label' or 'uri')"
            ))),
        }
    }
}

/// Where depth counting starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthOrigin {
    /// Depth 0 covers the matched concepts' own labels; depth n adds n relation hops.
    #[default]
    SameConcept,
    /// Moving from the matched label to the concept's other labels is the first
    /// hop, so own labels need depth 1 and relations start at depth 2.
    /// URI tokens still always get their concept's own labels.
    LabelHop,
}

impl FromStr for DepthOrigin {
    type Err = SkosError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "same_concept" => Ok(Self::SameConcept),
            "label_hop" => Ok(Self::LabelHop),
            _ => Err(SkosError::configuration(format!("Unknown depth origin: {s}"))),
        }
    }
}

/// Parse a comma separated list of relation kinds.
pub fn parse_relations(value: &str) -> Result<BTreeSet<RelationKind>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(RelationKind::from_str)
        .collect()
}

fn default_relations() -> BTreeSet<RelationKind> {
    RelationKind::ALL.into_iter().collect()
}

/// Validated expansion parameters used by the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionConfig {
    pub mode: ExpansionMode,
    pub max_depth: usize,
    /// Relation kinds followed, in traversal order.
    pub relations: Vec<RelationKind>,
    pub depth_origin: DepthOrigin,
    /// Normalized language tags to emit; `None` emits every language.
    pub languages: Option<Vec<String>>,
}

/// Engine configuration as supplied by a caller.
///
/// `max_depth` is signed so that a negative value from JSON or settings is
/// reported as a configuration error rather than a decode failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub mode: ExpansionMode,
    pub max_depth: i64,
    pub relations: BTreeSet<RelationKind>,
    pub depth_origin: DepthOrigin,
    pub languages: Option<Vec<String>>,
    pub cache_dir: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            mode: ExpansionMode::Label,
            max_depth: 0,
            relations: default_relations(),
            depth_origin: DepthOrigin::SameConcept,
            languages: None,
            cache_dir: None,
        }
    }
}

impl EngineConfig {
    /// Read a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| SkosError::configuration(format!("Invalid engine configuration: {e}")))
    }

    /// Parse token filter settings.
    ///
    /// Recognized keys: `expansion_type` (or `mode`), `max_depth`, `relations`,
    /// `depth_origin`, `languages`, `cache_dir`. Other keys are ignored.
    pub fn from_settings(settings: &HashMap<String, String>) -> Result<Self> {
        let mut config = EngineConfig::default();

        if let Some(mode) = settings.get("expansion_type").or_else(|| settings.get("mode")) {
            config.mode = mode.parse()?;
        }
        if let Some(depth) = settings.get("max_depth") {
            config.max_depth = depth.trim().parse().map_err(|_| {
                SkosError::configuration(format!("max_depth must be an integer, got {depth:?}"))
            })?;
        }
        if let Some(relations) = settings.get("relations") {
            config.relations = parse_relations(relations)?;
        }
        if let Some(origin) = settings.get("depth_origin") {
            config.depth_origin = origin.parse()?;
        }
        if let Some(languages) = settings.get("languages") {
            let languages: Vec<String> = languages
                .split(',')
                .map(str::trim)
                .filter(|language| !language.is_empty())
                .map(str::to_string)
                .collect();
            config.languages = (!languages.is_empty()).then_some(languages);
        }
        if let Some(cache_dir) = settings.get("cache_dir") {
            let cache_dir = cache_dir.trim();
            if !cache_dir.is_empty() {
                config.cache_dir = Some(PathBuf::from(cache_dir));
            }
        }

        Ok(config)
    }

    /// Check the configuration and produce the resolver parameters.
    pub fn validate(&self) -> Result<ExpansionConfig> {
        if self.max_depth < 0 {
            return Err(SkosError::configuration(format!(
                "max_depth must be >= 0, got {}",
                self.max_depth
            )));
        }
        let max_depth = usize::try_from(self.max_depth)
            .map_err(|_| SkosError::configuration("max_depth is too large"))?;

        if max_depth > 0 && self.relations.is_empty() {
            return Err(SkosError::configuration(
                "relations must not be empty when max_depth > 0",
            ));
        }

        let languages = match &self.languages {
            Some(languages) if languages.iter().any(|l| l.trim().is_empty()) => {
                return Err(SkosError::configuration("languages must not contain blank tags"));
            }
            Some(languages) => Some(languages.iter().map(|l| l.trim().to_lowercase()).collect()),
            None => None,
        };

        Ok(ExpansionConfig {
            mode: self.mode,
            max_depth,
            relations: self.relations.iter().copied().collect(),
            depth_origin: self.depth_origin,
            languages,
        })
    }
}
