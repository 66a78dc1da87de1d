//! Error types for the skos-analysis library.
//!
//! All fallible operations return [`SkosError`]. Only two kinds of failure are
//! meant to reach the caller of the engine builder: configuration errors and
//! load errors. Everything else that can go wrong while reading a vocabulary
//! (unknown predicates, self-loops, malformed labels) is absorbed and logged.
//!
//! # Examples
//!
//! ```
//! use skos_analysis::error::{Result, SkosError};
//!
//! fn check_depth(depth: i64) -> Result<usize> {
//!     if depth < 0 {
//!         return Err(SkosError::configuration("max_depth must be >= 0"));
//!     }
//!     Ok(depth as usize)
//! }
//!
//! assert!(check_depth(-1).unwrap_err().is_configuration());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for skos-analysis operations.
#[derive(Error, Debug)]
pub enum SkosError {
    /// Invalid builder parameters (negative depth, unknown mode, ...).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The vocabulary source could not be turned into a valid concept store.
    #[error("Load error: {0}")]
    Load(String),

    /// Cache snapshot encode/decode errors.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors (vocabulary files, cache files).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON errors (configuration, JSONL vocabularies, CLI output).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with SkosError.
pub type Result<T> = std::result::Result<T, SkosError>;

impl SkosError {
    /// Create a new configuration error.
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        SkosError::Configuration(msg.into())
    }

    /// Create a new load error.
    pub fn load<S: Into<String>>(msg: S) -> Self {
        SkosError::Load(msg.into())
    }

    /// Create a new serialization error.
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        SkosError::Serialization(msg.into())
    }

    /// Whether this error was caused by invalid configuration.
    pub fn is_configuration(&self) -> bool {
        matches!(self, SkosError::Configuration(_))
    }

    /// Whether this error was caused by a failed vocabulary load.
    pub fn is_load(&self) -> bool {
        matches!(self, SkosError::Load(_))
    }
}
