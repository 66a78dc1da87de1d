//! Advisory on-disk cache for loaded concept stores.
//!
//! A snapshot is stored per vocabulary fingerprint as `skos-<fingerprint>.bin`.
//! The cache only ever shortens a load: an unreadable, stale, or corrupt file
//! is reported as a miss and the caller loads from the source instead. The
//! format is private to this crate version.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SkosError};
use crate::skos::store::{ConceptStore, StoreSnapshot};

const CACHE_FORMAT_VERSION: u32 = 1;

static TMP_SEQUENCE: AtomicU64 = AtomicU64::new(0);

#[derive(Serialize, Deserialize)]
struct CacheFile {
    version: u32,
    fingerprint: u64,
    snapshot: StoreSnapshot,
}

/// Directory holding store snapshots.
#[derive(Debug, Clone)]
pub struct StoreCache {
    dir: PathBuf,
}

impl StoreCache {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        StoreCache {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Snapshot path for a fingerprint.
    pub fn path_for(&self, fingerprint: u64) -> PathBuf {
        self.dir.join(format!("skos-{fingerprint:016x}.bin"))
    }

    /// Unique scratch path for one write of `fingerprint`.
    fn tmp_path_for(&self, fingerprint: u64) -> PathBuf {
        let sequence = TMP_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        self.path_for(fingerprint)
            .with_extension(format!("tmp-{}-{sequence}", std::process::id()))
    }

    /// Restore a store, or `None` on any kind of miss.
    pub fn read(&self, fingerprint: u64) -> Option<ConceptStore> {
        let path = self.path_for(fingerprint);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!("Store cache miss for {}: {e}", path.display());
                return None;
            }
        };

        match Self::decode(&bytes, fingerprint) {
            Ok(store) => Some(store),
            Err(e) => {
                warn!("Ignoring unusable store cache {}: {e}", path.display());
                None
            }
        }
    }

    fn decode(bytes: &[u8], fingerprint: u64) -> Result<ConceptStore> {
        let file: CacheFile =
            bincode::deserialize(bytes).map_err(|e| SkosError::serialization(e.to_string()))?;
        if file.version != CACHE_FORMAT_VERSION {
            return Err(SkosError::serialization(format!(
                "format version {} (expected {CACHE_FORMAT_VERSION})",
                file.version
            )));
        }
        if file.fingerprint != fingerprint {
            return Err(SkosError::serialization("fingerprint mismatch"));
        }
        ConceptStore::from_snapshot(file.snapshot)
    }

    /// Persist a store snapshot.
    ///
    /// Written to a temporary file first and renamed into place so readers
    /// never see a partial snapshot.
    pub fn write(&self, fingerprint: u64, store: &ConceptStore) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;

        let file = CacheFile {
            version: CACHE_FORMAT_VERSION,
            fingerprint,
            snapshot: store.to_snapshot(),
        };
        let bytes =
            bincode::serialize(&file).map_err(|e| SkosError::serialization(e.to_string()))?;

        let path = self.path_for(fingerprint);
        let tmp = self.tmp_path_for(fingerprint);
        fs::write(&tmp, bytes)?;
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(path)
    }
}
