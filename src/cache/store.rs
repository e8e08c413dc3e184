//! File-based result cache
//!
//! One JSON file per entry, written to a temp file then renamed. A
//! `.lock` file in the directory is held exclusively for the lifetime of
//! the cache, so at most one writer (process or driver) uses a directory.

use super::types::{CacheEntry, Fingerprint};
use crate::error::{Error, Result};
use crate::types::ResultSet;
use fs2::FileExt;
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Name of the lock file inside the cache directory
pub const LOCK_FILE: &str = ".lock";

const ENTRY_EXTENSION: &str = "json";
const TEMP_EXTENSION: &str = "tmp";

/// Time-bounded store of fetched result sets
#[derive(Debug)]
pub struct ResultCache {
    dir: PathBuf,
    ttl: Duration,
    /// Holds the directory lock until dropped
    _lock: File,
    /// Serializes file access between threads of this process
    io: Mutex<()>,
}

impl ResultCache {
    /// Open (creating if needed) the cache in `dir`
    ///
    /// Fails with [`Error::CacheLocked`] when another cache holds the directory.
    pub fn open(dir: impl AsRef<Path>, ttl: Duration) -> Result<Self> {
        let dir = Self::resolve_dir(dir)?;

        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(dir.join(LOCK_FILE))
            .map_err(|e| Error::cache(format!("Failed to open cache lock file: {e}")))?;
        lock.try_lock_exclusive().map_err(|_| Error::CacheLocked {
            path: dir.display().to_string(),
        })?;

        info!(dir = %dir.display(), ttl_secs = ttl.as_secs(), "result cache opened");

        Ok(Self {
            dir,
            ttl,
            _lock: lock,
            io: Mutex::new(()),
        })
    }

    /// Create `dir` if needed and return its canonical path
    ///
    /// Different spellings of one directory resolve to the same path.
    pub fn resolve_dir(dir: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .and_then(|()| fs::canonicalize(dir))
            .map_err(|e| {
                Error::cache(format!(
                    "Failed to create cache directory {}: {e}",
                    dir.display()
                ))
            })
    }

    /// Cache directory, canonicalized
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Default lifetime of entries
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Get a result set that has not expired yet
    pub fn get(&self, fingerprint: &Fingerprint) -> Result<Option<ResultSet>> {
        let path = self.entry_path(fingerprint);
        let _guard = self.io.lock();

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(%fingerprint, "cache miss");
                return Ok(None);
            }
            Err(e) => return Err(Error::cache(format!("Failed to read cache entry: {e}"))),
        };

        let entry: CacheEntry = match serde_json::from_str(&contents) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(%fingerprint, error = %e, "discarding unreadable cache entry");
                remove_file(&path)?;
                return Ok(None);
            }
        };

        if entry.fingerprint != *fingerprint || entry.is_expired() {
            debug!(%fingerprint, "cache entry expired");
            remove_file(&path)?;
            return Ok(None);
        }

        debug!(%fingerprint, rows = entry.payload.len(), "cache hit");
        Ok(Some(entry.payload))
    }

    /// Store a result set for `ttl`
    pub fn put(&self, fingerprint: &Fingerprint, payload: &ResultSet, ttl: Duration) -> Result<()> {
        let entry = CacheEntry::new(fingerprint.clone(), payload.clone(), ttl);
        let contents = serde_json::to_string(&entry)?;

        let path = self.entry_path(fingerprint);
        let temp_path = path.with_extension(TEMP_EXTENSION);
        let _guard = self.io.lock();

        // Write to temp file first, then rename for atomicity
        fs::write(&temp_path, &contents)
            .map_err(|e| Error::cache(format!("Failed to write cache entry: {e}")))?;
        fs::rename(&temp_path, &path)
            .map_err(|e| Error::cache(format!("Failed to rename cache entry: {e}")))?;

        debug!(%fingerprint, rows = payload.len(), "cache entry stored");
        Ok(())
    }

    /// Remove every entry, returning how many were removed
    pub fn flush_all(&self) -> Result<usize> {
        let _guard = self.io.lock();
        let mut removed = 0;

        let entries = fs::read_dir(&self.dir)
            .map_err(|e| Error::cache(format!("Failed to list cache directory: {e}")))?;
        for entry in entries {
            let path = entry?.path();
            match path.extension().and_then(|ext| ext.to_str()) {
                Some(ENTRY_EXTENSION) => {
                    remove_file(&path)?;
                    removed += 1;
                }
                Some(TEMP_EXTENSION) => remove_file(&path)?,
                _ => {}
            }
        }

        info!(dir = %self.dir.display(), removed, "result cache flushed");
        Ok(removed)
    }

    fn entry_path(&self, fingerprint: &Fingerprint) -> PathBuf {
        self.dir
            .join(format!("{}.{ENTRY_EXTENSION}", fingerprint.as_str()))
    }
}

fn remove_file(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::cache(format!(
            "Failed to remove {}: {e}",
            path.display()
        ))),
    }
}
