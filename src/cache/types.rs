//! Cache entry types

use crate::types::ResultSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::time::Duration;

/// Key of a cached result set
///
/// Derived from the connection identity and the effective query text, so the
/// same query against two accounts never shares an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Fingerprint a query run by a connection
    pub fn new(identity: &str, query: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(identity.as_bytes());
        // Separator keeps ("ab", "c") and ("a", "bc") apart
        hasher.update([0u8]);
        hasher.update(query.as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// Hex digest
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A result set stored with its expiry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Key of the entry
    pub fingerprint: Fingerprint,
    /// When the entry was written
    pub created_at: DateTime<Utc>,
    /// When the entry stops being served
    pub expires_at: DateTime<Utc>,
    /// The cached result set
    pub payload: ResultSet,
}

impl CacheEntry {
    /// Create an entry expiring `ttl` from now
    pub fn new(fingerprint: Fingerprint, payload: ResultSet, ttl: Duration) -> Self {
        let created_at = Utc::now();
        let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX);
        Self {
            fingerprint,
            created_at,
            expires_at: created_at.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC),
            payload,
        }
    }

    /// Whether the entry may no longer be served
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}
