//! Result cache module
//!
//! Keeps fetched result sets on disk for a limited time so repeated queries
//! do not hit the report service.
//!
//! # Overview
//!
//! The cache module provides:
//! - `Fingerprint` - key derived from connection identity and query text
//! - `CacheEntry` - stored result set with its expiry
//! - `ResultCache` - get / put / flush_all over a locked directory

mod store;
mod types;

pub use store::{ResultCache, LOCK_FILE};
pub use types::{CacheEntry, Fingerprint};
