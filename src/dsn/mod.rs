//! Data source name module
//!
//! Turns a connection string into validated [`ConnectionOptions`].
//!
//! # Grammar
//!
//! ```text
//! adwords?adwords_id=123-456-7890&developer_token=...&access_token=...
//! /data/db:/data/cache:true|adwords?adwords_id=123-456-7890&...
//! ```
//!
//! The first form is the service selector followed by URL-encoded options.
//! The second wraps it with defaults for the database directory, the cache
//! directory and whether caching is on.

mod parser;
mod types;

pub use parser::{parse_duration, parse_dsn, DsnParams};
pub use types::{CacheSettings, ConnectionOptions, Dsn, ReportFlags, DEFAULT_CACHE_TTL};

/// Service selector every connection string starts with
pub const SERVICE_SELECTOR: &str = "adwords";

/// API version used when the DSN has none
pub const DEFAULT_API_VERSION: &str = "v201705";

/// Separates the wrapper options from the service selector
pub const DSN_SEP: char = '|';

/// Separates the wrapper options from each other
pub const DSN_OPT_SEP: char = ':';
