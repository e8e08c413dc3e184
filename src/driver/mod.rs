//! Driver module
//!
//! Relational-client surface over the report service: open a connection,
//! prepare a query, execute it, iterate typed rows.
//!
//! # Overview
//!
//! The driver module provides:
//! - `Driver` - Opens connections, owns the named-client registry and the
//!   result caches shared between its connections
//! - `Connection` - One account, one authenticated transport
//! - `Statement` - Prepared AWQL text, executed any number of times
//! - `Rows` / `Row` - Fetched cells, decoded on demand
//!
//! # Example
//!
//! ```rust,ignore
//! use adwql::driver::{Arg, Driver};
//! use adwql::codec::PercentValue;
//!
//! let driver = Driver::new();
//! let conn = driver.open("adwords?adwords_id=123-456-7890&developer_token=dev&access_token=tok")?;
//! let stmt = conn.prepare("SELECT CampaignId, Ctr FROM CAMPAIGN_PERFORMANCE_REPORT WHERE Impressions > ?")?;
//! for row in stmt.query(&[Arg::Int(100)]).await? {
//!     let ctr: PercentValue = row.get(1)?;
//! }
//! ```

mod connection;
mod rows;
mod statement;

pub use connection::{Connection, Transaction};
pub use rows::{Row, Rows};
pub use statement::{bind, count_placeholders, Arg, Statement};

use crate::auth::{resolve, ClientRegistry};
use crate::cache::ResultCache;
use crate::config::DriverConfig;
use crate::dsn::{CacheSettings, ConnectionOptions};
use crate::error::Result;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Weak};
use tracing::{debug, info};

/// Entry point opening connections
#[derive(Debug, Default)]
pub struct Driver {
    /// Endpoints and timeouts
    config: DriverConfig,
    /// Pre-authenticated clients addressable by name
    registry: Arc<ClientRegistry>,
    /// Open caches by canonical directory
    caches: Mutex<HashMap<PathBuf, Weak<ResultCache>>>,
}

impl Driver {
    /// Create a driver with default configuration and an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the driver configuration
    #[must_use]
    pub fn with_config(mut self, config: DriverConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a registry shared with other drivers
    #[must_use]
    pub fn with_registry(mut self, registry: Arc<ClientRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// Get the driver configuration
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Get the named-client registry
    pub fn registry(&self) -> &Arc<ClientRegistry> {
        &self.registry
    }

    /// Open a connection
    ///
    /// Validates the DSN and resolves the credentials; no network call is
    /// made until a statement is executed.
    pub fn open(&self, dsn: &str) -> Result<Connection> {
        let options = ConnectionOptions::parse(dsn)?;
        let transport = resolve(&options, &self.registry, &self.config)?;
        let cache = self.shared_cache(&options.cache)?;
        let report_url = self.config.report_url(&options.version);

        info!(
            account_id = %options.account_id,
            version = %options.version,
            auth = options.credentials.method(),
            cached = cache.is_some(),
            "connection opened"
        );

        Ok(Connection::new(options, report_url, transport, cache))
    }

    /// Get the cache for a directory, opening and flushing it on first use
    fn shared_cache(&self, settings: &CacheSettings) -> Result<Option<Arc<ResultCache>>> {
        let Some(dir) = settings.directory.as_ref().filter(|_| settings.enabled) else {
            return Ok(None);
        };

        let dir = ResultCache::resolve_dir(dir)?;
        let mut caches = self.caches.lock();
        if let Some(cache) = caches.get(&dir).and_then(Weak::upgrade) {
            debug!(dir = %dir.display(), "reusing result cache");
            return Ok(Some(cache));
        }

        let cache = Arc::new(ResultCache::open(&dir, settings.ttl)?);
        cache.flush_all()?;
        caches.retain(|_, weak| weak.strong_count() > 0);
        caches.insert(dir, Arc::downgrade(&cache));
        Ok(Some(cache))
    }
}
