//! Connection lifecycle

use super::statement::Statement;
use crate::cache::ResultCache;
use crate::dsn::ConnectionOptions;
use crate::error::{Error, Result};
use crate::http::AuthenticatedTransport;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

/// Transaction handle
///
/// The report service has no transactional semantics, so no value of this
/// type can exist: [`Connection::begin`] always fails.
#[derive(Debug)]
pub enum Transaction {}

/// State shared by a connection and its statements
#[derive(Debug)]
pub(crate) struct ConnectionInner {
    pub(crate) options: ConnectionOptions,
    pub(crate) report_url: String,
    pub(crate) cache: Option<Arc<ResultCache>>,
    transport: RwLock<Option<AuthenticatedTransport>>,
}

impl ConnectionInner {
    /// Transport of an open connection
    pub(crate) fn transport(&self) -> Result<AuthenticatedTransport> {
        self.transport.read().clone().ok_or(Error::ConnectionClosed)
    }
}

/// An open connection to one account
#[derive(Debug)]
pub struct Connection {
    inner: Arc<ConnectionInner>,
}

impl Connection {
    pub(crate) fn new(
        options: ConnectionOptions,
        report_url: String,
        transport: AuthenticatedTransport,
        cache: Option<Arc<ResultCache>>,
    ) -> Self {
        Self {
            inner: Arc::new(ConnectionInner {
                options,
                report_url,
                cache,
                transport: RwLock::new(Some(transport)),
            }),
        }
    }

    /// Options the connection was opened with
    pub fn options(&self) -> &ConnectionOptions {
        &self.inner.options
    }

    /// Client customer id of the account
    pub fn account_id(&self) -> &str {
        &self.inner.options.account_id
    }

    /// Report download URL
    pub fn report_url(&self) -> &str {
        &self.inner.report_url
    }

    /// Whether results are served from a cache
    pub fn is_cached(&self) -> bool {
        self.inner.cache.is_some()
    }

    /// Whether [`close`](Self::close) was called
    pub fn is_closed(&self) -> bool {
        self.inner.transport.read().is_none()
    }

    /// Prepare a statement bound to this connection
    pub fn prepare(&self, query: &str) -> Result<Statement> {
        if self.is_closed() {
            return Err(Error::ConnectionClosed);
        }
        if query.trim().is_empty() {
            return Err(Error::EmptyStatement);
        }
        Ok(Statement::new(Arc::clone(&self.inner), query))
    }

    /// Start a transaction
    ///
    /// Always fails: with [`Error::Unsupported`] on an open connection, so
    /// callers can proceed without a transaction.
    pub fn begin(&self) -> Result<Transaction> {
        if self.is_closed() {
            return Err(Error::ConnectionClosed);
        }
        Err(Error::Unsupported {
            operation: "transactions",
        })
    }

    /// Release the transport
    ///
    /// Statements prepared on this connection fail from now on.
    pub fn close(&self) -> Result<()> {
        match self.inner.transport.write().take() {
            Some(_) => {
                debug!(account_id = %self.inner.options.account_id, "connection closed");
                Ok(())
            }
            None => Err(Error::ConnectionClosed),
        }
    }
}
