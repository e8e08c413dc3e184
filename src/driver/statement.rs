//! Prepared statements and placeholder binding

use super::connection::ConnectionInner;
use super::rows::Rows;
use crate::cache::Fingerprint;
use crate::decode::parse_report;
use crate::error::{Error, Result};
use crate::http::{build_report_request, download_report};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Value bound to a `?` placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// Rendered as `true` / `false`
    Bool(bool),
    /// Rendered as a decimal integer
    Int(i64),
    /// Rendered with the shortest exact representation
    Float(f64),
    /// Rendered as a double-quoted literal
    Text(String),
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Bool(b) => write!(f, "{b}"),
            Arg::Int(i) => write!(f, "{i}"),
            Arg::Float(x) => write!(f, "{x}"),
            Arg::Text(s) => {
                f.write_str("\"")?;
                for c in s.chars() {
                    if c == '"' || c == '\\' {
                        f.write_str("\\")?;
                    }
                    write!(f, "{c}")?;
                }
                f.write_str("\"")
            }
        }
    }
}

impl From<bool> for Arg {
    fn from(value: bool) -> Self {
        Arg::Bool(value)
    }
}

impl From<i64> for Arg {
    fn from(value: i64) -> Self {
        Arg::Int(value)
    }
}

impl From<i32> for Arg {
    fn from(value: i32) -> Self {
        Arg::Int(value.into())
    }
}

impl From<f64> for Arg {
    fn from(value: f64) -> Self {
        Arg::Float(value)
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::Text(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::Text(value)
    }
}

/// Byte offsets of the `?` placeholders outside quoted literals
fn placeholder_positions(query: &str) -> Vec<usize> {
    let mut positions = Vec::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in query.char_indices() {
        match quote {
            Some(_) if escaped => escaped = false,
            Some(_) if c == '\\' => escaped = true,
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '\'' | '"' => quote = Some(c),
                '?' => positions.push(i),
                _ => {}
            },
        }
    }

    positions
}

/// Number of `?` placeholders in a query
pub fn count_placeholders(query: &str) -> usize {
    placeholder_positions(query).len()
}

/// Substitute `args` for the placeholders of `query`, in order
pub fn bind(query: &str, args: &[Arg]) -> Result<String> {
    let positions = placeholder_positions(query);
    if positions.len() != args.len() {
        return Err(Error::ArgumentCount {
            expected: positions.len(),
            got: args.len(),
        });
    }

    let mut bound = String::with_capacity(query.len() + args.len() * 8);
    let mut last = 0;
    for (&pos, arg) in positions.iter().zip(args) {
        bound.push_str(&query[last..pos]);
        bound.push_str(&arg.to_string());
        last = pos + 1;
    }
    bound.push_str(&query[last..]);

    Ok(bound)
}

/// A query prepared on a connection
#[derive(Debug)]
pub struct Statement {
    conn: Arc<ConnectionInner>,
    query: String,
    closed: bool,
}

impl Statement {
    pub(crate) fn new(conn: Arc<ConnectionInner>, query: &str) -> Self {
        Self {
            conn,
            query: query.to_string(),
            closed: false,
        }
    }

    /// Query text as prepared
    pub fn query_text(&self) -> &str {
        &self.query
    }

    /// Number of arguments [`query`](Self::query) expects
    pub fn num_input(&self) -> usize {
        count_placeholders(&self.query)
    }

    /// Whether [`close`](Self::close) was called
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Close the statement
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Err(Error::StatementClosed);
        }
        self.closed = true;
        Ok(())
    }

    /// Execute the query with `args` bound to its placeholders
    ///
    /// Served from the connection's cache when an unexpired entry exists;
    /// otherwise the report is downloaded and, if caching is on, stored.
    pub async fn query(&self, args: &[Arg]) -> Result<Rows> {
        if self.closed {
            return Err(Error::StatementClosed);
        }
        let transport = self.conn.transport()?;
        let options = &self.conn.options;
        let query = bind(&self.query, args)?;

        let fingerprint = self
            .conn
            .cache
            .as_ref()
            .map(|_| Fingerprint::new(&options.identity(), &query));

        if let (Some(cache), Some(fp)) = (&self.conn.cache, &fingerprint) {
            match cache.get(fp) {
                Ok(Some(result)) => return Ok(Rows::new(result)),
                Ok(None) => {}
                Err(e) => warn!(error = %e, "result cache read failed"),
            }
        }

        let request = build_report_request(&transport, &self.conn.report_url, &query, options)?;
        let body = download_report(&transport, &request).await?;
        let result = parse_report(&body, !options.flags.skip_column_header)?;
        debug!(
            account_id = %options.account_id,
            rows = result.len(),
            "report fetched"
        );

        if let (Some(cache), Some(fp)) = (&self.conn.cache, &fingerprint) {
            if let Err(e) = cache.put(fp, &result, options.cache.ttl) {
                warn!(error = %e, "failed to cache result set");
            }
        }

        Ok(Rows::new(result))
    }
}
