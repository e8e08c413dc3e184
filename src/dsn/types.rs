//! Connection option types
//!
//! `ConnectionOptions` is built once per open call from the parsed parameters
//! and never changes afterwards.

use super::parser::{format_duration, parse_duration, DsnParams};
use super::{DEFAULT_API_VERSION, SERVICE_SELECTOR};
use crate::auth::CredentialSource;
use crate::error::{Error, Result};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Time-to-live of cached result sets when none is configured
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Report download switches sent as request headers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReportFlags {
    /// Include rows with zero impressions (`zero_impression=1`)
    pub include_zero_impressions: bool,
    /// Ask the service to omit the column header row (`skip_column_header=1`)
    pub skip_column_header: bool,
    /// Return enum values as raw API names (`raw_enum=1`)
    pub use_raw_enum_values: bool,
}

/// Result cache settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSettings {
    /// Whether fetched result sets are cached
    pub enabled: bool,
    /// Directory holding the cache entries
    pub directory: Option<PathBuf>,
    /// Lifetime of an entry
    pub ttl: Duration,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            directory: None,
            ttl: DEFAULT_CACHE_TTL,
        }
    }
}

/// Validated options of one connection
#[derive(Debug, Clone)]
pub struct ConnectionOptions {
    /// Client customer id of the target account, never empty
    pub account_id: String,
    /// API version used in the report download URL
    pub version: String,
    /// Report download switches
    pub flags: ReportFlags,
    /// Request timeout, when the DSN sets one
    pub timeout: Option<Duration>,
    /// Result cache settings
    pub cache: CacheSettings,
    /// How requests are authenticated
    pub credentials: CredentialSource,
    /// Directory of the account metadata, loaded by the host
    pub database_dir: Option<PathBuf>,
}

impl ConnectionOptions {
    /// Parse a DSN into options
    pub fn parse(dsn: &str) -> Result<Self> {
        Self::from_params(&super::parse_dsn(dsn)?)
    }

    /// Build options from parsed parameters, applying defaults
    pub fn from_params(params: &DsnParams) -> Result<Self> {
        let account_id = params
            .get("adwords_id")
            .ok_or(Error::MissingAccountId)?
            .to_string();

        let version = params
            .get("version")
            .unwrap_or(DEFAULT_API_VERSION)
            .to_string();

        let flags = ReportFlags {
            include_zero_impressions: params.flag("zero_impression"),
            skip_column_header: params.flag("skip_column_header"),
            use_raw_enum_values: params.flag("raw_enum"),
        };

        let timeout = params
            .get("timeout")
            .map(|value| {
                parse_duration(value).ok_or_else(|| Error::invalid_duration("timeout", value))
            })
            .transpose()?;

        Ok(Self {
            account_id,
            version,
            flags,
            timeout,
            cache: cache_settings(params)?,
            credentials: CredentialSource::from_params(params),
            database_dir: params.get("database_dir").map(PathBuf::from),
        })
    }

    /// Identity of the target, used to keep cache entries of different
    /// accounts or report switches apart
    pub fn identity(&self) -> String {
        format!(
            "{}|{}|zero_impression={}|skip_column_header={}|raw_enum={}",
            self.account_id,
            self.version,
            u8::from(self.flags.include_zero_impressions),
            u8::from(self.flags.skip_column_header),
            u8::from(self.flags.use_raw_enum_values),
        )
    }
}

fn cache_settings(params: &DsnParams) -> Result<CacheSettings> {
    let directory = params.get("cache_dir").map(PathBuf::from);

    let ttl = match params.get("cache_duration") {
        Some(value) => {
            parse_duration(value).ok_or_else(|| Error::invalid_duration("cache_duration", value))?
        }
        None => DEFAULT_CACHE_TTL,
    };

    Ok(CacheSettings {
        enabled: directory.is_some() && params.flag("cache"),
        directory,
        ttl: if ttl.is_zero() { DEFAULT_CACHE_TTL } else { ttl },
    })
}

/// Builder rendering a canonical `adwords?...` connection string
///
/// ```
/// use adwql::dsn::Dsn;
///
/// let dsn = Dsn::new("123-456-7890")
///     .developer_token("dev")
///     .access_token("ya29.token")
///     .zero_impressions(true);
/// assert_eq!(
///     dsn.to_string(),
///     "adwords?adwords_id=123-456-7890&developer_token=dev&access_token=ya29.token&zero_impression=1"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct Dsn {
    params: Vec<(&'static str, String)>,
}

impl Dsn {
    /// Start a DSN for an account
    pub fn new(account_id: impl Into<String>) -> Self {
        Self {
            params: vec![("adwords_id", account_id.into())],
        }
    }

    fn with(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.params.retain(|(k, _)| *k != key);
        self.params.push((key, value.into()));
        self
    }

    fn with_flag(self, key: &'static str, on: bool) -> Self {
        if on {
            self.with(key, "1")
        } else {
            Self {
                params: self.params.into_iter().filter(|(k, _)| *k != key).collect(),
            }
        }
    }

    /// Set the API version
    #[must_use]
    pub fn version(self, version: impl Into<String>) -> Self {
        self.with("version", version)
    }

    /// Set the developer token
    #[must_use]
    pub fn developer_token(self, token: impl Into<String>) -> Self {
        self.with("developer_token", token)
    }

    /// Authenticate with a static access token
    #[must_use]
    pub fn access_token(self, token: impl Into<String>) -> Self {
        self.with("access_token", token)
    }

    /// Authenticate with the OAuth2 refresh-token flow
    #[must_use]
    pub fn refresh_token(
        self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        self.with("client_id", client_id)
            .with("client_secret", client_secret)
            .with("refresh_token", refresh_token)
    }

    /// Use a pre-registered HTTP client
    #[must_use]
    pub fn http_client(self, name: impl Into<String>) -> Self {
        self.with("http_client", name)
    }

    /// Set the request timeout
    #[must_use]
    pub fn timeout(self, timeout: Duration) -> Self {
        self.with("timeout", format_duration(timeout))
    }

    /// Include rows with zero impressions
    #[must_use]
    pub fn zero_impressions(self, on: bool) -> Self {
        self.with_flag("zero_impression", on)
    }

    /// Omit the column header row
    #[must_use]
    pub fn skip_column_header(self, on: bool) -> Self {
        self.with_flag("skip_column_header", on)
    }

    /// Return raw enum values
    #[must_use]
    pub fn raw_enum_values(self, on: bool) -> Self {
        self.with_flag("raw_enum", on)
    }

    /// Cache result sets in a directory for `ttl`
    #[must_use]
    pub fn cache(self, directory: impl Into<String>, ttl: Duration) -> Self {
        self.with("cache", "1")
            .with("cache_dir", directory)
            .with("cache_duration", format_duration(ttl))
    }
}

impl fmt::Display for Dsn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.params {
            query.append_pair(key, value);
        }
        write!(f, "{SERVICE_SELECTOR}?{}", query.finish())
    }
}
