//! Credential types
//!
//! These types represent the credential selected from a connection string
//! and the tokens obtained from it.

use crate::dsn::DsnParams;
use chrono::{DateTime, Utc};
use std::fmt;

/// Lifetime assumed for a token whose endpoint does not report one
pub const DEFAULT_TOKEN_LIFETIME_SECONDS: i64 = 60 * 60;

/// A token is refreshed this many seconds before it nominally expires
pub const TOKEN_EXPIRY_DELTA_SECONDS: i64 = 10;

/// Where the credentials of a connection come from
///
/// Exactly one variant is selected per connection, in the order
/// named client, static token, refresh token.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum CredentialSource {
    /// No credentials: calls go out unauthenticated and fail remotely
    #[default]
    None,

    /// A pre-authenticated client registered under a name
    NamedClient {
        /// Registry name
        name: String,
    },

    /// A static OAuth2 access token
    StaticToken {
        /// Bearer token
        access_token: String,
        /// Developer token sent with every call
        developer_token: Option<String>,
    },

    /// OAuth2 refresh-token flow
    RefreshToken {
        /// Long-lived refresh token
        refresh_token: String,
        /// OAuth2 client id
        client_id: String,
        /// OAuth2 client secret
        client_secret: String,
        /// Developer token sent with every call
        developer_token: Option<String>,
    },
}

impl CredentialSource {
    /// Select the credential strategy from DSN parameters
    pub fn from_params(params: &DsnParams) -> Self {
        let developer_token = params.get("developer_token").map(String::from);

        if let Some(name) = params.get("http_client") {
            return Self::NamedClient {
                name: name.to_string(),
            };
        }

        if let Some(access_token) = params.get("access_token") {
            return Self::StaticToken {
                access_token: access_token.to_string(),
                developer_token,
            };
        }

        if let Some(refresh_token) = params.get("refresh_token") {
            return Self::RefreshToken {
                refresh_token: refresh_token.to_string(),
                client_id: params.get("client_id").unwrap_or_default().to_string(),
                client_secret: params.get("client_secret").unwrap_or_default().to_string(),
                developer_token,
            };
        }

        Self::None
    }

    /// Short name of the strategy, safe to log
    pub fn method(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::NamedClient { .. } => "named client",
            Self::StaticToken { .. } => "access token",
            Self::RefreshToken { .. } => "refresh token",
        }
    }
}

impl fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::NamedClient { name } => f.debug_struct("NamedClient").field("name", name).finish(),
            Self::StaticToken {
                developer_token, ..
            } => f
                .debug_struct("StaticToken")
                .field("access_token", &"<redacted>")
                .field("has_developer_token", &developer_token.is_some())
                .finish(),
            Self::RefreshToken {
                client_id,
                developer_token,
                ..
            } => f
                .debug_struct("RefreshToken")
                .field("client_id", client_id)
                .field("refresh_token", &"<redacted>")
                .field("client_secret", &"<redacted>")
                .field("has_developer_token", &developer_token.is_some())
                .finish(),
        }
    }
}

/// Cached token with expiration
#[derive(Debug, Clone)]
pub struct CachedToken {
    /// The access token
    pub token: String,
    /// When the token expires
    pub expires_at: Option<DateTime<Utc>>,
}

impl CachedToken {
    /// Create a new cached token
    pub fn new(token: String, expires_at: Option<DateTime<Utc>>) -> Self {
        Self { token, expires_at }
    }

    /// Create a token that expires in N seconds from now
    pub fn expires_in(token: String, seconds: i64) -> Self {
        let expires_at = Utc::now() + chrono::Duration::seconds(seconds);
        Self {
            token,
            expires_at: Some(expires_at),
        }
    }

    /// Check if the token is expired, or about to
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => {
                let delta = chrono::Duration::seconds(TOKEN_EXPIRY_DELTA_SECONDS);
                Utc::now() + delta >= expires_at
            }
            None => false, // No expiration = never expires
        }
    }
}

#[cfg(test)]
mod type_tests {
    use super::*;

    #[test]
    fn test_cached_token_not_expired() {
        let token = CachedToken::expires_in("test".to_string(), 3600);
        assert!(!token.is_expired());
    }

    #[test]
    fn test_cached_token_expired() {
        let token = CachedToken::expires_in("test".to_string(), -100);
        assert!(token.is_expired());
    }

    #[test]
    fn test_cached_token_within_expiry_delta() {
        let token = CachedToken::expires_in("test".to_string(), 5);
        assert!(token.is_expired());
    }

    #[test]
    fn test_cached_token_no_expiration() {
        let token = CachedToken::new("test".to_string(), None);
        assert!(!token.is_expired());
    }

    #[test]
    fn test_credential_source_default() {
        assert_eq!(CredentialSource::default(), CredentialSource::None);
    }

    #[test]
    fn test_credential_source_debug_redacts() {
        let source = CredentialSource::StaticToken {
            access_token: "ya29.secret".to_string(),
            developer_token: Some("dev".to_string()),
        };
        let debug = format!("{source:?}");
        assert!(!debug.contains("ya29.secret"));
        assert!(!debug.contains("dev\""));
    }
}
