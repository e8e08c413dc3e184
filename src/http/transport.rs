//! Authenticated transport
//!
//! Wraps an HTTP client so that every outgoing call carries the developer
//! token and, when a token source is configured, a fresh bearer token.
//! The caller's request is never touched: headers are added to a copy.

use crate::auth::TokenSource;
use crate::error::{Error, Result};
use reqwest::header::{HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Request, Response};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Name of the header carrying the developer token
pub const DEVELOPER_TOKEN_HEADER: &str = "developerToken";

/// HTTP client stamping authentication headers on every call
#[derive(Clone)]
pub struct AuthenticatedTransport {
    client: Client,
    developer_token: Option<HeaderValue>,
    token_source: Option<Arc<dyn TokenSource>>,
    timeout: Duration,
}

impl AuthenticatedTransport {
    /// Create a transport without any authentication
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self {
            client,
            developer_token: None,
            token_source: None,
            timeout,
        }
    }

    /// Send `token` as developer token on every call
    pub fn with_developer_token(mut self, token: &str) -> Result<Self> {
        let mut value = HeaderValue::from_str(token).map_err(|_| Error::InvalidCredential {
            message: "developer token is not a valid header value".to_string(),
        })?;
        value.set_sensitive(true);
        self.developer_token = Some(value);
        Ok(self)
    }

    /// Authorize every call with a bearer token from `source`
    #[must_use]
    pub fn with_token_source(mut self, source: Arc<dyn TokenSource>) -> Self {
        self.token_source = Some(source);
        self
    }

    /// Underlying HTTP client, for building requests
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Time budget of one call
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether calls carry a bearer token
    pub fn has_token_source(&self) -> bool {
        self.token_source.is_some()
    }

    /// Whether calls carry a developer token
    pub fn has_developer_token(&self) -> bool {
        self.developer_token.is_some()
    }

    /// Copy `request` and add the authentication headers to the copy
    pub async fn authorize(&self, request: &Request) -> Result<Request> {
        // try_clone copies the header map, so the original stays untouched
        let mut outgoing = request
            .try_clone()
            .ok_or_else(|| Error::Other("request with a streaming body cannot be sent".into()))?;

        if let Some(value) = &self.developer_token {
            outgoing
                .headers_mut()
                .append(HeaderName::from_static("developertoken"), value.clone());
        }

        if let Some(source) = &self.token_source {
            let token = source.token().await?;
            let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
                Error::InvalidCredential {
                    message: "access token is not a valid header value".to_string(),
                }
            })?;
            value.set_sensitive(true);
            outgoing.headers_mut().insert(AUTHORIZATION, value);
        }

        if outgoing.timeout().is_none() {
            *outgoing.timeout_mut() = Some(self.timeout);
        }

        Ok(outgoing)
    }

    /// Send a request, giving up after the transport timeout
    ///
    /// The timeout covers obtaining the token as well as the exchange itself.
    pub async fn execute(&self, request: &Request) -> Result<Response> {
        match tokio::time::timeout(self.timeout, self.send(request)).await {
            Ok(result) => result,
            Err(_) => Err(self.timeout_error()),
        }
    }

    async fn send(&self, request: &Request) -> Result<Response> {
        let outgoing = self.authorize(request).await?;
        debug!(method = %outgoing.method(), url = %outgoing.url(), "sending request");

        self.client.execute(outgoing).await.map_err(|e| {
            if e.is_timeout() {
                self.timeout_error()
            } else {
                Error::Http(e)
            }
        })
    }

    fn timeout_error(&self) -> Error {
        Error::Timeout {
            timeout_ms: self.timeout.as_millis() as u64,
        }
    }
}

impl fmt::Debug for AuthenticatedTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticatedTransport")
            .field("timeout", &self.timeout)
            .field("has_developer_token", &self.developer_token.is_some())
            .field("token_source", &self.token_source)
            .finish_non_exhaustive()
    }
}
