//! Credential resolution
//!
//! Turns the credential of a connection into an [`AuthenticatedTransport`].
//! Nothing here touches the network: tokens are only fetched when a call
//! is actually made.

use super::registry::ClientRegistry;
use super::token::{RefreshTokenSource, StaticTokenSource};
use super::types::CredentialSource;
use crate::config::DriverConfig;
use crate::dsn::ConnectionOptions;
use crate::error::{Error, Result};
use crate::http::AuthenticatedTransport;
use reqwest::Client;
use std::sync::Arc;
use tracing::debug;

/// Build the transport for a connection
pub fn resolve(
    options: &ConnectionOptions,
    registry: &ClientRegistry,
    config: &DriverConfig,
) -> Result<AuthenticatedTransport> {
    let timeout = options.timeout.unwrap_or(config.default_timeout);
    debug!(
        method = options.credentials.method(),
        account_id = %options.account_id,
        "resolving credentials"
    );

    match &options.credentials {
        CredentialSource::NamedClient { name } => {
            let client = registry
                .get(name)
                .ok_or_else(|| Error::UnknownNamedClient { name: name.clone() })?;
            Ok(AuthenticatedTransport::new(client, timeout))
        }

        CredentialSource::StaticToken {
            access_token,
            developer_token,
        } => {
            let developer_token = require_developer_token(developer_token.as_deref(), "access token")?;
            AuthenticatedTransport::new(build_client(config)?, timeout)
                .with_developer_token(developer_token)
                .map(|t| t.with_token_source(Arc::new(StaticTokenSource::new(access_token))))
        }

        CredentialSource::RefreshToken {
            refresh_token,
            client_id,
            client_secret,
            developer_token,
        } => {
            let developer_token =
                require_developer_token(developer_token.as_deref(), "refresh token")?;
            let client = build_client(config)?;
            let source = RefreshTokenSource::new(
                &config.token_url,
                client_id,
                client_secret,
                refresh_token,
                client.clone(),
            );
            // The token round trip comes on top of the nominal budget.
            AuthenticatedTransport::new(client, timeout + config.refresh_timeout_extension)
                .with_developer_token(developer_token)
                .map(|t| t.with_token_source(Arc::new(source)))
        }

        CredentialSource::None => Ok(AuthenticatedTransport::new(build_client(config)?, timeout)),
    }
}

fn require_developer_token<'a>(token: Option<&'a str>, method: &'static str) -> Result<&'a str> {
    token
        .filter(|t| !t.is_empty())
        .ok_or(Error::MissingDeveloperToken { method })
}

fn build_client(config: &DriverConfig) -> Result<Client> {
    Ok(Client::builder().user_agent(&config.user_agent).build()?)
}
