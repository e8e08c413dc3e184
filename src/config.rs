//! Driver-level configuration
//!
//! Per-connection settings come from the data source name (see [`crate::dsn`]).
//! `DriverConfig` holds what is shared by every connection a driver opens:
//! service endpoints, the user agent and timeout budgets.

use std::time::Duration;

/// Default AdWords API host
pub const DEFAULT_API_BASE_URL: &str = "https://adwords.google.com";

/// Google OAuth2 token endpoint used by the refresh-token flow
pub const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Timeout applied when the DSN has no `timeout` parameter
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Extra budget granted to the refresh-token path for the token round trip
pub const DEFAULT_REFRESH_TIMEOUT_EXTENSION: Duration = Duration::from_secs(15);

/// Configuration shared by all connections of a driver
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Base URL of the report download service
    pub api_base_url: String,
    /// OAuth2 token endpoint
    pub token_url: String,
    /// User agent string
    pub user_agent: String,
    /// Nominal request timeout
    pub default_timeout: Duration,
    /// Added to the timeout when tokens are obtained by refresh
    pub refresh_timeout_extension: Duration,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            user_agent: format!("adwql/{}", env!("CARGO_PKG_VERSION")),
            default_timeout: DEFAULT_TIMEOUT,
            refresh_timeout_extension: DEFAULT_REFRESH_TIMEOUT_EXTENSION,
        }
    }
}

impl DriverConfig {
    /// Create a new config builder
    pub fn builder() -> DriverConfigBuilder {
        DriverConfigBuilder::default()
    }

    /// URL of the report download endpoint for an API version
    pub fn report_url(&self, version: &str) -> String {
        format!(
            "{}/api/adwords/reportdownload/{}",
            self.api_base_url.trim_end_matches('/'),
            version
        )
    }
}

/// Builder for driver config
#[derive(Default)]
pub struct DriverConfigBuilder {
    config: DriverConfig,
}

impl DriverConfigBuilder {
    /// Set the report service base URL
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_base_url = url.into();
        self
    }

    /// Set the OAuth2 token endpoint
    pub fn token_url(mut self, url: impl Into<String>) -> Self {
        self.config.token_url = url.into();
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Set the timeout used when a DSN does not specify one
    pub fn default_timeout(mut self, timeout: Duration) -> Self {
        self.config.default_timeout = timeout;
        self
    }

    /// Set the extra timeout budget of the refresh-token path
    pub fn refresh_timeout_extension(mut self, extension: Duration) -> Self {
        self.config.refresh_timeout_extension = extension;
        self
    }

    /// Build the config
    pub fn build(self) -> DriverConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_config_default() {
        let config = DriverConfig::default();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.token_url, DEFAULT_TOKEN_URL);
        assert_eq!(config.default_timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("adwql/"));
    }

    #[test]
    fn test_driver_config_builder() {
        let config = DriverConfig::builder()
            .api_base_url("http://127.0.0.1:9000/")
            .token_url("http://127.0.0.1:9000/token")
            .user_agent("test-agent/1.0")
            .default_timeout(Duration::from_secs(5))
            .refresh_timeout_extension(Duration::from_secs(1))
            .build();

        assert_eq!(config.token_url, "http://127.0.0.1:9000/token");
        assert_eq!(config.user_agent, "test-agent/1.0");
        assert_eq!(config.default_timeout, Duration::from_secs(5));
        assert_eq!(config.refresh_timeout_extension, Duration::from_secs(1));
        assert_eq!(
            config.report_url("v201705"),
            "http://127.0.0.1:9000/api/adwords/reportdownload/v201705"
        );
    }
}
