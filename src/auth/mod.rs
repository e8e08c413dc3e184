//! Authentication module
//!
//! Supports: named pre-registered clients, static access tokens and the
//! OAuth2 refresh-token flow.
//!
//! [`resolve`] picks the strategy of a connection and builds the
//! authenticated transport; token sources handle token caching and refresh.

mod registry;
mod resolver;
mod token;
mod types;

pub use registry::ClientRegistry;
pub use resolver::resolve;
pub use token::{RefreshTokenSource, StaticTokenSource, TokenSource};
pub use types::{
    CachedToken, CredentialSource, DEFAULT_TOKEN_LIFETIME_SECONDS, TOKEN_EXPIRY_DELTA_SECONDS,
};

#[cfg(test)]
mod tests;
