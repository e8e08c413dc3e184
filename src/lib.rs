// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # adwql
//!
//! Relational-style client for the AdWords report download service. AWQL
//! queries go in, typed rows come out.
//!
//! ## Features
//!
//! - **Connection strings**: `adwords?adwords_id=...` with an optional
//!   `<database_dir>:<cache_dir>:<with_cache>|` wrapper
//! - **Three credential strategies**: named pre-registered client, static
//!   access token, OAuth2 refresh token
//! - **Value codecs**: report sentinels (` --`, `Excluded`, `auto: 5`,
//!   `< 10%`) decoded to typed nullable values and back
//! - **Result cache**: fetched result sets kept on disk for a limited time
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use adwql::codec::PercentValue;
//! use adwql::{Driver, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let driver = Driver::new();
//!     let conn = driver.open(
//!         "adwords?adwords_id=123-456-7890&developer_token=dev&access_token=ya29.token",
//!     )?;
//!
//!     let stmt = conn.prepare("SELECT CampaignName, Ctr FROM CAMPAIGN_PERFORMANCE_REPORT")?;
//!     for row in stmt.query(&[]).await? {
//!         let name: String = row.get(0)?;
//!         let ctr: PercentValue = row.get(1)?;
//!         println!("{name}: {ctr:?}");
//!     }
//!
//!     conn.close()
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │  Driver::open(dsn) → Connection                           │
//! │  prepare(query) → Statement   query(args) → Rows<Row>     │
//! └───────────────────────────────────────────────────────────┘
//!                              │
//! ┌──────────┬─────────────────┼───────────┬──────────────────┐
//! │   DSN    │      Auth       │   Cache   │      Codec       │
//! ├──────────┼─────────────────┼───────────┼──────────────────┤
//! │ Options  │ Named client    │ get / put │ PercentValue     │
//! │ Wrapper  │ Access token    │ flush_all │ AutoExcludedInt  │
//! │ Duration │ Refresh token   │ fs2 lock  │ PrecisionFloat   │
//! │ Builder  │ Transport       │           │ FormattedTime    │
//! └──────────┴─────────────────┴───────────┴──────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Driver-wide configuration
pub mod config;

/// Connection string parsing
pub mod dsn;

/// Credential strategies and token sources
pub mod auth;

/// Authenticated transport and report download
pub mod http;

/// Report body decoders (CSV, XML errors)
pub mod decode;

/// Typed report values
pub mod codec;

/// Result cache
pub mod cache;

/// Connections, statements and rows
pub mod driver;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, ErrorKind, Result};
pub use types::*;

// Re-export commonly used types
pub use config::DriverConfig;
pub use driver::{Arg, Connection, Driver, Row, Rows, Statement};
pub use dsn::{ConnectionOptions, Dsn};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
