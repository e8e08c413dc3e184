//! HTTP module
//!
//! Provides the authenticated transport and the report download call.
//!
//! # Features
//!
//! - **Header stamping**: developer token and bearer token on every call,
//!   added to a copy of the request
//! - **Timeouts**: every call, token refresh included, is bounded
//! - **No retries**: failures are returned to the caller as they happen

mod report;
mod transport;

pub use report::{build_report_request, download_report, REPORT_FORMAT};
pub use transport::{AuthenticatedTransport, DEVELOPER_TOKEN_HEADER};
