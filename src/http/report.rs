//! Report download request
//!
//! AWQL queries are posted as a form to the report download endpoint; the
//! report switches of the connection travel as headers.

use super::transport::AuthenticatedTransport;
use crate::decode::parse_api_error;
use crate::dsn::ConnectionOptions;
use crate::error::{Error, Result};
use reqwest::Request;
use tracing::debug;

/// Report format requested from the service
pub const REPORT_FORMAT: &str = "CSV";

/// Build the download request for a query
pub fn build_report_request(
    transport: &AuthenticatedTransport,
    url: &str,
    query: &str,
    options: &ConnectionOptions,
) -> Result<Request> {
    let flags = options.flags;
    let request = transport
        .client()
        .post(url)
        .header("clientCustomerId", options.account_id.as_str())
        .header("skipReportHeader", "true")
        .header("skipReportSummary", "true")
        .header("skipColumnHeader", bool_header(flags.skip_column_header))
        .header(
            "includeZeroImpressions",
            bool_header(flags.include_zero_impressions),
        )
        .header("useRawEnumValues", bool_header(flags.use_raw_enum_values))
        .form(&[("__rdquery", query), ("__fmt", REPORT_FORMAT)])
        .build()?;

    Ok(request)
}

/// Send a download request and return the report body
pub async fn download_report(transport: &AuthenticatedTransport, request: &Request) -> Result<String> {
    let response = transport.execute(request).await?;
    let status = response.status();
    let body = response.text().await.map_err(|e| {
        if e.is_timeout() {
            Error::Timeout {
                timeout_ms: transport.timeout().as_millis() as u64,
            }
        } else {
            Error::Http(e)
        }
    })?;

    if status.is_success() {
        debug!(bytes = body.len(), "report downloaded");
        return Ok(body);
    }

    Err(parse_api_error(&body).unwrap_or_else(|| Error::http_status(status.as_u16(), body)))
}

fn bool_header(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
