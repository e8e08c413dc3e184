//! Response decoder module
//!
//! Supports: CSV report bodies, XML error documents
//!
//! # Overview
//!
//! Successful downloads are CSV; cells are kept verbatim so that the value
//! codecs see the service's sentinels untouched. Failed downloads carry a
//! `reportDownloadError` XML document, decoded into [`Error::Api`](crate::Error::Api).

mod csv;
mod xml;

pub use csv::{parse_csv, parse_report, FIELD_DELIMITER};
pub use xml::parse_api_error;

#[cfg(test)]
mod tests;
