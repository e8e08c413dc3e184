//! Connection string parsing
//!
//! Produces a flat parameter map; [`ConnectionOptions`](super::ConnectionOptions)
//! reads from it and applies defaults.

use super::{DSN_OPT_SEP, DSN_SEP, SERVICE_SELECTOR};
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::time::Duration;

/// Flat mapping of DSN parameter names to values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DsnParams {
    values: BTreeMap<String, String>,
}

impl DsnParams {
    /// Get a non-empty parameter value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Check whether a flag parameter is set to `1`
    pub fn flag(&self, key: &str) -> bool {
        self.get(key) == Some("1")
    }

    /// Set a value unless the parameter is already present
    pub fn set_default(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            return;
        }
        self.values.entry(key.to_string()).or_insert(value);
    }

    /// Iterate over all parameters
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no parameter was given
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Parse either DSN form into its parameters
pub fn parse_dsn(dsn: &str) -> Result<DsnParams> {
    // The form is decided before `?`, where directories may start with the selector.
    let head = dsn.split_once('?').map_or(dsn, |(head, _)| head);
    let Some((prefix, selector)) = dsn
        .split_once(DSN_SEP)
        .filter(|(prefix, _)| prefix.len() < head.len())
    else {
        return parse_selector(dsn, dsn);
    };

    let mut params = parse_selector(selector, dsn)?;

    // Taken from the right so that directories may contain the separator.
    let mut parts = prefix.rsplitn(3, DSN_OPT_SEP);
    let (Some(with_cache), Some(cache_dir), Some(database_dir)) =
        (parts.next(), parts.next(), parts.next())
    else {
        return Err(Error::invalid_dsn(
            redact(dsn),
            "expected <database_dir>:<cache_dir>:<with_cache> before `|`",
        ));
    };

    let with_cache = match with_cache {
        "true" | "1" => true,
        "false" | "0" | "" => false,
        other => {
            return Err(Error::invalid_dsn(
                redact(dsn),
                format!("invalid cache flag {other:?}"),
            ))
        }
    };

    params.set_default("database_dir", database_dir);
    params.set_default("cache_dir", cache_dir);
    if with_cache {
        params.set_default("cache", "1");
    }

    Ok(params)
}

/// Parse `adwords?<query>` into parameters
fn parse_selector(selector: &str, original: &str) -> Result<DsnParams> {
    if !selector.starts_with(SERVICE_SELECTOR) {
        return Err(Error::invalid_dsn(
            redact(original),
            format!("expected the `{SERVICE_SELECTOR}` service selector"),
        ));
    }

    let Some((_, query)) = selector.split_once('?') else {
        return Err(Error::invalid_dsn(
            redact(original),
            "query options are mandatory (missing `?`)",
        ));
    };

    let mut params = DsnParams::default();
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        // First occurrence wins.
        params
            .values
            .entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }

    Ok(params)
}

/// Keep the part of a DSN that cannot hold credentials
fn redact(dsn: &str) -> String {
    match dsn.split_once('?') {
        Some((head, _)) => format!("{head}?..."),
        None => dsn.to_string(),
    }
}

/// Parse a Go-style duration such as `300ms`, `1.5h` or `2h45m`
///
/// Returns `None` for anything else, including negative durations and
/// numbers without a unit (except `0`).
pub fn parse_duration(value: &str) -> Option<Duration> {
    if value == "0" {
        return Some(Duration::ZERO);
    }
    if value.is_empty() {
        return None;
    }

    let is_number = |c: char| c.is_ascii_digit() || c == '.';
    let mut rest = value;
    let mut nanos = 0f64;

    while !rest.is_empty() {
        let number_len = rest.find(|c: char| !is_number(c)).unwrap_or(rest.len());
        if number_len == 0 {
            return None;
        }
        let number: f64 = rest[..number_len].parse().ok()?;
        rest = &rest[number_len..];

        let unit_len = rest.find(is_number).unwrap_or(rest.len());
        let scale = match &rest[..unit_len] {
            "ns" => 1.0,
            "us" | "µs" | "μs" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 60e9,
            "h" => 3600e9,
            _ => return None,
        };
        rest = &rest[unit_len..];

        nanos += number * scale;
    }

    if !nanos.is_finite() || nanos >= u64::MAX as f64 {
        return None;
    }
    Some(Duration::from_nanos(nanos.round() as u64))
}

/// Render a duration in a form [`parse_duration`] accepts
pub(crate) fn format_duration(duration: Duration) -> String {
    if duration.subsec_nanos() == 0 {
        format!("{}s", duration.as_secs())
    } else {
        format!("{}ns", duration.as_nanos())
    }
}
