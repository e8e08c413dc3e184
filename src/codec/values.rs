//! Value types
//!
//! `PercentValue` and `AutoExcludedInt` decode and encode. `PrecisionFloat`,
//! `NullableString` and `FormattedTime` only encode.

use super::types::{Decode, Encode, ALMOST_10, ALMOST_90, AUTO, AUTO_VALUE, DOUBLE_DASH, EXCLUDED};
use crate::error::{Error, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};

/// Value standing in for `< 10%`
const ALMOST_10_VALUE: f64 = 9.999;

/// Value standing in for `> 90%`
const ALMOST_90_VALUE: f64 = 90.001;

// ============================================================================
// Percent
// ============================================================================

/// Nullable float that may be a percentage or a clamped boundary marker
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PercentValue {
    /// The number, `None` when never set
    pub value: Option<f64>,
    /// Decoded from `< 10` or `> 90`
    pub approximate: bool,
    /// The text carried a `%` suffix
    pub percent: bool,
}

impl PercentValue {
    /// Exact value
    pub fn new(value: f64, percent: bool) -> Self {
        Self {
            value: Some(value),
            approximate: false,
            percent,
        }
    }

    /// Never set
    pub fn null() -> Self {
        Self::default()
    }

    /// Whether a value is present
    pub fn is_valid(&self) -> bool {
        self.value.is_some()
    }
}

impl Decode for PercentValue {
    fn decode(text: &str) -> Result<Self> {
        if text == DOUBLE_DASH {
            return Ok(Self::null());
        }

        let (number, percent) = match text.strip_suffix('%') {
            Some(stripped) => (stripped, true),
            None => (text, false),
        };

        let (value, approximate) = match number {
            ALMOST_10 => (ALMOST_10_VALUE, true),
            ALMOST_90 => (ALMOST_90_VALUE, true),
            _ => (parse_grouped::<f64>(text, number)?, false),
        };

        Ok(Self {
            value: Some(value),
            approximate,
            percent,
        })
    }
}

impl Encode for PercentValue {
    fn encode(&self) -> String {
        let Some(value) = self.value else {
            return DOUBLE_DASH.to_string();
        };

        let mut text = if !self.approximate {
            format!("{value:.2}")
        } else if value > 90.0 {
            ALMOST_90.to_string()
        } else {
            ALMOST_10.to_string()
        };

        if self.percent {
            text.push('%');
        }
        text
    }
}

// ============================================================================
// Auto / Excluded integer
// ============================================================================

/// Nullable integer that may be excluded or set by an automatic strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AutoExcludedInt {
    /// The number, `None` when never set or automatic without override
    pub value: Option<i64>,
    /// Set by an automatic strategy
    pub auto: bool,
    /// Null by scope
    pub excluded: bool,
}

impl AutoExcludedInt {
    /// Explicit value
    pub fn new(value: i64) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }

    /// Automatic strategy, optionally with its value
    pub fn auto(value: Option<i64>) -> Self {
        Self {
            value,
            auto: true,
            excluded: false,
        }
    }

    /// Null by scope
    pub fn excluded() -> Self {
        Self {
            excluded: true,
            ..Self::default()
        }
    }

    /// Whether a value is present
    pub fn is_valid(&self) -> bool {
        self.value.is_some()
    }
}

impl Decode for AutoExcludedInt {
    fn decode(text: &str) -> Result<Self> {
        if text == DOUBLE_DASH {
            return Ok(Self::default());
        }
        if text == EXCLUDED {
            return Ok(Self::excluded());
        }

        let Some(rest) = text.strip_prefix(AUTO) else {
            return Ok(Self::new(parse_grouped::<i64>(text, text)?));
        };

        let rest = text
            .strip_prefix(AUTO_VALUE)
            .unwrap_or(rest)
            .trim();
        if rest.is_empty() {
            return Ok(Self::auto(None));
        }

        Ok(Self::auto(Some(parse_grouped::<i64>(text, rest)?)))
    }
}

impl Encode for AutoExcludedInt {
    fn encode(&self) -> String {
        if self.excluded {
            return EXCLUDED.to_string();
        }
        match (self.auto, self.value) {
            (true, None) => AUTO.to_string(),
            (true, Some(value)) => format!("{AUTO_VALUE}{value}"),
            (false, None) => DOUBLE_DASH.to_string(),
            (false, Some(value)) => value.to_string(),
        }
    }
}

// ============================================================================
// Encode-only values
// ============================================================================

/// Float rendered with a fixed number of fractional digits
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PrecisionFloat {
    /// The number
    pub value: f64,
    /// Fractional digits
    pub precision: usize,
}

impl PrecisionFloat {
    /// Create a float with its precision
    pub fn new(value: f64, precision: usize) -> Self {
        Self { value, precision }
    }
}

impl Encode for PrecisionFloat {
    fn encode(&self) -> String {
        format!("{:.*}", self.precision, self.value)
    }
}

/// String that may be null
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NullableString {
    /// The string, `None` when never set
    pub value: Option<String>,
}

impl NullableString {
    /// Present string
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
        }
    }

    /// Never set
    pub fn null() -> Self {
        Self::default()
    }
}

impl From<Option<String>> for NullableString {
    fn from(value: Option<String>) -> Self {
        Self { value }
    }
}

impl Encode for NullableString {
    fn encode(&self) -> String {
        match &self.value {
            Some(value) => value.clone(),
            None => DOUBLE_DASH.to_string(),
        }
    }
}

/// Instant rendered with a strftime layout, `None` when unset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedTime {
    instant: Option<DateTime<Utc>>,
    layout: String,
}

impl FormattedTime {
    /// Create a time value; fails if the layout is not a valid strftime format
    pub fn new(instant: Option<DateTime<Utc>>, layout: impl Into<String>) -> Result<Self> {
        let layout = layout.into();
        if StrftimeItems::new(&layout).any(|item| matches!(item, Item::Error)) {
            return Err(Error::codec(layout, "invalid time layout"));
        }
        Ok(Self { instant, layout })
    }

    /// The instant, if set
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        self.instant
    }

    /// The strftime layout
    pub fn layout(&self) -> &str {
        &self.layout
    }
}

impl Encode for FormattedTime {
    fn encode(&self) -> String {
        match self.instant {
            Some(instant) => instant.format(&self.layout).to_string(),
            None => DOUBLE_DASH.to_string(),
        }
    }
}

// ============================================================================
// Plain values
// ============================================================================

impl Decode for String {
    fn decode(text: &str) -> Result<Self> {
        Ok(text.to_string())
    }
}

impl Decode for i64 {
    fn decode(text: &str) -> Result<Self> {
        parse_grouped(text, text)
    }
}

impl Decode for f64 {
    fn decode(text: &str) -> Result<Self> {
        parse_grouped(text, text.strip_suffix('%').unwrap_or(text))
    }
}

/// Parse a number that may use `,` as thousands separator
fn parse_grouped<T: std::str::FromStr>(original: &str, number: &str) -> Result<T> {
    number
        .replace(',', "")
        .parse()
        .map_err(|_| Error::codec(original, "not a recognized sentinel or number"))
}
