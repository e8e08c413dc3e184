//! Codec traits and sentinels

use crate::error::{Error, Result};
use crate::types::JsonValue;

/// Prefix, or whole value, marking an automatic strategy
pub const AUTO: &str = "auto";

/// Prefix of an automatic strategy carrying a value
pub const AUTO_VALUE: &str = "auto: ";

/// Null by scope
pub const EXCLUDED: &str = "Excluded";

/// Never set
pub const DOUBLE_DASH: &str = " --";

/// Clamped low percentage, without the `%` suffix
pub const ALMOST_10: &str = "< 10";

/// Clamped high percentage, without the `%` suffix
pub const ALMOST_90: &str = "> 90";

/// Typed value decodable from report text
pub trait Decode: Sized {
    /// Decode a cell
    fn decode(text: &str) -> Result<Self>;

    /// Decode a value that should hold report text
    fn decode_value(value: &JsonValue) -> Result<Self> {
        match value {
            JsonValue::String(text) => Self::decode(text),
            other => Err(Error::codec(other.to_string(), "expected a string value")),
        }
    }
}

/// Typed value encodable to report text
pub trait Encode {
    /// Encode to the text the service would send
    fn encode(&self) -> String;
}
