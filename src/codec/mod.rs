//! Report value codecs
//!
//! The report service encodes cells as text with a handful of sentinels:
//!
//! | Text | Meaning |
//! |---|---|
//! | `" --"` | the field was never set |
//! | `"Excluded"` | null by scope |
//! | `"auto"`, `"auto: 5"` | automatic strategy, optionally with a value |
//! | `"< 10%"`, `"> 90%"` | clamped percentage |
//! | `"1,234.5"` | thousands-grouped number |
//!
//! Each value type decodes those forms into a typed nullable value and
//! encodes it back to the exact same text. Clamped percentages are the one
//! lossy case: the original number is gone, only the marker is re-emitted.

mod types;
mod values;

pub use types::{Decode, Encode, ALMOST_10, ALMOST_90, AUTO, AUTO_VALUE, DOUBLE_DASH, EXCLUDED};
pub use values::{AutoExcludedInt, FormattedTime, NullableString, PercentValue, PrecisionFloat};

#[cfg(test)]
mod tests;
