//! Tests for the value codecs

use super::*;
use crate::error::Error;
use chrono::{TimeZone, Utc};
use serde_json::json;
use test_case::test_case;

// ============================================================================
// PercentValue
// ============================================================================

#[test]
fn test_percent_double_dash_is_null() {
    let v = PercentValue::decode(" --").unwrap();
    assert_eq!(v.value, None);
    assert!(!v.approximate);
    assert!(!v.percent);
    assert_eq!(v.encode(), " --");
}

#[test]
fn test_percent_zero() {
    let v = PercentValue::decode("0.00%").unwrap();
    assert_eq!(v.value, Some(0.0));
    assert!(v.percent);
    assert!(!v.approximate);
    assert_eq!(v.encode(), "0.00%");
}

#[test]
fn test_percent_almost_10() {
    let v = PercentValue::decode("< 10%").unwrap();
    assert_eq!(v.value, Some(9.999));
    assert!(v.approximate);
    assert!(v.percent);
    assert_eq!(v.encode(), "< 10%");
}

#[test]
fn test_percent_almost_90() {
    let v = PercentValue::decode("> 90%").unwrap();
    assert_eq!(v.value, Some(90.001));
    assert!(v.approximate);
    assert!(v.percent);
    assert_eq!(v.encode(), "> 90%");
}

#[test]
fn test_percent_markers_without_suffix() {
    let v = PercentValue::decode("< 10").unwrap();
    assert!(v.approximate);
    assert!(!v.percent);
    assert_eq!(v.encode(), "< 10");

    assert_eq!(PercentValue::decode("> 90").unwrap().encode(), "> 90");
}

#[test]
fn test_percent_thousands_separator() {
    let v = PercentValue::decode("1,234.5").unwrap();
    assert_eq!(v.value, Some(1234.5));
    assert!(!v.percent);
    assert_eq!(v.encode(), "1234.50");
}

#[test_case("abc" ; "letters")]
#[test_case("" ; "empty")]
#[test_case("--" ; "dash without space")]
#[test_case(" --%" ; "dash with suffix")]
#[test_case("12.5%%" ; "double suffix")]
fn test_percent_invalid(text: &str) {
    assert!(matches!(
        PercentValue::decode(text),
        Err(Error::Codec { .. })
    ));
}

#[test_case(PercentValue::null() ; "null")]
#[test_case(PercentValue::new(0.0, true) ; "zero percent")]
#[test_case(PercentValue::new(12.34, true) ; "percent")]
#[test_case(PercentValue::new(1234.5, false) ; "plain")]
#[test_case(PercentValue::new(-3.25, false) ; "negative")]
#[test_case(PercentValue { value: Some(9.999), approximate: true, percent: true } ; "almost 10")]
#[test_case(PercentValue { value: Some(90.001), approximate: true, percent: false } ; "almost 90")]
fn test_percent_round_trip(v: PercentValue) {
    let text = v.encode();
    let back = PercentValue::decode(&text).unwrap();
    assert_eq!(back, v);
    assert_eq!(back.encode(), text);
}

// ============================================================================
// AutoExcludedInt
// ============================================================================

#[test]
fn test_auto_without_value() {
    let v = AutoExcludedInt::decode("auto").unwrap();
    assert_eq!(v.value, None);
    assert!(v.auto);
    assert!(!v.excluded);
    assert_eq!(v.encode(), "auto");
}

#[test]
fn test_auto_with_value() {
    let v = AutoExcludedInt::decode("auto: 5").unwrap();
    assert_eq!(v.value, Some(5));
    assert!(v.auto);
    assert_eq!(v.encode(), "auto: 5");
}

#[test]
fn test_excluded() {
    let v = AutoExcludedInt::decode("Excluded").unwrap();
    assert!(v.excluded);
    assert_eq!(v.value, None);
    assert_eq!(v.encode(), "Excluded");
}

#[test]
fn test_int_double_dash() {
    let v = AutoExcludedInt::decode(" --").unwrap();
    assert_eq!(v, AutoExcludedInt::default());
    assert!(!v.auto);
    assert!(!v.excluded);
    assert_eq!(v.encode(), " --");
}

#[test]
fn test_int_plain_and_grouped() {
    assert_eq!(
        AutoExcludedInt::decode("42").unwrap(),
        AutoExcludedInt::new(42)
    );
    assert_eq!(
        AutoExcludedInt::decode("1,234,567").unwrap(),
        AutoExcludedInt::new(1_234_567)
    );
    assert_eq!(AutoExcludedInt::new(-7).encode(), "-7");
}

#[test]
fn test_auto_with_trailing_space_only() {
    let v = AutoExcludedInt::decode("auto ").unwrap();
    assert_eq!(v, AutoExcludedInt::auto(None));
}

#[test]
fn test_excluded_takes_priority_on_encode() {
    let v = AutoExcludedInt {
        value: Some(3),
        auto: true,
        excluded: true,
    };
    assert_eq!(v.encode(), "Excluded");
}

#[test_case("auto:" ; "colon without space")]
#[test_case("auto: x" ; "non numeric override")]
#[test_case("automatic" ; "longer word")]
#[test_case("12.5" ; "float")]
#[test_case("" ; "empty")]
fn test_int_invalid(text: &str) {
    assert!(matches!(
        AutoExcludedInt::decode(text),
        Err(Error::Codec { .. })
    ));
}

#[test_case(AutoExcludedInt::default() ; "null")]
#[test_case(AutoExcludedInt::new(0) ; "zero")]
#[test_case(AutoExcludedInt::new(-12) ; "negative")]
#[test_case(AutoExcludedInt::auto(None) ; "auto")]
#[test_case(AutoExcludedInt::auto(Some(250)) ; "auto with value")]
#[test_case(AutoExcludedInt::excluded() ; "excluded")]
fn test_int_round_trip(v: AutoExcludedInt) {
    let text = v.encode();
    assert_eq!(AutoExcludedInt::decode(&text).unwrap(), v);
}

// ============================================================================
// Encode-only values
// ============================================================================

#[test_case(1.0 / 3.0, 2, "0.33")]
#[test_case(2.4, 0, "2")]
#[test_case(10.0, 3, "10.000")]
#[test_case(-1.23456, 4, "-1.2346")]
fn test_precision_float(value: f64, precision: usize, expected: &str) {
    assert_eq!(PrecisionFloat::new(value, precision).encode(), expected);
}

#[test]
fn test_nullable_string() {
    assert_eq!(NullableString::null().encode(), " --");
    assert_eq!(NullableString::new("Brand").encode(), "Brand");
    assert_eq!(NullableString::new("").encode(), "");
    assert_eq!(NullableString::from(None).encode(), " --");
}

#[test]
fn test_formatted_time() {
    let instant = Utc.with_ymd_and_hms(2017, 6, 1, 13, 5, 0).unwrap();

    let t = FormattedTime::new(Some(instant), "%Y-%m-%d").unwrap();
    assert_eq!(t.encode(), "2017-06-01");

    let t = FormattedTime::new(Some(instant), "%Y/%m/%d %H:%M:%S").unwrap();
    assert_eq!(t.encode(), "2017/06/01 13:05:00");

    let unset = FormattedTime::new(None, "%Y-%m-%d").unwrap();
    assert_eq!(unset.encode(), " --");
}

#[test]
fn test_formatted_time_invalid_layout() {
    let result = FormattedTime::new(None, "%Y-%");
    assert!(matches!(result, Err(Error::Codec { .. })));
}

// ============================================================================
// Source values
// ============================================================================

#[test]
fn test_decode_value_requires_string() {
    assert_eq!(
        PercentValue::decode_value(&json!("12.00%")).unwrap(),
        PercentValue::new(12.0, true)
    );
    assert!(matches!(
        PercentValue::decode_value(&json!(12.0)),
        Err(Error::Codec { .. })
    ));
    assert!(matches!(
        AutoExcludedInt::decode_value(&json!(null)),
        Err(Error::Codec { .. })
    ));
}

#[test]
fn test_plain_decoders() {
    assert_eq!(String::decode(" --").unwrap(), " --");
    assert_eq!(i64::decode("1,024").unwrap(), 1024);
    assert_eq!(f64::decode("3.5%").unwrap(), 3.5);
    assert!(i64::decode(" --").is_err());
}
