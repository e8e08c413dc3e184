//! Tests for decoder module

use super::*;
use crate::error::Error;
use pretty_assertions::assert_eq;

// ============================================================================
// CSV Tests
// ============================================================================

#[test]
fn test_parse_report_with_header() {
    let body = "Campaign ID,Campaign,Ctr\n42,Brand,1.20%\n43,Generic, --\n";
    let set = parse_report(body, true).unwrap();

    assert_eq!(set.columns, vec!["Campaign ID", "Campaign", "Ctr"]);
    assert_eq!(set.rows.len(), 2);
    assert_eq!(set.rows[0], vec!["42", "Brand", "1.20%"]);
    // Sentinels keep their leading space
    assert_eq!(set.rows[1][2], " --");
}

#[test]
fn test_parse_report_without_header() {
    let body = "42,Brand\n43,Generic\n";
    let set = parse_report(body, false).unwrap();

    assert_eq!(set.columns, vec!["column_0", "column_1"]);
    assert_eq!(set.rows.len(), 2);
}

#[test]
fn test_parse_report_empty_body() {
    let set = parse_report("", true).unwrap();
    assert!(set.columns.is_empty());
    assert!(set.is_empty());

    let set = parse_report("", false).unwrap();
    assert!(set.columns.is_empty());
}

#[test]
fn test_parse_report_header_only() {
    let set = parse_report("Campaign ID,Clicks\n", true).unwrap();
    assert_eq!(set.columns, vec!["Campaign ID", "Clicks"]);
    assert!(set.is_empty());
}

#[test]
fn test_parse_report_ragged_row() {
    let result = parse_report("a,b\n1,2\n3\n", true);
    assert!(matches!(result, Err(Error::CsvParse { .. })));
}

#[test]
fn test_parse_csv_quoted_fields() {
    let records = parse_csv("\"1,234\",\"say \"\"hi\"\"\",plain\n").unwrap();
    assert_eq!(records, vec![vec!["1,234", "say \"hi\"", "plain"]]);
}

#[test]
fn test_parse_csv_quoted_newline() {
    let records = parse_csv("\"line one\nline two\",x\n").unwrap();
    assert_eq!(records, vec![vec!["line one\nline two", "x"]]);
}

#[test]
fn test_parse_csv_crlf_and_blank_lines() {
    let records = parse_csv("a,b\r\n\r\n1,2\r\n").unwrap();
    assert_eq!(records, vec![vec!["a", "b"], vec!["1", "2"]]);
}

#[test]
fn test_parse_csv_no_trailing_newline() {
    let records = parse_csv("a,b\n1,").unwrap();
    assert_eq!(records, vec![vec!["a", "b"], vec!["1", ""]]);
}

#[test]
fn test_parse_csv_only_splits_on_commas() {
    let records = parse_csv("a\tb;c d,e\n").unwrap();
    assert_eq!(records, vec![vec!["a\tb;c d", "e"]]);
}

#[test]
fn test_parse_csv_unterminated_quote() {
    let result = parse_csv("a,b\n\"open,1\n");
    match result {
        Err(Error::CsvParse { message }) => assert!(message.contains("line 2")),
        other => panic!("expected CsvParse error, got {other:?}"),
    }
}

// ============================================================================
// XML Error Tests
// ============================================================================

#[test]
fn test_parse_api_error() {
    let body = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<reportDownloadError><ApiError><type>ReportDefinitionError.INVALID_FIELD_NAME_FOR_REPORT</type><trigger>Foo&amp;Bar</trigger><fieldPath></fieldPath></ApiError></reportDownloadError>"#;

    match parse_api_error(body) {
        Some(Error::Api {
            error_type,
            trigger,
            field_path,
        }) => {
            assert_eq!(
                error_type,
                "ReportDefinitionError.INVALID_FIELD_NAME_FOR_REPORT"
            );
            assert_eq!(trigger, "Foo&Bar");
            assert_eq!(field_path, "");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[test]
fn test_parse_api_error_self_closing_elements() {
    let body = "<reportDownloadError><ApiError><type>AuthenticationError.OAUTH_TOKEN_INVALID</type><trigger/><fieldPath/></ApiError></reportDownloadError>";

    let err = parse_api_error(body).unwrap();
    assert!(matches!(err, Error::Api { ref trigger, .. } if trigger.is_empty()));
}

#[test]
fn test_parse_api_error_other_documents() {
    assert!(parse_api_error("Internal Server Error").is_none());
    assert!(parse_api_error("<html><body>Bad gateway</body></html>").is_none());
    assert!(parse_api_error("<reportDownloadError></reportDownloadError>").is_none());
}
