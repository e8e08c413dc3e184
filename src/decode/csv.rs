//! CSV report decoding

use crate::error::{Error, Result};
use crate::types::ResultSet;

/// Field separator of report downloads
pub const FIELD_DELIMITER: char = ',';

/// Decode a CSV report into a result set
///
/// With `has_header` the first record names the columns, otherwise the
/// columns are named `column_0`, `column_1`, ...
pub fn parse_report(body: &str, has_header: bool) -> Result<ResultSet> {
    let mut records = parse_csv(body)?.into_iter();

    let (columns, rows): (Vec<String>, Vec<Vec<String>>) = if has_header {
        match records.next() {
            Some(header) => (header, records.collect()),
            None => return Ok(ResultSet::default()),
        }
    } else {
        let rows: Vec<Vec<String>> = records.collect();
        let width = rows.first().map_or(0, Vec::len);
        ((0..width).map(|i| format!("column_{i}")).collect(), rows)
    };

    for (i, row) in rows.iter().enumerate() {
        if row.len() != columns.len() {
            return Err(Error::CsvParse {
                message: format!(
                    "row {} has {} fields, expected {}",
                    i + 1,
                    row.len(),
                    columns.len()
                ),
            });
        }
    }

    Ok(ResultSet::new(columns, rows))
}

/// Split a CSV body into records
///
/// Quoted fields may contain delimiters, newlines and doubled quotes.
/// Fields are not trimmed. Blank lines are skipped and both `\n` and
/// `\r\n` end a record.
pub fn parse_csv(body: &str) -> Result<Vec<Vec<String>>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut quote_line = 0;
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => {
                in_quotes = true;
                quote_line = line;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                end_record(&mut records, &mut record, &mut field);
                line += 1;
            }
            FIELD_DELIMITER => record.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(Error::CsvParse {
            message: format!("unterminated quoted field starting on line {quote_line}"),
        });
    }

    if !record.is_empty() || !field.is_empty() {
        end_record(&mut records, &mut record, &mut field);
    }

    Ok(records)
}

fn end_record(records: &mut Vec<Vec<String>>, record: &mut Vec<String>, field: &mut String) {
    record.push(std::mem::take(field));
    let record = std::mem::take(record);
    // Blank line
    if record.len() == 1 && record[0].is_empty() {
        return;
    }
    records.push(record);
}
