//! Fetched rows

use crate::codec::Decode;
use crate::error::{Error, Result};
use crate::types::ResultSet;
use std::sync::Arc;

/// Iterator over the rows of a result set
#[derive(Debug)]
pub struct Rows {
    columns: Arc<[String]>,
    rows: std::vec::IntoIter<Vec<String>>,
}

impl Rows {
    pub(crate) fn new(result: ResultSet) -> Self {
        Self {
            columns: result.columns.into(),
            rows: result.rows.into_iter(),
        }
    }

    /// Column names
    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

impl From<ResultSet> for Rows {
    fn from(result: ResultSet) -> Self {
        Self::new(result)
    }
}

impl Iterator for Rows {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        self.rows.next().map(|values| Row {
            columns: Arc::clone(&self.columns),
            values,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

impl ExactSizeIterator for Rows {}

/// One row of report cells
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<String>,
}

impl Row {
    /// Column names
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Raw cell texts
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the row has no cells
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw text of a cell
    pub fn get_str(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    /// Decode a cell
    pub fn get<T: Decode>(&self, index: usize) -> Result<T> {
        let text = self.get_str(index).ok_or_else(|| Error::ColumnNotFound {
            column: index.to_string(),
        })?;
        T::decode(text)
    }

    /// Decode the cell of a named column
    pub fn get_by_name<T: Decode>(&self, column: &str) -> Result<T> {
        let index = self
            .columns
            .iter()
            .position(|c| c == column)
            .ok_or_else(|| Error::ColumnNotFound {
                column: column.to_string(),
            })?;
        self.get(index)
    }
}
