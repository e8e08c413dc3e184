//! Common types used throughout adwql
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

// ============================================================================
// Result Set
// ============================================================================

/// A fetched report: column names plus the raw text of every cell.
///
/// This is the payload stored by the result cache. Cells are kept exactly as
/// the service sent them so the value codecs see the original sentinels.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResultSet {
    /// Column names, either from the report header row or generated
    pub columns: Vec<String>,
    /// Data rows, each with one entry per column
    pub rows: Vec<Vec<String>>,
}

impl ResultSet {
    /// Create a result set
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the report had no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_set_serde() {
        let set = ResultSet::new(
            vec!["CampaignId".to_string(), "Ctr".to_string()],
            vec![vec!["42".to_string(), " --".to_string()]],
        );
        let json = serde_json::to_string(&set).unwrap();
        let back: ResultSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
        assert_eq!(back.len(), 1);
        assert!(!back.is_empty());
        assert!(ResultSet::default().is_empty());
    }
}
