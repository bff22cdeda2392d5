//! Configuration options for contract import and classification.

use serde::{Deserialize, Serialize};

/// Header names the normalizer reads from each row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnNames {
    pub name: String,
    pub status: String,
    pub start_date: String,
    pub duration_months: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            name: "Name".to_string(),
            status: "Status".to_string(),
            start_date: "Startdatum".to_string(),
            duration_months: "Laufzeit in M".to_string(),
        }
    }
}

/// Options for turning a workbook into contract records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestOptions {
    /// Source column names.
    pub columns: ColumnNames,

    /// Name used when the name cell is missing or blank.
    pub default_name: String,

    /// Status used when the status cell is missing or blank.
    pub default_status: String,

    /// First column position shown in the raw-data view.
    /// Default: 4 (the four contract columns are rendered by the main table).
    pub raw_header_offset: usize,

    /// Drop rows with no non-empty cells. Rows holding only whitespace are kept.
    /// Default: true.
    pub skip_blank_rows: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            columns: ColumnNames::default(),
            default_name: "Unbenannt".to_string(),
            default_status: crate::STATUS_ONLINE.to_string(),
            raw_header_offset: 4,
            skip_blank_rows: true,
        }
    }
}

impl IngestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_columns(mut self, columns: ColumnNames) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_default_name(mut self, name: impl Into<String>) -> Self {
        self.default_name = name.into();
        self
    }

    pub fn with_raw_header_offset(mut self, offset: usize) -> Self {
        self.raw_header_offset = offset;
        self
    }

    pub fn with_skip_blank_rows(mut self, skip: bool) -> Self {
        self.skip_blank_rows = skip;
        self
    }
}

/// Thresholds for lifecycle classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricThresholds {
    /// Contracts ending within this many days are "due soon".
    pub due_soon_days: i64,
}

impl Default for MetricThresholds {
    fn default() -> Self {
        Self { due_soon_days: 30 }
    }
}
