#![deny(unsafe_code)]

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single spreadsheet cell as delivered by the workbook decoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Missing,
    Text(String),
    Number(f64),
    Boolean(bool),
    DateValue(NaiveDateTime),
}

static MISSING: CellValue = CellValue::Missing;

impl CellValue {
    /// Missing cells and text cells holding only whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Missing => true,
            CellValue::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }

    /// Display form used by the raw-data view and for text-typed fields.
    ///
    /// Returns `None` for blank cells.
    pub fn display_text(&self) -> Option<String> {
        match self {
            CellValue::Missing => None,
            CellValue::Text(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            CellValue::Number(value) => Some(format_number(*value)),
            CellValue::Boolean(value) => Some(value.to_string()),
            CellValue::DateValue(value) => Some(value.date().format("%Y-%m-%d").to_string()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Boolean(value)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(value: NaiveDateTime) -> Self {
        CellValue::DateValue(value)
    }
}

/// Formats a number without a trailing `.0` for integral values.
fn format_number(value: f64) -> String {
    let s = format!("{value}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

/// Header to cell mapping for one data row of the first worksheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    pub cells: BTreeMap<String, CellValue>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a column; absent keys read as [`CellValue::Missing`].
    pub fn get(&self, header: &str) -> &CellValue {
        self.cells.get(header).unwrap_or(&MISSING)
    }

    pub fn insert(&mut self, header: impl Into<String>, value: CellValue) {
        self.cells.insert(header.into(), value);
    }

    #[must_use]
    pub fn with(mut self, header: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(header, value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when the row holds no cells; whitespace text still counts as a cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_column_reads_as_missing() {
        let row = RawRow::new().with("Name", "Zoom Pro");
        assert_eq!(row.get("Status"), &CellValue::Missing);
        assert_eq!(row.get("Name"), &CellValue::Text("Zoom Pro".to_string()));
    }

    #[test]
    fn display_text_formats_numbers_compactly() {
        assert_eq!(CellValue::Number(12.0).display_text().as_deref(), Some("12"));
        assert_eq!(CellValue::Number(9.5).display_text().as_deref(), Some("9.5"));
        assert_eq!(CellValue::Text("   ".into()).display_text(), None);
    }

    #[test]
    fn whitespace_row_is_not_empty() {
        assert!(RawRow::new().is_empty());
        let row = RawRow::new().with("A", "  ");
        assert!(!row.is_empty());
        assert!(row.get("A").is_blank());
    }
}
