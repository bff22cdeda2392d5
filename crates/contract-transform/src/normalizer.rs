//! Row to contract record normalization.
//!
//! Every field degrades to a documented default instead of failing, so each
//! input row yields exactly one record:
//!
//! | Field | Source | Default |
//! |---|---|---|
//! | name | name column, trimmed | `IngestOptions::default_name` |
//! | status | status column, trimmed | `IngestOptions::default_status` |
//! | start date | start column via the date parser | absent |
//! | duration | duration column, coerced | 0 (negatives clamp to 0) |
//!
//! End date, days remaining and elapsed months are derived from the start
//! date, the duration and an explicit reference date.

use chrono::NaiveDate;
use serde::Serialize;

use contract_model::{CellValue, ContractRecord, FieldWarning, IngestOptions, RawRow};

use crate::normalization::datetime::{DateParseFailure, parse_date_cell};
use crate::normalization::duration::{add_months, days_between, elapsed_months};
use crate::normalization::numeric::coerce_duration_months;

/// A record together with the fields that were defaulted while building it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRow {
    pub record: ContractRecord,
    pub warnings: Vec<FieldWarning>,
}

/// Maps raw rows to [`ContractRecord`]s using a fixed set of options.
#[derive(Debug, Clone, Default)]
pub struct ContractNormalizer {
    options: IngestOptions,
}

impl ContractNormalizer {
    pub fn new(options: IngestOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &IngestOptions {
        &self.options
    }

    /// Normalizes one row. `row_index` is 0-based; the record id is `row_index + 1`.
    pub fn normalize(
        &self,
        row: &RawRow,
        row_index: usize,
        reference: NaiveDate,
    ) -> ContractRecord {
        self.normalize_with_warnings(row, row_index, reference).record
    }

    /// Same as [`normalize`](Self::normalize), also reporting defaulted fields.
    pub fn normalize_with_warnings(
        &self,
        row: &RawRow,
        row_index: usize,
        reference: NaiveDate,
    ) -> NormalizedRow {
        let columns = &self.options.columns;
        let mut warnings = Vec::new();

        let name = text_or_default(row.get(&columns.name), &self.options.default_name)
            .unwrap_or_else(|default| {
                warnings.push(FieldWarning::MissingName);
                default
            });
        let status = text_or_default(row.get(&columns.status), &self.options.default_status)
            .unwrap_or_else(|default| {
                warnings.push(FieldWarning::MissingStatus);
                default
            });

        let duration = coerce_duration_months(row.get(&columns.duration_months));
        warnings.extend(duration.warning);
        let duration_months = duration.months;

        let start_cell = row.get(&columns.start_date);
        let dates = match parse_date_cell(start_cell) {
            Ok(start) => match add_months(start, duration_months) {
                Some(end) => Some((start, end)),
                None => {
                    warnings.push(unparseable(start_cell));
                    None
                }
            },
            Err(DateParseFailure::Empty) => {
                warnings.push(FieldWarning::MissingStartDate);
                None
            }
            Err(_) => {
                warnings.push(unparseable(start_cell));
                None
            }
        };

        let (start_date, end_date, days_remaining, elapsed) = match dates {
            Some((start, end)) => (
                Some(start),
                Some(end),
                days_between(end, reference),
                elapsed_months(start, reference),
            ),
            None => (None, None, 0, 0),
        };

        let record = ContractRecord {
            id: record_id(row_index),
            name,
            status,
            start_date,
            end_date,
            duration_months,
            days_remaining,
            elapsed_months: elapsed,
        };
        NormalizedRow { record, warnings }
    }
}

/// Normalizes a row with default options.
pub fn normalize_row(row: &RawRow, row_index: usize, reference: NaiveDate) -> ContractRecord {
    ContractNormalizer::default().normalize(row, row_index, reference)
}

fn record_id(row_index: usize) -> u32 {
    u32::try_from(row_index)
        .unwrap_or(u32::MAX - 1)
        .saturating_add(1)
}

/// `Ok(text)` for a non-blank cell, `Err(default)` otherwise.
fn text_or_default(cell: &CellValue, default: &str) -> Result<String, String> {
    cell.display_text().ok_or_else(|| default.to_string())
}

fn unparseable(cell: &CellValue) -> FieldWarning {
    FieldWarning::UnparseableStartDate {
        value: cell.display_text().unwrap_or_default(),
    }
}
