use std::time::Instant;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{debug, info, info_span, warn};

use contract_model::{ContractRecord, FieldWarning, IngestOptions, RawRow, Result};
use contract_transform::ContractNormalizer;

use crate::workbook::read_first_sheet;

/// Everything one import produces. Replaces any previous snapshot as a whole.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSnapshot {
    /// Records in file row order, ids `1..=N`.
    pub records: Vec<ContractRecord>,
    /// All headers of the first row, in column order.
    pub headers: Vec<String>,
    /// Headers from the raw-view offset onward.
    pub raw_headers: Vec<String>,
    /// Untouched rows, parallel to `records`.
    pub raw_rows: Vec<RawRow>,
    /// Per-row defaulting diagnostics, parallel to `records`.
    pub warnings: Vec<Vec<FieldWarning>>,
    /// Date the lifecycle fields were computed against.
    pub reference: NaiveDate,
    pub sheet_name: String,
}

impl ImportSnapshot {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.iter().map(Vec::len).sum()
    }

    pub fn record(&self, id: u32) -> Option<&ContractRecord> {
        let index = usize::try_from(id).ok()?.checked_sub(1)?;
        self.records.get(index)
    }
}

/// Decodes workbooks and drives their rows through the normalizer.
#[derive(Debug, Clone, Default)]
pub struct SpreadsheetIngestor {
    normalizer: ContractNormalizer,
}

impl SpreadsheetIngestor {
    pub fn new(options: IngestOptions) -> Self {
        Self {
            normalizer: ContractNormalizer::new(options),
        }
    }

    pub fn options(&self) -> &IngestOptions {
        self.normalizer.options()
    }

    /// Imports against today's local calendar date.
    pub fn ingest(&self, bytes: &[u8]) -> Result<ImportSnapshot> {
        self.ingest_at(bytes, Local::now().date_naive())
    }

    /// Imports against an explicit reference date.
    ///
    /// Only a workbook that cannot be decoded fails; malformed cells are
    /// defaulted and every row yields a record.
    pub fn ingest_at(&self, bytes: &[u8], reference: NaiveDate) -> Result<ImportSnapshot> {
        let span = info_span!("ingest", bytes = bytes.len(), reference = %reference);
        let _guard = span.enter();
        let start = Instant::now();

        let options = self.options();
        let sheet = read_first_sheet(bytes, options.skip_blank_rows).inspect_err(|error| {
            warn!(%error, "workbook decode failed");
        })?;

        let mut records = Vec::with_capacity(sheet.rows.len());
        let mut warnings = Vec::with_capacity(sheet.rows.len());
        for (index, row) in sheet.rows.iter().enumerate() {
            let normalized = self.normalizer.normalize_with_warnings(row, index, reference);
            for warning in &normalized.warnings {
                debug!(row = normalized.record.id, %warning, "field defaulted");
            }
            records.push(normalized.record);
            warnings.push(normalized.warnings);
        }

        let raw_headers = sheet
            .headers
            .iter()
            .skip(options.raw_header_offset)
            .cloned()
            .collect();
        let snapshot = ImportSnapshot {
            records,
            headers: sheet.headers,
            raw_headers,
            raw_rows: sheet.rows,
            warnings,
            reference,
            sheet_name: sheet.sheet_name,
        };
        info!(
            sheet = %snapshot.sheet_name,
            records = snapshot.len(),
            columns = snapshot.headers.len(),
            warnings = snapshot.warning_count(),
            duration_ms = start.elapsed().as_millis(),
            "import complete"
        );
        Ok(snapshot)
    }
}

/// Imports with default options against today's date.
pub fn ingest(bytes: &[u8]) -> Result<ImportSnapshot> {
    SpreadsheetIngestor::default().ingest(bytes)
}

/// Imports with default options against an explicit reference date.
pub fn ingest_at(bytes: &[u8], reference: NaiveDate) -> Result<ImportSnapshot> {
    SpreadsheetIngestor::default().ingest_at(bytes, reference)
}
