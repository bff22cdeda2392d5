//! Contract spreadsheet ingestion.
//!
//! Bytes in, [`ImportSnapshot`] out: the first worksheet is decoded into raw
//! rows, every row is normalized into a contract record, and the result is
//! published as one snapshot.

pub mod ingest;
pub mod sample;
pub mod store;
pub mod workbook;

pub use ingest::{ImportSnapshot, SpreadsheetIngestor, ingest, ingest_at};
pub use sample::{SAMPLE_HEADERS, SAMPLE_ROW_COUNT, sample_workbook};
pub use store::ContractStore;
pub use workbook::{SheetTable, read_first_sheet, unique_headers};
