//! Current import state with whole-snapshot replacement.

use chrono::NaiveDate;

use contract_model::{ContractRecord, Result};

use crate::ingest::{ImportSnapshot, SpreadsheetIngestor};

/// Holds the snapshot of the last successful import.
///
/// An import either replaces the snapshot completely or, on failure, leaves
/// it exactly as it was. `&mut self` keeps imports from overlapping.
#[derive(Debug, Default)]
pub struct ContractStore {
    ingestor: SpreadsheetIngestor,
    current: Option<ImportSnapshot>,
}

impl ContractStore {
    pub fn new(ingestor: SpreadsheetIngestor) -> Self {
        Self {
            ingestor,
            current: None,
        }
    }

    /// Imports against today's local date.
    pub fn import(&mut self, bytes: &[u8]) -> Result<&ImportSnapshot> {
        let snapshot = self.ingestor.ingest(bytes)?;
        Ok(self.replace(snapshot))
    }

    /// Imports against an explicit reference date.
    pub fn import_at(&mut self, bytes: &[u8], reference: NaiveDate) -> Result<&ImportSnapshot> {
        let snapshot = self.ingestor.ingest_at(bytes, reference)?;
        Ok(self.replace(snapshot))
    }

    /// Installs a snapshot, dropping the previous one.
    pub fn replace(&mut self, snapshot: ImportSnapshot) -> &ImportSnapshot {
        self.current.insert(snapshot)
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn snapshot(&self) -> Option<&ImportSnapshot> {
        self.current.as_ref()
    }

    pub fn records(&self) -> &[ContractRecord] {
        self.current
            .as_ref()
            .map(|snapshot| snapshot.records.as_slice())
            .unwrap_or_default()
    }
}
