//! Normalized contract records and their lifecycle classification.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Status tag that marks a contract as live; every other value is opaque.
pub const STATUS_ONLINE: &str = "online";

/// One normalized spreadsheet row.
///
/// `end_date` is present exactly when `start_date` is, and the computed
/// fields are derived from the dates, the duration and the reference date
/// used at import time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractRecord {
    /// 1-based row position within one import.
    pub id: u32,
    pub name: String,
    pub status: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub duration_months: u32,
    /// `end_date - reference` in whole days; negative once expired, 0 without dates.
    pub days_remaining: i64,
    /// Full calendar months since `start_date`; 0 without a start date.
    pub elapsed_months: u32,
}

impl ContractRecord {
    pub fn is_online(&self) -> bool {
        self.status == STATUS_ONLINE
    }

    pub fn has_dates(&self) -> bool {
        self.start_date.is_some()
    }
}

/// Lifecycle bucket used for badges and the stats tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Classification {
    Expired,
    DueSoon,
    ActiveOnline,
    Other,
}

impl Classification {
    pub const ALL: [Classification; 4] = [
        Classification::Expired,
        Classification::DueSoon,
        Classification::ActiveOnline,
        Classification::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Classification::Expired => "expired",
            Classification::DueSoon => "due soon",
            Classification::ActiveOnline => "active",
            Classification::Other => "other",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
