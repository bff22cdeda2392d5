//! Lifecycle classification of contract records.
//!
//! Expiry is checked before status, so an `online` contract whose end date
//! has passed is [`Classification::Expired`], never active.

use chrono::NaiveDate;
use serde::Serialize;

use contract_model::{Classification, ContractRecord, MetricThresholds};

use crate::normalization::duration::days_between;

/// Classifies a day count and status.
pub fn classify_days(
    days_remaining: i64,
    is_online: bool,
    thresholds: MetricThresholds,
) -> Classification {
    if days_remaining <= 0 {
        Classification::Expired
    } else if days_remaining <= thresholds.due_soon_days {
        Classification::DueSoon
    } else if is_online {
        Classification::ActiveOnline
    } else {
        Classification::Other
    }
}

/// Classifies a record using the days remaining computed at import time.
pub fn classify(record: &ContractRecord, thresholds: MetricThresholds) -> Classification {
    classify_days(record.days_remaining, record.is_online(), thresholds)
}

/// Days remaining relative to another reference date; 0 without an end date.
pub fn days_remaining_at(record: &ContractRecord, now: NaiveDate) -> i64 {
    record
        .end_date
        .map_or(0, |end| days_between(end, now))
}

/// Classifies a record against a new reference date.
pub fn classify_at(
    record: &ContractRecord,
    now: NaiveDate,
    thresholds: MetricThresholds,
) -> Classification {
    classify_days(days_remaining_at(record, now), record.is_online(), thresholds)
}

pub fn is_expired(record: &ContractRecord, now: NaiveDate) -> bool {
    days_remaining_at(record, now) <= 0
}

pub fn is_due_soon(record: &ContractRecord, now: NaiveDate, thresholds: MetricThresholds) -> bool {
    classify_at(record, now, thresholds) == Classification::DueSoon
}

pub fn is_active(record: &ContractRecord, now: NaiveDate, thresholds: MetricThresholds) -> bool {
    classify_at(record, now, thresholds) == Classification::ActiveOnline
}

/// Per-classification counts for a record collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractStats {
    pub total: usize,
    pub expired: usize,
    pub due_soon: usize,
    pub active_online: usize,
    pub other: usize,
}

impl ContractStats {
    pub fn from_records(records: &[ContractRecord], thresholds: MetricThresholds) -> Self {
        Self::tally(records.iter().map(|record| classify(record, thresholds)))
    }

    pub fn from_records_at(
        records: &[ContractRecord],
        now: NaiveDate,
        thresholds: MetricThresholds,
    ) -> Self {
        Self::tally(
            records
                .iter()
                .map(|record| classify_at(record, now, thresholds)),
        )
    }

    fn tally(classes: impl Iterator<Item = Classification>) -> Self {
        let mut stats = Self::default();
        for class in classes {
            stats.total += 1;
            match class {
                Classification::Expired => stats.expired += 1,
                Classification::DueSoon => stats.due_soon += 1,
                Classification::ActiveOnline => stats.active_online += 1,
                Classification::Other => stats.other += 1,
            }
        }
        stats
    }

    pub fn count(&self, class: Classification) -> usize {
        match class {
            Classification::Expired => self.expired,
            Classification::DueSoon => self.due_soon,
            Classification::ActiveOnline => self.active_online,
            Classification::Other => self.other,
        }
    }
}
