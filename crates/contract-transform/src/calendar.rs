//! End-date grouping for the calendar view.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use contract_model::ContractRecord;

/// Calendar month key: `(year, month)` with month in `1..=12`.
pub type MonthKey = (i32, u32);

/// Groups records by the month their term ends, ordered by end date then id.
///
/// Records without an end date are left out.
pub fn group_by_end_month(
    records: &[ContractRecord],
) -> BTreeMap<MonthKey, Vec<&ContractRecord>> {
    let mut months: BTreeMap<MonthKey, Vec<&ContractRecord>> = BTreeMap::new();
    for record in records {
        if let Some(end) = record.end_date {
            months.entry(month_key(end)).or_default().push(record);
        }
    }
    for entries in months.values_mut() {
        entries.sort_by_key(|record| (record.end_date, record.id));
    }
    months
}

/// Records whose term ends in the given month.
pub fn ending_in_month(
    records: &[ContractRecord],
    year: i32,
    month: u32,
) -> Vec<&ContractRecord> {
    let mut selected: Vec<&ContractRecord> = records
        .iter()
        .filter(|record| record.end_date.is_some_and(|end| month_key(end) == (year, month)))
        .collect();
    selected.sort_by_key(|record| (record.end_date, record.id));
    selected
}

fn month_key(date: NaiveDate) -> MonthKey {
    (date.year(), date.month())
}
