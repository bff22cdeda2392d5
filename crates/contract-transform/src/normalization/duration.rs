//! Calendar month arithmetic for contract terms.

use chrono::{Datelike, Months, NaiveDate};

/// Adds calendar months, clamping to the last day of the target month.
///
/// `2024-01-31 + 1` is `2024-02-29`. Returns `None` only when the result
/// leaves the representable calendar.
///
/// ```
/// use chrono::NaiveDate;
/// use contract_transform::normalization::duration::add_months;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
/// assert_eq!(add_months(start, 1), NaiveDate::from_ymd_opt(2024, 2, 29));
/// ```
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

/// `end - reference` in whole days. Positive means `end` lies ahead.
pub fn days_between(end: NaiveDate, reference: NaiveDate) -> i64 {
    (end - reference).num_days()
}

/// Number of full calendar months from `earlier` to `later`.
///
/// A month counts once `earlier + n months` (month-end clamped) is on or
/// before `later`. Negative when `later` precedes `earlier`.
pub fn months_between(later: NaiveDate, earlier: NaiveDate) -> i64 {
    if later < earlier {
        return -months_between(earlier, later);
    }
    let months = i64::from(later.year() - earlier.year()) * 12 + i64::from(later.month0())
        - i64::from(earlier.month0());
    let reached = u32::try_from(months)
        .ok()
        .and_then(|n| add_months(earlier, n))
        .is_some_and(|anchor| anchor <= later);
    if reached { months } else { months - 1 }
}

/// Full months elapsed since `start`, never negative.
pub fn elapsed_months(start: NaiveDate, reference: NaiveDate) -> u32 {
    u32::try_from(months_between(reference, start).max(0)).unwrap_or(u32::MAX)
}
