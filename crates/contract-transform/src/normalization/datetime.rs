//! Calendar date resolution for spreadsheet cells.
//!
//! A cell becomes a date through the first rule that succeeds:
//!
//! 1. native date values from the decoder are taken as-is
//! 2. numbers are spreadsheet serials counted from 1899-12-30
//! 3. strings containing `T` or `Z` are tried as ISO 8601 date-times
//! 4. strings are matched against a fixed, ordered list of layouts
//! 5. a looser set of free-form layouts is tried last
//!
//! Ambiguous numeric layouts (`03/04/2024`) are resolved by list order only:
//! `MM/dd/yyyy` is tried before `dd/MM/yyyy`, so the US reading wins whenever
//! both are valid. No value inspection beyond validity is done.

use std::sync::LazyLock;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use thiserror::Error;
use tracing::trace;

use contract_model::CellValue;

/// `NaiveDate::num_days_from_ce` of 1899-12-30, serial day 0.
const SERIAL_EPOCH_DAYS_FROM_CE: i64 = 693_594;

/// Serial of 9999-12-31, the last date a workbook can hold.
const MAX_SERIAL: f64 = 2_958_465.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Why a cell could not be read as a date.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DateParseFailure {
    #[error("empty cell")]
    Empty,
    #[error("serial {0} is outside the supported date range")]
    InvalidSerial(f64),
    #[error("boolean cell cannot hold a date")]
    NotADate,
    #[error("unrecognized date text '{0}'")]
    Unrecognized(String),
}

/// Known layouts, tried in order.
struct DateLayout {
    format: &'static str,
    shape: Regex,
    with_time: bool,
}

impl DateLayout {
    fn new(format: &'static str, shape: &str, with_time: bool) -> Self {
        Self {
            format,
            shape: Regex::new(shape).expect("layout shape is a valid regex"),
            with_time,
        }
    }

    fn parse(&self, value: &str) -> Option<NaiveDate> {
        if !self.shape.is_match(value) {
            return None;
        }
        if self.with_time {
            NaiveDateTime::parse_from_str(value, self.format)
                .ok()
                .map(|dt| dt.date())
        } else {
            NaiveDate::parse_from_str(value, self.format).ok()
        }
    }
}

static KNOWN_LAYOUTS: LazyLock<Vec<DateLayout>> = LazyLock::new(|| {
    vec![
        DateLayout::new("%Y-%m-%d", r"^\d{4}-\d{1,2}-\d{1,2}$", false),
        DateLayout::new("%d.%m.%Y", r"^\d{1,2}\.\d{1,2}\.\d{4}$", false),
        DateLayout::new("%m/%d/%Y", r"^\d{1,2}/\d{1,2}/\d{4}$", false),
        DateLayout::new("%d/%m/%Y", r"^\d{1,2}/\d{1,2}/\d{4}$", false),
        DateLayout::new("%Y/%m/%d", r"^\d{4}/\d{1,2}/\d{1,2}$", false),
        DateLayout::new(
            "%Y-%m-%d %H:%M:%S",
            r"^\d{4}-\d{1,2}-\d{1,2} \d{1,2}:\d{2}:\d{2}$",
            true,
        ),
        DateLayout::new(
            "%d.%m.%Y %H:%M:%S",
            r"^\d{1,2}\.\d{1,2}\.\d{4} \d{1,2}:\d{2}:\d{2}$",
            true,
        ),
    ]
});

static ISO_EXTENDED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?<year>\d{4})-(?<month>\d{2})-(?<day>\d{2})T(?<hour>\d{2})(?::(?<minute>\d{2})(?::(?<second>\d{2})(?:[.,]\d+)?)?)?(?<offset>Z|[+-]\d{2}(?::?\d{2})?)?$",
    )
    .expect("extended ISO 8601 regex is valid")
});

static ISO_BASIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?<year>\d{4})(?<month>\d{2})(?<day>\d{2})T(?<hour>\d{2})(?:(?<minute>\d{2})(?:(?<second>\d{2})(?:[.,]\d+)?)?)?(?<offset>Z|[+-]\d{2}(?:\d{2})?)?$",
    )
    .expect("basic ISO 8601 regex is valid")
});

static YEAR_MONTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{1,2})$").expect("year-month regex is valid"));

/// Date-time layouts accepted by the free-form fallback.
const FALLBACK_DATETIME_FORMATS: [&str; 8] = [
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%d.%m.%Y %H:%M",
    "%d-%b-%Y %H:%M:%S",
    "%d-%b-%Y %H:%M",
    "%b %d %Y %H:%M:%S",
    "%d %b %Y %H:%M:%S",
];

/// Date layouts accepted by the free-form fallback.
const FALLBACK_DATE_FORMATS: [&str; 10] = [
    "%d-%b-%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%d. %B %Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%a %b %d %Y",
    "%d.%m.%y",
];

/// Resolves a cell to a calendar date.
///
/// Never panics on input; every failure is reported as a [`DateParseFailure`].
pub fn parse_date_cell(cell: &CellValue) -> Result<NaiveDate, DateParseFailure> {
    match cell {
        CellValue::Missing => Err(DateParseFailure::Empty),
        CellValue::DateValue(value) => Ok(value.date()),
        CellValue::Number(serial) => {
            serial_to_date(*serial).ok_or(DateParseFailure::InvalidSerial(*serial))
        }
        CellValue::Boolean(_) => Err(DateParseFailure::NotADate),
        CellValue::Text(text) => parse_date_text(text),
    }
}

/// Resolves a cell to a calendar date, discarding the failure reason.
pub fn parse_date(cell: &CellValue) -> Option<NaiveDate> {
    parse_date_cell(cell).ok()
}

/// Resolves free text to a calendar date (rules 3 to 5).
pub fn parse_date_text(value: &str) -> Result<NaiveDate, DateParseFailure> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DateParseFailure::Empty);
    }

    if (trimmed.contains('T') || trimmed.contains('Z'))
        && let Some(date) = parse_iso8601(trimmed)
    {
        return Ok(date);
    }

    if let Some(date) = KNOWN_LAYOUTS.iter().find_map(|layout| layout.parse(trimmed)) {
        return Ok(date);
    }

    let date = parse_free_form(trimmed)
        .ok_or_else(|| DateParseFailure::Unrecognized(trimmed.to_string()))?;
    trace!(%date, "date resolved by free-form fallback");
    Ok(date)
}

/// Strict ISO 8601 date-time parsing.
///
/// Accepts the extended (`2024-03-01T10:00:00+02:00`) and basic
/// (`20240301T100000Z`) forms with hour, minute or second precision, an
/// optional fraction and a `Z`, `±hh`, `±hhmm` or `±hh:mm` offset. Values
/// carrying an offset keep the calendar date written in the string.
fn parse_iso8601(value: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    let caps = ISO_EXTENDED
        .captures(value)
        .or_else(|| ISO_BASIC.captures(value))?;
    let field = |name: &str| -> Option<u32> {
        caps.name(name)
            .map_or(Some(0), |found| found.as_str().parse().ok())
    };
    let date = NaiveDate::from_ymd_opt(caps["year"].parse().ok()?, field("month")?, field("day")?)?;
    NaiveTime::from_hms_opt(field("hour")?, field("minute")?, field("second")?)?;
    if let Some(offset) = caps.name("offset") {
        valid_offset(offset.as_str())?;
    }
    Some(date)
}

/// `Z` or a signed offset of at most 23:59.
fn valid_offset(offset: &str) -> Option<()> {
    if offset == "Z" {
        return Some(());
    }
    let digits: String = offset[1..].chars().filter(char::is_ascii_digit).collect();
    let hours: u32 = digits.get(..2)?.parse().ok()?;
    let minutes: u32 = match digits.get(2..) {
        Some("") | None => 0,
        Some(rest) => rest.parse().ok()?,
    };
    (hours <= 23 && minutes <= 59).then_some(())
}

fn parse_free_form(value: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.date_naive());
    }
    if let Some(caps) = YEAR_MONTH.captures(value) {
        let year = caps[1].parse().ok()?;
        let month = caps[2].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, 1);
    }
    FALLBACK_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            FALLBACK_DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        })
}

/// True if the components name a real calendar day.
pub fn is_valid_date(year: i32, month: u32, day: u32) -> bool {
    NaiveDate::from_ymd_opt(year, month, day).is_some()
}

/// Converts a spreadsheet serial to a calendar date (1899-12-30 = 0).
///
/// The fractional part is time of day and is dropped.
pub fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 0.0 || serial >= MAX_SERIAL + 1.0 {
        return None;
    }
    let days = i32::try_from(SERIAL_EPOCH_DAYS_FROM_CE + serial.floor() as i64).ok()?;
    NaiveDate::from_num_days_from_ce_opt(days)
}

/// Converts a spreadsheet serial to a date-time, keeping the time of day
/// rounded to whole seconds.
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    let date = serial_to_date(serial)?;
    let seconds = ((serial - serial.floor()) * SECONDS_PER_DAY).round() as u32;
    if seconds >= SECONDS_PER_DAY as u32 {
        return date.succ_opt().map(|next| next.and_time(NaiveTime::MIN));
    }
    let time = NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0)?;
    Some(date.and_time(time))
}

/// Inverse of [`serial_to_date`].
pub fn date_to_serial(date: NaiveDate) -> f64 {
    (i64::from(date.num_days_from_ce()) - SERIAL_EPOCH_DAYS_FROM_CE) as f64
}

/// Formats a date the way the UI and CLI display it.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn text(value: &str) -> Option<NaiveDate> {
        parse_date_text(value).ok()
    }

    #[test]
    fn known_layouts_compile_and_match_in_order() {
        assert_eq!(KNOWN_LAYOUTS.len(), 7);
        assert_eq!(text("2024-03-01"), Some(ymd(2024, 3, 1)));
        assert_eq!(text("01.03.2024"), Some(ymd(2024, 3, 1)));
        assert_eq!(text("2024/03/01"), Some(ymd(2024, 3, 1)));
        assert_eq!(text("2024-03-01 14:30:00"), Some(ymd(2024, 3, 1)));
        assert_eq!(text("01.03.2024 08:15:59"), Some(ymd(2024, 3, 1)));
    }

    #[test]
    fn ambiguous_slash_dates_prefer_month_first() {
        assert_eq!(text("03/04/2024"), Some(ymd(2024, 3, 4)));
        // Month 13 fails the US layout, the day-first layout takes it.
        assert_eq!(text("13/04/2024"), Some(ymd(2024, 4, 13)));
    }

    #[test]
    fn iso_date_times_keep_written_date() {
        assert_eq!(text("2024-03-01T23:30:00Z"), Some(ymd(2024, 3, 1)));
        assert_eq!(text("2024-03-01T23:30:00+02:00"), Some(ymd(2024, 3, 1)));
        assert_eq!(text("2024-03-01T10:00"), Some(ymd(2024, 3, 1)));
        assert_eq!(text("2024-03-01T10:00:00.250"), Some(ymd(2024, 3, 1)));
        assert_eq!(text("2024-03-01T10:00:00.123456Z"), Some(ymd(2024, 3, 1)));
        assert_eq!(text("2024-03-01T10:00:00+0200"), Some(ymd(2024, 3, 1)));
        assert_eq!(text("2024-03-01T10:00:00+02"), Some(ymd(2024, 3, 1)));
        assert_eq!(text("2024-03-01T10:00-05:30"), Some(ymd(2024, 3, 1)));
        assert_eq!(text("2024-03-01T10"), Some(ymd(2024, 3, 1)));
        assert_eq!(text("2024-03-01T10Z"), Some(ymd(2024, 3, 1)));
        assert_eq!(text("20240301T100000Z"), Some(ymd(2024, 3, 1)));
        assert_eq!(text("20240301T100000"), Some(ymd(2024, 3, 1)));
        assert_eq!(text("20240301T1000+0100"), Some(ymd(2024, 3, 1)));
    }

    #[test]
    fn malformed_iso_date_times_are_rejected() {
        assert_eq!(text("2024-02-30T10:00:00Z"), None);
        assert_eq!(text("2024-03-01T25:00:00Z"), None);
        assert_eq!(text("2024-03-01T10:61"), None);
        assert_eq!(text("2024-03-01T10:00:00+24:00"), None);
        assert_eq!(text("20240301T10:00:00"), None);
    }

    #[test]
    fn invalid_calendar_days_are_rejected() {
        assert_eq!(text("2023-02-29"), None);
        assert_eq!(text("31.04.2024"), None);
        assert_eq!(text("2024-13-01"), None);
        assert!(!is_valid_date(2023, 2, 29));
        assert!(is_valid_date(2024, 2, 29));
    }

    #[test]
    fn free_form_fallback() {
        assert_eq!(text("1 Mar 2024"), Some(ymd(2024, 3, 1)));
        assert_eq!(text("March 1, 2024"), Some(ymd(2024, 3, 1)));
        assert_eq!(text("15-Jan-2024"), Some(ymd(2024, 1, 15)));
        assert_eq!(text("2024-03"), Some(ymd(2024, 3, 1)));
        assert_eq!(text("Fri, 01 Mar 2024 10:00:00 +0000"), Some(ymd(2024, 3, 1)));
    }

    #[test]
    fn garbage_and_blank_fail() {
        assert_eq!(
            parse_date_text("not-a-date"),
            Err(DateParseFailure::Unrecognized("not-a-date".to_string()))
        );
        assert_eq!(parse_date_text("   "), Err(DateParseFailure::Empty));
        assert_eq!(parse_date_cell(&CellValue::Missing), Err(DateParseFailure::Empty));
        assert_eq!(
            parse_date_cell(&CellValue::Boolean(true)),
            Err(DateParseFailure::NotADate)
        );
    }

    #[test]
    fn serials_use_1899_12_30_epoch() {
        assert_eq!(serial_to_date(0.0), Some(ymd(1899, 12, 30)));
        assert_eq!(serial_to_date(45352.0), Some(ymd(2024, 3, 1)));
        assert_eq!(serial_to_date(45352.75), Some(ymd(2024, 3, 1)));
        assert_eq!(serial_to_date(-1.0), None);
        assert_eq!(serial_to_date(f64::NAN), None);
        assert_eq!(serial_to_date(MAX_SERIAL), Some(ymd(9999, 12, 31)));
        assert_eq!(serial_to_date(MAX_SERIAL + 1.0), None);
        assert_eq!(date_to_serial(ymd(2024, 1, 15)), 45306.0);
    }

    #[test]
    fn serial_time_of_day() {
        let dt = serial_to_datetime(45352.5).unwrap();
        assert_eq!(dt, ymd(2024, 3, 1).and_hms_opt(12, 0, 0).unwrap());
        let rounded_up = serial_to_datetime(45352.999_999_9).unwrap();
        assert_eq!(rounded_up, ymd(2024, 3, 2).and_time(NaiveTime::MIN));
    }

    #[test]
    fn native_and_numeric_cells() {
        let native = ymd(2024, 3, 1).and_hms_opt(9, 0, 0).unwrap();
        assert_eq!(parse_date(&CellValue::DateValue(native)), Some(ymd(2024, 3, 1)));
        assert_eq!(parse_date(&CellValue::Number(45352.0)), Some(ymd(2024, 3, 1)));
        assert_eq!(
            parse_date_cell(&CellValue::Number(-3.0)),
            Err(DateParseFailure::InvalidSerial(-3.0))
        );
    }
}
