//! Tests for contract row normalization.

use chrono::NaiveDate;
use contract_model::{CellValue, Classification, MetricThresholds, RawRow};
use contract_transform::{ContractNormalizer, classify, normalize_row};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn row(name: &str, start: CellValue, duration: CellValue) -> RawRow {
    let mut row = RawRow::new().with("Name", name).with("Status", "online");
    row.insert("Startdatum", start);
    row.insert("Laufzeit in M", duration);
    row
}

#[test]
fn zoom_pro_example() {
    let raw = row("Zoom Pro", "2024-03-01".into(), 12.0.into());
    let record = normalize_row(&raw, 0, ymd(2024, 6, 1));

    assert_eq!(record.start_date, Some(ymd(2024, 3, 1)));
    assert_eq!(record.end_date, Some(ymd(2025, 3, 1)));
    assert_eq!(record.days_remaining, 273);
    assert_eq!(record.elapsed_months, 3);
    assert_eq!(
        classify(&record, MetricThresholds::default()),
        Classification::ActiveOnline
    );
}

#[test]
fn end_of_month_start_lands_on_leap_day() {
    let raw = row("Slack", "2024-01-31".into(), 1.0.into());
    let record = normalize_row(&raw, 0, ymd(2024, 1, 31));
    assert_eq!(record.end_date, Some(ymd(2024, 2, 29)));
    assert_eq!(record.days_remaining, 29);
}

#[test]
fn not_a_date_row_is_kept() {
    let raw = row("Broken", "not-a-date".into(), 12.0.into());
    let record = normalize_row(&raw, 2, ymd(2024, 6, 1));
    assert_eq!(record.id, 3);
    assert_eq!(record.start_date, None);
    assert_eq!(record.end_date, None);
    assert_eq!(record.days_remaining, 0);
    assert_eq!(record.elapsed_months, 0);
}

#[test]
fn negative_duration_clamps_to_zero() {
    let raw = row("Negative", "2024-03-01".into(), (-5.0).into());
    let record = normalize_row(&raw, 0, ymd(2024, 6, 1));
    assert_eq!(record.duration_months, 0);
    assert_eq!(record.end_date, Some(ymd(2024, 3, 1)));
    assert_eq!(record.days_remaining, -92);
}

#[test]
fn german_and_serial_start_dates() {
    let german = normalize_row(&row("A", "15.01.2024".into(), 6.0.into()), 0, ymd(2024, 6, 1));
    assert_eq!(german.end_date, Some(ymd(2024, 7, 15)));

    let serial = normalize_row(&row("B", 45306.0.into(), "6".into()), 1, ymd(2024, 6, 1));
    assert_eq!(serial.start_date, Some(ymd(2024, 1, 15)));
    assert_eq!(serial.duration_months, 6);
}

#[test]
fn native_date_cell() {
    let start = ymd(2023, 11, 30).and_hms_opt(0, 0, 0).unwrap();
    let record = normalize_row(&row("C", start.into(), 3.0.into()), 0, ymd(2024, 6, 1));
    assert_eq!(record.end_date, Some(ymd(2024, 2, 29)));
    assert_eq!(record.elapsed_months, 6);
}

#[test]
fn renamed_columns() {
    let options = contract_model::IngestOptions::default().with_columns(
        contract_model::ColumnNames {
            name: "Title".to_string(),
            status: "State".to_string(),
            start_date: "Start".to_string(),
            duration_months: "Months".to_string(),
        },
    );
    let raw = RawRow::new()
        .with("Title", "Renamed")
        .with("Start", "2024-03-01")
        .with("Months", 1.0);
    let record = ContractNormalizer::new(options).normalize(&raw, 0, ymd(2024, 3, 1));
    assert_eq!(record.name, "Renamed");
    assert_eq!(record.end_date, Some(ymd(2024, 4, 1)));
}
