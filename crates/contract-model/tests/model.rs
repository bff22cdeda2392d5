//! Tests for contract-model types.

use chrono::NaiveDate;
use contract_model::{CellValue, Classification, ContractRecord, FieldWarning, RawRow};

fn record() -> ContractRecord {
    ContractRecord {
        id: 1,
        name: "Zoom Pro".to_string(),
        status: "online".to_string(),
        start_date: NaiveDate::from_ymd_opt(2024, 3, 1),
        end_date: NaiveDate::from_ymd_opt(2025, 3, 1),
        duration_months: 12,
        days_remaining: 273,
        elapsed_months: 3,
    }
}

#[test]
fn record_serializes_with_camel_case_fields() {
    let json = serde_json::to_value(record()).expect("serialize record");
    assert_eq!(json["startDate"], "2024-03-01");
    assert_eq!(json["endDate"], "2025-03-01");
    assert_eq!(json["durationMonths"], 12);
    assert_eq!(json["daysRemaining"], 273);
    assert_eq!(json["elapsedMonths"], 3);
}

#[test]
fn record_round_trips_through_json() {
    let json = serde_json::to_string(&record()).expect("serialize record");
    let round: ContractRecord = serde_json::from_str(&json).expect("deserialize record");
    assert_eq!(round, record());
}

#[test]
fn absent_dates_serialize_as_null() {
    let mut rec = record();
    rec.start_date = None;
    rec.end_date = None;
    let json = serde_json::to_value(&rec).expect("serialize record");
    assert!(json["startDate"].is_null());
    assert!(!rec.has_dates());
}

#[test]
fn raw_row_serializes_tagged_cells() {
    let row = RawRow::new()
        .with("Laufzeit in M", 12.0)
        .with("Name", "Zoom Pro");
    let json = serde_json::to_value(&row).expect("serialize row");
    assert_eq!(json["cells"]["Laufzeit in M"]["kind"], "Number");
    assert_eq!(json["cells"]["Name"]["value"], "Zoom Pro");
    assert_eq!(row.get("Status"), &CellValue::Missing);
}

#[test]
fn classification_labels() {
    let labels: Vec<&str> = Classification::ALL.iter().map(|c| c.label()).collect();
    assert_eq!(labels, vec!["expired", "due soon", "active", "other"]);
}

#[test]
fn field_warning_display() {
    let warning = FieldWarning::UnparseableStartDate {
        value: "not-a-date".to_string(),
    };
    assert_eq!(warning.to_string(), "start date 'not-a-date' not recognized");
}
