//! Snapshot replacement semantics of the contract store.

use chrono::NaiveDate;
use rust_xlsxwriter::Workbook;

use contract_ingest::{ContractStore, sample_workbook};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn two_row_workbook() -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Name").unwrap();
    sheet.write_string(0, 1, "Startdatum").unwrap();
    sheet.write_string(1, 0, "Alpha").unwrap();
    sheet.write_string(1, 1, "2024-01-01").unwrap();
    sheet.write_string(2, 0, "Beta").unwrap();
    workbook.save_to_buffer().expect("save workbook")
}

#[test]
fn empty_store_has_no_records() {
    let store = ContractStore::default();
    assert!(store.snapshot().is_none());
    assert!(store.records().is_empty());
}

#[test]
fn failed_import_keeps_previous_snapshot() {
    let mut store = ContractStore::default();
    let sample = sample_workbook().expect("build sample");
    store.import_at(&sample, ymd(2024, 6, 1)).expect("import sample");
    assert_eq!(store.records().len(), 10);

    assert!(store.import_at(b"not a workbook", ymd(2024, 6, 1)).is_err());
    assert_eq!(store.records().len(), 10);
    assert_eq!(store.records()[0].name, "Microsoft 365 Business");
}

#[test]
fn reimport_replaces_the_whole_snapshot() {
    let mut store = ContractStore::default();
    let sample = sample_workbook().expect("build sample");
    store.import_at(&sample, ymd(2024, 6, 1)).expect("import sample");

    let snapshot = store
        .import_at(&two_row_workbook(), ymd(2024, 6, 1))
        .expect("import second file");
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot.headers, vec!["Name", "Startdatum"]);
    assert!(snapshot.raw_headers.is_empty());

    let records = store.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, 1);
    assert_eq!(records[0].name, "Alpha");
    assert_eq!(records[1].id, 2);
    assert_eq!(records[1].start_date, None);
    let beta = store.snapshot().and_then(|snapshot| snapshot.record(2));
    assert_eq!(beta.map(|record| record.name.as_str()), Some("Beta"));
}

#[test]
fn clear_drops_the_snapshot() {
    let mut store = ContractStore::default();
    store
        .import_at(&two_row_workbook(), ymd(2024, 6, 1))
        .expect("import");
    store.clear();
    assert!(store.records().is_empty());
}
