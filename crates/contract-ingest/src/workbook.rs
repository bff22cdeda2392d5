//! Workbook decoding into header-keyed raw rows.
//!
//! Only the first worksheet is read. Its first row supplies the headers;
//! blank header cells become `__EMPTY`, `__EMPTY_1`, ... and repeated headers
//! get `_1`, `_2`, ... suffixes so every key in a [`RawRow`] is unique.

use std::collections::HashSet;
use std::io::Cursor;
use std::panic::{AssertUnwindSafe, catch_unwind};

use calamine::{Data, ExcelDateTime, Range, Reader, open_workbook_auto_from_rs};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use contract_model::{CellValue, IngestError, RawRow, Result};
use contract_transform::normalization::serial_to_datetime;

const EMPTY_HEADER: &str = "__EMPTY";

/// The first worksheet of a workbook as headers plus raw rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetTable {
    pub sheet_name: String,
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

/// Decodes xlsx/xlsm/xlsb/xls/ods bytes and reads the first worksheet.
///
/// Panics raised inside the decoder on malformed input are reported as
/// [`IngestError::Decode`].
pub fn read_first_sheet(bytes: &[u8], skip_blank_rows: bool) -> Result<SheetTable> {
    match catch_unwind(AssertUnwindSafe(|| decode_first_sheet(bytes, skip_blank_rows))) {
        Ok(result) => result,
        Err(payload) => Err(IngestError::Decode(format!(
            "decoder panicked: {}",
            panic_message(payload.as_ref())
        ))),
    }
}

fn decode_first_sheet(bytes: &[u8], skip_blank_rows: bool) -> Result<SheetTable> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|err| IngestError::Decode(err.to_string()))?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(IngestError::NoWorksheet)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(IngestError::NoWorksheet)?
        .map_err(|err| IngestError::Worksheet {
            name: sheet_name.clone(),
            message: err.to_string(),
        })?;

    let (headers, rows) = table_from_range(&range, skip_blank_rows);
    tracing::debug!(
        sheet = %sheet_name,
        columns = headers.len(),
        rows = rows.len(),
        "decoded first worksheet"
    );
    Ok(SheetTable {
        sheet_name,
        headers,
        rows,
    })
}

fn table_from_range(range: &Range<Data>, skip_blank_rows: bool) -> (Vec<String>, Vec<RawRow>) {
    let mut source_rows = range.rows();
    let Some(header_row) = source_rows.next() else {
        return (Vec::new(), Vec::new());
    };
    let headers = unique_headers(header_row.iter().map(header_text));

    let mut rows = Vec::new();
    for source in source_rows {
        let mut row = RawRow::new();
        for (header, data) in headers.iter().zip(source) {
            let cell = cell_value(data);
            if cell != CellValue::Missing {
                row.insert(header.clone(), cell);
            }
        }
        if skip_blank_rows && row.is_empty() {
            continue;
        }
        rows.push(row);
    }
    (headers, rows)
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn header_text(data: &Data) -> Option<String> {
    let text = cell_value(data).display_text()?;
    let normalized = normalize_header(&text);
    (!normalized.is_empty()).then_some(normalized)
}

/// Names blank headers and disambiguates repeats, keeping column order.
pub fn unique_headers(raw: impl IntoIterator<Item = Option<String>>) -> Vec<String> {
    let raw: Vec<Option<String>> = raw.into_iter().collect();
    let mut taken: HashSet<String> = raw.iter().flatten().cloned().collect();
    let mut seen: HashSet<String> = HashSet::new();
    let mut empty_count = 0usize;
    let mut headers = Vec::with_capacity(raw.len());

    for header in raw {
        let name = match header {
            Some(name) if seen.insert(name.clone()) => name,
            Some(name) => next_free(&name, 1, &mut taken),
            None => {
                let name = if empty_count == 0 {
                    next_free(EMPTY_HEADER, 0, &mut taken)
                } else {
                    next_free(EMPTY_HEADER, empty_count, &mut taken)
                };
                empty_count += 1;
                name
            }
        };
        seen.insert(name.clone());
        headers.push(name);
    }
    headers
}

/// First unused `base` (when `start == 0`) or `base_N` with `N >= start`.
fn next_free(base: &str, start: usize, taken: &mut HashSet<String>) -> String {
    let mut suffix = start;
    loop {
        let candidate = if suffix == 0 {
            base.to_string()
        } else {
            format!("{base}_{suffix}")
        };
        if taken.insert(candidate.clone()) {
            return candidate;
        }
        suffix += 1;
    }
}

/// Maps a decoder cell onto the closed [`CellValue`] set.
///
/// Date-formatted cells are read in the workbook's own date system (1900 or
/// 1904). Duration cells keep their serial as a number. Error cells read as
/// missing.
pub fn cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty | Data::Error(_) => CellValue::Missing,
        Data::String(text) => CellValue::Text(text.clone()),
        Data::Int(value) => CellValue::Number(*value as f64),
        Data::Float(value) => CellValue::Number(*value),
        Data::Bool(value) => CellValue::Boolean(*value),
        Data::DateTime(value) => {
            native_date_time(value).map_or(CellValue::Number(value.as_f64()), CellValue::DateValue)
        }
        Data::DateTimeIso(text) | Data::DurationIso(text) => CellValue::Text(text.clone()),
    }
}

fn native_date_time(value: &ExcelDateTime) -> Option<NaiveDateTime> {
    let serial = value.as_f64();
    if value.is_duration() || !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let (year, month, day, hour, minute, second, milli) = value.to_ymd_hms_milli();
    // Serial 60 is Excel's phantom 1900-02-29.
    let Some(date) = NaiveDate::from_ymd_opt(year.into(), month.into(), day.into()) else {
        return serial_to_datetime(serial);
    };
    let time = NaiveTime::from_hms_milli_opt(hour.into(), minute.into(), second.into(), milli.into())
        .unwrap_or(NaiveTime::MIN);
    Some(date.and_time(time))
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use calamine::ExcelDateTimeType;

    use super::*;

    fn headers(raw: &[Option<&str>]) -> Vec<String> {
        unique_headers(raw.iter().map(|h| h.map(str::to_string)))
    }

    #[test]
    fn blank_headers_are_synthesized() {
        assert_eq!(
            headers(&[Some("Name"), None, Some("Status"), None]),
            vec!["Name", "__EMPTY", "Status", "__EMPTY_1"]
        );
    }

    #[test]
    fn duplicate_headers_get_suffixes() {
        assert_eq!(
            headers(&[Some("Name"), Some("Name"), Some("Name")]),
            vec!["Name", "Name_1", "Name_2"]
        );
        // An existing "Name_1" column is not shadowed.
        assert_eq!(
            headers(&[Some("Name"), Some("Name"), Some("Name_1")]),
            vec!["Name", "Name_2", "Name_1"]
        );
    }

    #[test]
    fn header_whitespace_is_collapsed() {
        assert_eq!(normalize_header("  Laufzeit   in M \u{feff}"), "Laufzeit in M");
    }

    #[test]
    fn decoder_cells_map_to_cell_values() {
        assert_eq!(cell_value(&Data::Empty), CellValue::Missing);
        assert_eq!(cell_value(&Data::Int(12)), CellValue::Number(12.0));
        assert_eq!(
            cell_value(&Data::String("2024-03-01".to_string())),
            CellValue::Text("2024-03-01".to_string())
        );
        assert_eq!(cell_value(&Data::Bool(true)), CellValue::Boolean(true));
    }

    fn ymd_hms(y: i32, m: u32, d: u32, h: u32, min: u32, sec: u32) -> CellValue {
        CellValue::DateValue(
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(h, min, sec)
                .unwrap(),
        )
    }

    #[test]
    fn native_dates_follow_the_workbook_date_system() {
        let in_1900 = ExcelDateTime::new(45352.5, ExcelDateTimeType::DateTime, false);
        assert_eq!(
            cell_value(&Data::DateTime(in_1900)),
            ymd_hms(2024, 3, 1, 12, 0, 0)
        );

        // The same day is 1462 serials earlier in a 1904 workbook.
        let in_1904 = ExcelDateTime::new(43890.0, ExcelDateTimeType::DateTime, true);
        assert_eq!(
            cell_value(&Data::DateTime(in_1904)),
            ymd_hms(2024, 3, 1, 0, 0, 0)
        );
    }

    #[test]
    fn native_durations_stay_numeric() {
        let duration = ExcelDateTime::new(1.5, ExcelDateTimeType::TimeDelta, false);
        assert_eq!(cell_value(&Data::DateTime(duration)), CellValue::Number(1.5));
        let negative = ExcelDateTime::new(-3.0, ExcelDateTimeType::DateTime, false);
        assert_eq!(cell_value(&Data::DateTime(negative)), CellValue::Number(-3.0));
    }

    #[test]
    fn phantom_leap_day_falls_back_to_the_serial_epoch() {
        let leap = ExcelDateTime::new(60.0, ExcelDateTimeType::DateTime, false);
        assert_eq!(
            cell_value(&Data::DateTime(leap)),
            ymd_hms(1900, 2, 28, 0, 0, 0)
        );
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let err = read_first_sheet(b"definitely not a workbook", true).unwrap_err();
        assert!(err.to_string().starts_with("decode failure"));
    }
}
