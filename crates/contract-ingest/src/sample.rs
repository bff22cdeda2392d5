//! Sample workbook generator.
//!
//! Produces a small `.xlsx` with the column layout the importer expects. The
//! start dates deliberately mix layouts (ISO, German, US, slash, date-time,
//! a date-formatted serial and an unreadable value) so the file doubles as a
//! fixture for the whole pipeline.

use rust_xlsxwriter::{Format, Workbook, XlsxError};

pub const SAMPLE_SHEET_NAME: &str = "Verträge";

pub const SAMPLE_HEADERS: [&str; 7] = [
    "Name",
    "Status",
    "Startdatum",
    "Laufzeit in M",
    "Anbieter",
    "Kosten / Monat",
    "Notiz",
];

pub const SAMPLE_ROW_COUNT: usize = SAMPLE_ROWS.len();

enum SampleStart {
    Text(&'static str),
    Serial(f64),
}

enum SampleDuration {
    Months(f64),
    Text(&'static str),
}

struct SampleRow {
    name: &'static str,
    status: Option<&'static str>,
    start: SampleStart,
    duration: SampleDuration,
    vendor: &'static str,
    monthly_cost: f64,
    note: &'static str,
}

const SAMPLE_ROWS: [SampleRow; 10] = [
    SampleRow {
        name: "Microsoft 365 Business",
        status: Some("online"),
        start: SampleStart::Text("2024-01-15"),
        duration: SampleDuration::Months(12.0),
        vendor: "Microsoft",
        monthly_cost: 264.0,
        note: "Jahreslizenz, 20 Plätze",
    },
    SampleRow {
        name: "Zoom Pro",
        status: Some("online"),
        start: SampleStart::Text("01.03.2024"),
        duration: SampleDuration::Months(12.0),
        vendor: "Zoom",
        monthly_cost: 139.9,
        note: "",
    },
    SampleRow {
        name: "Adobe Creative Cloud",
        status: Some("online"),
        // 2023-09-01
        start: SampleStart::Serial(45170.0),
        duration: SampleDuration::Months(24.0),
        vendor: "Adobe",
        monthly_cost: 89.99,
        note: "Design-Team",
    },
    SampleRow {
        name: "Slack Business+",
        status: Some("online"),
        start: SampleStart::Text("01/31/2024"),
        duration: SampleDuration::Months(1.0),
        vendor: "Slack",
        monthly_cost: 12.5,
        note: "Monatlich kündbar",
    },
    SampleRow {
        name: "Atlassian Jira",
        status: Some("offline"),
        start: SampleStart::Text("2023/06/01"),
        duration: SampleDuration::Months(12.0),
        vendor: "Atlassian",
        monthly_cost: 45.0,
        note: "",
    },
    SampleRow {
        name: "Salesforce CRM",
        status: Some("online"),
        start: SampleStart::Text("2023-12-01 09:00:00"),
        duration: SampleDuration::Months(36.0),
        vendor: "Salesforce",
        monthly_cost: 1250.0,
        note: "Rahmenvertrag",
    },
    SampleRow {
        name: "Dropbox Business",
        status: Some("gekündigt"),
        start: SampleStart::Text("15.02.2023"),
        duration: SampleDuration::Months(12.0),
        vendor: "Dropbox",
        monthly_cost: 30.0,
        note: "",
    },
    SampleRow {
        name: "GitHub Enterprise",
        status: Some("online"),
        start: SampleStart::Text("2024-05-20T00:00:00Z"),
        duration: SampleDuration::Months(12.0),
        vendor: "GitHub",
        monthly_cost: 399.0,
        note: "",
    },
    SampleRow {
        name: "Miro",
        status: Some("pausiert"),
        start: SampleStart::Text("unbekannt"),
        duration: SampleDuration::Months(6.0),
        vendor: "Miro",
        monthly_cost: 16.0,
        note: "Startdatum fehlt im Vertrag",
    },
    SampleRow {
        name: "Notion Team",
        status: None,
        start: SampleStart::Text("2024-02-29"),
        duration: SampleDuration::Text("6"),
        vendor: "Notion",
        monthly_cost: 40.0,
        note: "",
    },
];

/// Builds the sample workbook and returns its `.xlsx` bytes.
pub fn sample_workbook() -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let date_format = Format::new().set_num_format("dd.mm.yyyy");
    let money_format = Format::new().set_num_format("#,##0.00 €");

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SAMPLE_SHEET_NAME)?;

    for (col, header) in (0u16..).zip(SAMPLE_HEADERS) {
        worksheet.write_string_with_format(0, col, header, &header_format)?;
    }

    for (row, sample) in (1u32..).zip(&SAMPLE_ROWS) {
        worksheet.write_string(row, 0, sample.name)?;
        if let Some(status) = sample.status {
            worksheet.write_string(row, 1, status)?;
        }
        match sample.start {
            SampleStart::Text(text) => worksheet.write_string(row, 2, text)?,
            SampleStart::Serial(serial) => {
                worksheet.write_number_with_format(row, 2, serial, &date_format)?
            }
        };
        match sample.duration {
            SampleDuration::Months(months) => worksheet.write_number(row, 3, months)?,
            SampleDuration::Text(text) => worksheet.write_string(row, 3, text)?,
        };
        worksheet.write_string(row, 4, sample.vendor)?;
        worksheet.write_number_with_format(row, 5, sample.monthly_cost, &money_format)?;
        if !sample.note.is_empty() {
            worksheet.write_string(row, 6, sample.note)?;
        }
    }

    worksheet.set_column_width(0, 26)?;
    worksheet.set_column_width(2, 22)?;
    worksheet.set_column_width(6, 30)?;

    workbook.save_to_buffer()
}
