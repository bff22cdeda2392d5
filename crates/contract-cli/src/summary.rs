use chrono::NaiveDate;
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde_json::{Value, json};

use contract_ingest::ImportSnapshot;
use contract_model::{Classification, ContractRecord, MetricThresholds};
use contract_transform::{ContractStats, classify, group_by_end_month};

use crate::cli::ImportArgs;
use crate::commands::ImportReport;

pub fn print_report(report: &ImportReport, args: &ImportArgs) {
    if args.json {
        match serde_json::to_string_pretty(&report_json(report)) {
            Ok(text) => println!("{text}"),
            Err(error) => eprintln!("error: {error}"),
        }
        return;
    }
    let snapshot = &report.snapshot;
    println!("File: {}", report.path.display());
    println!("Sheet: {}", snapshot.sheet_name);
    println!("Reference date: {}", snapshot.reference.format("%Y-%m-%d"));
    println!("{}", contract_table(&snapshot.records, report.thresholds));
    println!("{}", stats_line(&report.stats));
    if let Some(table) = warning_table(snapshot) {
        println!();
        println!("Defaulted fields:");
        println!("{table}");
    }
    if args.raw {
        println!();
        println!("Raw data:");
        println!("{}", raw_table(snapshot));
    }
    if args.calendar {
        println!();
        println!("Calendar:");
        println!("{}", calendar_table(&snapshot.records, report.thresholds));
    }
}

/// One-line classification summary, the terminal form of the stats tiles.
pub fn stats_line(stats: &ContractStats) -> String {
    let counts: Vec<String> = Classification::ALL
        .iter()
        .map(|class| format!("{} {}", stats.count(*class), class.label()))
        .collect();
    format!("{} contracts: {}", stats.total, counts.join(", "))
}

pub fn contract_table(records: &[ContractRecord], thresholds: MetricThresholds) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Name"),
        header_cell("Status"),
        header_cell("Start"),
        header_cell("End"),
        header_cell("Months"),
        header_cell("Elapsed"),
        header_cell("Days left"),
        header_cell("State"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for index in 5..=7 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    align_column(&mut table, 8, CellAlignment::Center);
    for record in records {
        let class = classify(record, thresholds);
        table.add_row(vec![
            Cell::new(record.id),
            Cell::new(&record.name).add_attribute(Attribute::Bold),
            Cell::new(&record.status),
            date_cell(record.start_date),
            date_cell(record.end_date),
            Cell::new(record.duration_months),
            Cell::new(record.elapsed_months),
            days_cell(record),
            class_cell(class),
        ]);
    }
    table
}

/// Rows whose fields were defaulted, one line per warning.
pub fn warning_table(snapshot: &ImportSnapshot) -> Option<Table> {
    if snapshot.warning_count() == 0 {
        return None;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("ID"), header_cell("Name"), header_cell("Field")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (record, warnings) in snapshot.records.iter().zip(&snapshot.warnings) {
        for warning in warnings {
            table.add_row(vec![
                Cell::new(record.id),
                Cell::new(&record.name),
                Cell::new(warning).fg(Color::Yellow),
            ]);
        }
    }
    Some(table)
}

/// Untouched cells for the columns after the contract columns.
pub fn raw_table(snapshot: &ImportSnapshot) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("ID")];
    header.extend(snapshot.raw_headers.iter().map(|name| header_cell(name)));
    table.set_header(header);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (record, row) in snapshot.records.iter().zip(&snapshot.raw_rows) {
        let mut cells = vec![Cell::new(record.id)];
        cells.extend(snapshot.raw_headers.iter().map(|header| {
            row.get(header)
                .display_text()
                .filter(|text| !text.is_empty())
                .map_or_else(|| dim_cell("-"), Cell::new)
        }));
        table.add_row(cells);
    }
    table
}

/// Contracts grouped by the month their term ends.
pub fn calendar_table(records: &[ContractRecord], thresholds: MetricThresholds) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Month"),
        header_cell("Ends"),
        header_cell("Contract"),
        header_cell("State"),
    ]);
    apply_table_style(&mut table);
    for ((year, month), entries) in group_by_end_month(records) {
        for (position, record) in entries.into_iter().enumerate() {
            let month_cell = if position == 0 {
                Cell::new(format!("{year}-{month:02}")).add_attribute(Attribute::Bold)
            } else {
                dim_cell("")
            };
            table.add_row(vec![
                month_cell,
                date_cell(record.end_date),
                Cell::new(&record.name),
                class_cell(classify(record, thresholds)),
            ]);
        }
    }
    table
}

/// Machine-readable form of an import.
pub fn report_json(report: &ImportReport) -> Value {
    let snapshot = &report.snapshot;
    let classes: Vec<Classification> = snapshot
        .records
        .iter()
        .map(|record| classify(record, report.thresholds))
        .collect();
    json!({
        "file": report.path.display().to_string(),
        "sheet": snapshot.sheet_name,
        "referenceDate": snapshot.reference,
        "headers": snapshot.headers,
        "rawHeaders": snapshot.raw_headers,
        "records": snapshot.records,
        "classifications": classes,
        "warnings": snapshot.warnings,
        "stats": report.stats,
    })
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn date_cell(date: Option<NaiveDate>) -> Cell {
    match date {
        Some(date) => Cell::new(date.format("%Y-%m-%d")),
        None => dim_cell("-"),
    }
}

fn days_cell(record: &ContractRecord) -> Cell {
    if !record.has_dates() {
        return dim_cell("-");
    }
    let cell = Cell::new(record.days_remaining);
    if record.days_remaining <= 0 {
        cell.fg(Color::Red)
    } else {
        cell
    }
}

fn class_cell(class: Classification) -> Cell {
    let cell = Cell::new(class.label());
    match class {
        Classification::Expired => cell.fg(Color::Red).add_attribute(Attribute::Bold),
        Classification::DueSoon => cell.fg(Color::Yellow).add_attribute(Attribute::Bold),
        Classification::ActiveOnline => cell.fg(Color::Green),
        Classification::Other => cell.fg(Color::DarkGrey),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
