//! Cell-level normalization for contract rows.
//!
//! - **datetime**: date resolution for native, serial and text cells
//! - **duration**: calendar month arithmetic and day differences
//! - **numeric**: integer coercion for duration cells

pub mod datetime;
pub mod duration;
pub mod numeric;

// Re-export commonly used items
pub use datetime::{
    DateParseFailure, format_date, is_valid_date, parse_date, parse_date_cell, parse_date_text,
    serial_to_date, serial_to_datetime,
};
pub use duration::{add_months, days_between, elapsed_months, months_between};
pub use numeric::{CoercedDuration, MAX_DURATION_MONTHS, coerce_duration_months, coerce_integer};
