//! Contract row transformation.
//!
//! This crate turns raw spreadsheet rows into contract records:
//!
//! - **normalization**: date parsing, month arithmetic and numeric coercion
//! - **normalizer**: row to [`ContractRecord`](contract_model::ContractRecord) mapping
//! - **metrics**: expiry / due-soon / active classification and stats
//! - **calendar**: end-date grouping for the calendar view

pub mod calendar;
pub mod metrics;
pub mod normalization;
pub mod normalizer;

pub use calendar::{MonthKey, ending_in_month, group_by_end_month};
pub use metrics::{
    ContractStats, classify, classify_at, classify_days, days_remaining_at, is_active,
    is_due_soon, is_expired,
};
pub use normalizer::{ContractNormalizer, NormalizedRow, normalize_row};
