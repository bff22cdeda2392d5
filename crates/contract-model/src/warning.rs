//! Per-field defaulting diagnostics.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A field that was defaulted or adjusted while normalizing one row.
///
/// Warnings are informational: the record is identical whether or not the
/// caller looks at them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FieldWarning {
    MissingName,
    MissingStatus,
    MissingStartDate,
    UnparseableStartDate { value: String },
    InvalidDuration { value: String },
    NegativeDurationClamped { value: i64 },
    DurationCapped { value: i64, max: u32 },
}

impl fmt::Display for FieldWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingName => write!(f, "name missing, default used"),
            Self::MissingStatus => write!(f, "status missing, default used"),
            Self::MissingStartDate => write!(f, "start date missing"),
            Self::UnparseableStartDate { value } => {
                write!(f, "start date '{value}' not recognized")
            }
            Self::InvalidDuration { value } => {
                write!(f, "duration '{value}' is not a number, using 0")
            }
            Self::NegativeDurationClamped { value } => {
                write!(f, "negative duration {value} clamped to 0")
            }
            Self::DurationCapped { value, max } => {
                write!(f, "duration {value} capped at {max} months")
            }
        }
    }
}
