pub mod cell;
pub mod contract;
pub mod error;
pub mod options;
pub mod warning;

pub use cell::{CellValue, RawRow};
pub use contract::{Classification, ContractRecord, STATUS_ONLINE};
pub use error::{IngestError, Result};
pub use options::{ColumnNames, IngestOptions, MetricThresholds};
pub use warning::FieldWarning;
