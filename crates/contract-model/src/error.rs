use thiserror::Error;

/// Whole-file failure of an import. Cell-level problems never surface here.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("decode failure: {0}")]
    Decode(String),
    #[error("decode failure: workbook contains no worksheet")]
    NoWorksheet,
    #[error("decode failure: cannot read worksheet '{name}': {message}")]
    Worksheet { name: String, message: String },
}

pub type Result<T> = std::result::Result<T, IngestError>;
