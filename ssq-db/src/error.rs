use crate::models::Pool;

/// Failures raised while turning raw history text into `DrawRecord`s.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("invalid record {issue}: {reason}")]
    InvalidRecordFormat { issue: String, reason: String },

    #[error("record {issue}: {pool} number {value} out of range")]
    NumberOutOfRange { issue: String, pool: Pool, value: i64 },

    #[error("history contains no draw record")]
    EmptyDataset,

    #[error("cannot read history file: {0}")]
    Io(#[from] std::io::Error),
}
