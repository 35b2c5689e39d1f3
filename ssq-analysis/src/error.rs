/// Failures of analysis queries. Each query either fully succeeds or returns one of these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    #[error("no draw record to analyze")]
    EmptyDataset,

    #[error("records not newest first: {newer} at position {position} precedes {older}")]
    OutOfOrder {
        position: usize,
        newer: String,
        older: String,
    },

    #[error("malformed issue identifier '{0}'")]
    MalformedIssue(String),
}
