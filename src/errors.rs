//! Shared error types for issue feature extraction

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for per-issue operations
#[derive(Debug, Error)]
pub enum IssueError {
    /// A timestamp the operation cannot work without was null or absent
    #[error("issue is missing required timestamp `{field}`")]
    MissingTimestamp { field: &'static str },

    /// More than one posted comment carries the ordinal selected for lookup
    #[error("comment ordinal {ordinal} appears more than once in the thread")]
    AmbiguousCommentOrdinal { ordinal: u32 },

    /// The comment selected for lookup is stored under a key not of the form `"<n>th comment"`
    #[error("comment key {key:?} does not match the expected key {expected:?}")]
    IrregularCommentKey { key: String, expected: String },

    /// The bot ground-truth table could not be read
    #[error(transparent)]
    BotTable(#[from] BotTableError),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl IssueError {
    /// Create a missing timestamp error for the named field
    pub fn missing(field: &'static str) -> Self {
        Self::MissingTimestamp { field }
    }

    /// Whether the error reflects a broken input record rather than an unavailable resource
    pub fn is_data_integrity(&self) -> bool {
        matches!(
            self,
            Self::MissingTimestamp { .. }
                | Self::AmbiguousCommentOrdinal { .. }
                | Self::IrregularCommentKey { .. }
                | Self::Json(_)
        )
    }
}

/// Errors raised while loading the bot ground-truth CSV
#[derive(Debug, Error)]
pub enum BotTableError {
    #[error("failed to open bot table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse bot table {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Every row needs at least login, (unused) and classification columns
    #[error("bot table {path}: row {line} has fewer than three columns")]
    MalformedRow { path: PathBuf, line: u64 },
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, IssueError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_timestamp_message_names_field() {
        let err = IssueError::missing("closed_at");
        assert_eq!(
            err.to_string(),
            "issue is missing required timestamp `closed_at`"
        );
        assert!(err.is_data_integrity());
    }

    #[test]
    fn test_bot_table_error_is_not_data_integrity() {
        let err: IssueError = BotTableError::MalformedRow {
            path: PathBuf::from("bots.csv"),
            line: 3,
        }
        .into();
        assert!(!err.is_data_integrity());
        assert!(err.to_string().contains("row 3"));
    }
}
