//! Issue data model shared by every classifier and metric.

pub mod issue;
pub mod timestamp;

pub use issue::{
    legacy_comment_key, Comment, CommentEntry, CommentThread, Issue, Label, User, FETCH_ERROR_KEY,
};
pub use timestamp::{days_between, Timestamp, TIMESTAMP_FORMAT};
