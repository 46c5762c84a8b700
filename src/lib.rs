//! Feature extraction for crawled GitHub issues.
//!
//! Each operation is a stateless transformation of a single [`Issue`]: admissibility
//! filtering, bug classification, and descriptive metrics (description words and length,
//! comment counts, response latencies, participants, resolution time).
//!
//! ```no_run
//! use issuefeat::{load_config, Issue, IssueAnalyzer};
//!
//! # fn main() -> anyhow::Result<()> {
//! let analyzer = IssueAnalyzer::from_config(&load_config())?;
//! let issue = Issue::from_json_str(r#"{"user": {"login": "reporter"}, "body": null}"#)?;
//! println!("{} words", analyzer.description_length(&issue));
//! # Ok(())
//! # }
//! ```

// Export modules for library usage
pub mod analyzer;
pub mod classify;
pub mod config;
pub mod core;
pub mod errors;
pub mod metrics;
pub mod text;

// Re-export commonly used types
pub use crate::analyzer::{IssueAnalyzer, IssueFeatures};

pub use crate::classify::{
    is_bug_label, looks_like_bot, BotClassifier, BugLabelMatcher, Exclusion, GroundTruthBots,
    IssueFilter, LanguageIdentifier, WhatlangIdentifier,
};

pub use crate::config::{load_config, load_config_from_path, IssueFeatConfig};

pub use crate::core::{Comment, CommentEntry, CommentThread, Issue, Label, Timestamp, User};

pub use crate::errors::{BotTableError, IssueError};
