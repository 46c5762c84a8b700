//! Issue and account classifiers: bot detection, admissibility and bug labelling.

pub mod bots;
pub mod bug;
pub mod filter;
pub mod language;

pub use bots::{looks_like_bot, BotClassifier, GroundTruthBots};
pub use bug::{is_bug_label, BugLabelMatcher};
pub use filter::{Exclusion, IssueFilter};
pub use language::{FixedLanguage, LanguageIdentifier, WhatlangIdentifier};
