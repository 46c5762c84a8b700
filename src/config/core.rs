use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use whatlang::Lang;

/// Root configuration structure for issuefeat
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueFeatConfig {
    /// Bot ground-truth table settings
    #[serde(default)]
    pub bots: BotConfig,

    /// Admissibility filter settings
    #[serde(default)]
    pub filter: FilterConfig,

    /// Bug label matching settings
    #[serde(default)]
    pub bug: BugConfig,
}

impl IssueFeatConfig {
    /// Check values that deserialize fine but cannot drive the classifiers
    pub fn validate(&self) -> Result<(), String> {
        if self.filter.min_close_seconds < 0 {
            return Err(format!(
                "filter.min_close_seconds must be non-negative, got {}",
                self.filter.min_close_seconds
            ));
        }
        if self.filter.accepted_language().is_none() {
            return Err(format!(
                "filter.language {:?} is not a known ISO 639-3 code",
                self.filter.language
            ));
        }
        if self.bug.label_markers.is_empty() {
            return Err("bug.label_markers must not be empty".to_string());
        }
        if self.bots.bot_label.is_empty() {
            return Err("bots.bot_label must not be empty".to_string());
        }
        Ok(())
    }
}

/// How often the ground-truth CSV is read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReloadPolicy {
    /// Re-read the table on every bot check
    #[default]
    EveryCall,
    /// Read the table once when the classifier is built
    Once,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotConfig {
    #[serde(default = "default_ground_truth")]
    pub ground_truth: PathBuf,

    /// Value of the classification column that marks a bot account
    #[serde(default = "default_bot_label")]
    pub bot_label: String,

    #[serde(default)]
    pub reload: ReloadPolicy,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            ground_truth: default_ground_truth(),
            bot_label: default_bot_label(),
            reload: ReloadPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Issues closed faster than this are treated as trivially closed
    #[serde(default = "default_min_close_seconds")]
    pub min_close_seconds: i64,

    /// Case-insensitive substrings that disqualify a label
    #[serde(default = "default_excluded_label_markers")]
    pub excluded_label_markers: Vec<String>,

    /// ISO 639-3 code the detected language must equal
    #[serde(default = "default_language")]
    pub language: String,
}

impl FilterConfig {
    pub fn accepted_language(&self) -> Option<Lang> {
        Lang::from_code(&self.language)
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_close_seconds: default_min_close_seconds(),
            excluded_label_markers: default_excluded_label_markers(),
            language: default_language(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BugConfig {
    #[serde(default = "default_bug_label_markers")]
    pub label_markers: Vec<String>,

    /// A label containing this substring is never a bug label
    #[serde(default = "default_negation_marker")]
    pub negation_marker: String,
}

impl Default for BugConfig {
    fn default() -> Self {
        Self {
            label_markers: default_bug_label_markers(),
            negation_marker: default_negation_marker(),
        }
    }
}

fn default_ground_truth() -> PathBuf {
    PathBuf::from("./groundtruthbots.csv")
}
fn default_bot_label() -> String {
    "Bot".to_string()
}
fn default_min_close_seconds() -> i64 {
    30
}
fn default_excluded_label_markers() -> Vec<String> {
    vec!["invalid".to_string(), "duplicate".to_string()]
}
fn default_language() -> String {
    "eng".to_string()
}
fn default_bug_label_markers() -> Vec<String> {
    ["bug", "crash", "defect", "regression", "unexpected behaviour"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
fn default_negation_marker() -> String {
    "not".to_string()
}
