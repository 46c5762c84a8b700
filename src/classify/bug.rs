//! Bug report classification from issue labels.
//!
//! Matching is substring-based on lowercased label names. A label that contains the
//! negation marker (`not` by default) never counts, which also drops labels such as
//! `annotation: bug` or `cannot reproduce`. That crude negation guard is part of the
//! measured definition and is kept as is.

use crate::config::BugConfig;
use crate::core::Issue;

/// Label matcher parameterised by marker lists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BugLabelMatcher {
    markers: Vec<String>,
    negation: String,
}

impl Default for BugLabelMatcher {
    fn default() -> Self {
        Self::from_config(&BugConfig::default())
    }
}

impl BugLabelMatcher {
    pub fn from_config(config: &BugConfig) -> Self {
        Self {
            markers: config
                .label_markers
                .iter()
                .map(|m| m.to_lowercase())
                .collect(),
            negation: config.negation_marker.to_lowercase(),
        }
    }

    /// Check if a single label names a bug
    pub fn is_bug_label(&self, label: &str) -> bool {
        let lowercase = label.to_lowercase();
        if !self.negation.is_empty() && lowercase.contains(&self.negation) {
            return false;
        }
        self.markers
            .iter()
            .any(|marker| lowercase.contains(marker.as_str()))
    }

    /// True if any label of the issue names a bug.
    ///
    /// Intended for issues that already passed the admissibility filter.
    pub fn is_bug(&self, issue: &Issue) -> bool {
        issue.label_names().any(|label| self.is_bug_label(label))
    }
}

/// Check a label against the default markers
pub fn is_bug_label(label: &str) -> bool {
    BugLabelMatcher::default().is_bug_label(label)
}
