//! Per-issue feature extraction facade.
//!
//! [`IssueAnalyzer`] owns the resources the classifiers need (bot table, language
//! identifier, label markers) and exposes every metric for a single issue. It holds no
//! state across issues, so one analyzer can be shared by callers that process issues in
//! parallel.

use crate::classify::{
    BotClassifier, BugLabelMatcher, Exclusion, IssueFilter, LanguageIdentifier,
    WhatlangIdentifier,
};
use crate::config::IssueFeatConfig;
use crate::core::Issue;
use crate::errors::Result;
use crate::{metrics, text};
use anyhow::Context as _;
use serde::Serialize;
use tracing::debug_span;

/// Every feature of one issue
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueFeatures {
    pub admissible: bool,
    pub is_bug: bool,
    pub description_words: Vec<String>,
    pub description_length: usize,
    pub comments: usize,
    pub first_comment_time: Option<f64>,
    pub last_comment_time: Option<f64>,
    pub participants: usize,
    pub closed_time: f64,
}

#[derive(Debug)]
pub struct IssueAnalyzer {
    bots: BotClassifier,
    filter: IssueFilter,
    bug: BugLabelMatcher,
}

impl IssueAnalyzer {
    /// Build with the built-in language model.
    ///
    /// Fails when the bot ground-truth table cannot be loaded.
    pub fn from_config(config: &IssueFeatConfig) -> anyhow::Result<Self> {
        Self::with_identifier(config, Box::new(WhatlangIdentifier))
    }

    pub fn with_identifier(
        config: &IssueFeatConfig,
        identifier: Box<dyn LanguageIdentifier>,
    ) -> anyhow::Result<Self> {
        let bots = BotClassifier::from_config(&config.bots).with_context(|| {
            format!(
                "Failed to load bot ground truth from {}",
                config.bots.ground_truth.display()
            )
        })?;
        let filter = IssueFilter::from_config(&config.filter, identifier)?;
        Ok(Self::from_parts(
            bots,
            filter,
            BugLabelMatcher::from_config(&config.bug),
        ))
    }

    pub fn from_parts(bots: BotClassifier, filter: IssueFilter, bug: BugLabelMatcher) -> Self {
        Self { bots, filter, bug }
    }

    pub fn is_bot(&self, login: &str) -> Result<bool> {
        Ok(self.bots.is_bot(login)?)
    }

    pub fn filter_issue(&self, issue: &Issue) -> Result<bool> {
        self.filter.filter_issue(issue, &self.bots)
    }

    pub fn exclusion(&self, issue: &Issue) -> Result<Option<Exclusion>> {
        self.filter.exclusion(issue, &self.bots)
    }

    pub fn is_bug(&self, issue: &Issue) -> bool {
        self.bug.is_bug(issue)
    }

    pub fn description_words(&self, issue: &Issue) -> Vec<String> {
        text::description_words(issue)
    }

    pub fn description_length(&self, issue: &Issue) -> usize {
        text::description_length(issue)
    }

    pub fn comments(&self, issue: &Issue) -> Result<usize> {
        metrics::comment_count(issue, &self.bots)
    }

    pub fn first_comment_time(&self, issue: &Issue) -> Result<Option<f64>> {
        metrics::first_comment_time(issue, &self.bots)
    }

    pub fn last_comment_time(&self, issue: &Issue) -> Result<Option<f64>> {
        metrics::last_comment_time(issue, &self.bots)
    }

    pub fn participants(&self, issue: &Issue) -> Result<usize> {
        metrics::participant_count(issue, &self.bots)
    }

    pub fn closed_time(&self, issue: &Issue) -> Result<f64> {
        metrics::closed_time(issue)
    }

    /// Compute every feature of an issue in one pass
    pub fn extract(&self, issue: &Issue) -> Result<IssueFeatures> {
        let span = debug_span!("extract_features", author = issue.author());
        let _enter = span.enter();

        let exclusion = self.exclusion(issue)?;
        if let Some(reason) = &exclusion {
            tracing::debug!(%reason, "issue is not admissible");
        }

        Ok(IssueFeatures {
            admissible: exclusion.is_none(),
            is_bug: self.is_bug(issue),
            description_words: self.description_words(issue),
            description_length: self.description_length(issue),
            comments: self.comments(issue)?,
            first_comment_time: self.first_comment_time(issue)?,
            last_comment_time: self.last_comment_time(issue)?,
            participants: self.participants(issue)?,
            closed_time: self.closed_time(issue)?,
        })
    }
}
