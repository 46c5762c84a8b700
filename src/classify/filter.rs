//! Admissibility filter.
//!
//! An issue is excluded when any of the following holds, checked in this order:
//! 1. its body is not written in the accepted language
//! 2. it was closed within `min_close_seconds` of being opened
//! 3. it was submitted by a bot
//! 4. one of its labels marks it as invalid or duplicate

use super::bots::BotClassifier;
use super::language::{single_line, LanguageIdentifier};
use crate::config::FilterConfig;
use crate::core::Issue;
use crate::errors::Result;
use anyhow::anyhow;
use serde::Serialize;
use std::fmt;
use whatlang::Lang;

/// Why an issue was excluded from analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Exclusion {
    NonEnglish {
        #[serde(serialize_with = "serialize_lang")]
        detected: Lang,
    },
    ClosedTooQuickly {
        seconds: i64,
    },
    BotAuthor {
        login: String,
    },
    InvalidLabel {
        label: String,
    },
}

fn serialize_lang<S: serde::Serializer>(lang: &Lang, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_str(lang.code())
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonEnglish { detected } => write!(f, "body detected as {}", detected.code()),
            Self::ClosedTooQuickly { seconds } => write!(f, "closed after {seconds}s"),
            Self::BotAuthor { login } => write!(f, "submitted by bot {login}"),
            Self::InvalidLabel { label } => write!(f, "labelled {label:?}"),
        }
    }
}

pub struct IssueFilter {
    identifier: Box<dyn LanguageIdentifier>,
    accepted: Lang,
    min_close_seconds: i64,
    excluded_markers: Vec<String>,
}

impl fmt::Debug for IssueFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssueFilter")
            .field("accepted", &self.accepted)
            .field("min_close_seconds", &self.min_close_seconds)
            .field("excluded_markers", &self.excluded_markers)
            .finish_non_exhaustive()
    }
}

impl IssueFilter {
    pub fn from_config(
        config: &FilterConfig,
        identifier: Box<dyn LanguageIdentifier>,
    ) -> anyhow::Result<Self> {
        let accepted = config
            .accepted_language()
            .ok_or_else(|| anyhow!("unknown language code {:?}", config.language))?;
        Ok(Self {
            identifier,
            accepted,
            min_close_seconds: config.min_close_seconds,
            excluded_markers: config
                .excluded_label_markers
                .iter()
                .map(|m| m.to_lowercase())
                .collect(),
        })
    }

    /// First rule that excludes the issue, or `None` if it is admissible.
    ///
    /// Fails when `created_at` or `closed_at` is missing and the language rule did not
    /// already exclude the issue.
    pub fn exclusion(&self, issue: &Issue, bots: &BotClassifier) -> Result<Option<Exclusion>> {
        let text = single_line(issue.body_text());
        // Undetectable text (e.g. an empty body) is not held against the issue
        if let Some(detected) = self.identifier.top_language(&text) {
            if detected != self.accepted {
                return Ok(Some(Exclusion::NonEnglish { detected }));
            }
        }

        let seconds = issue.created()?.seconds_until(&issue.closed()?);
        if seconds < self.min_close_seconds {
            return Ok(Some(Exclusion::ClosedTooQuickly { seconds }));
        }

        if bots.is_bot(issue.author())? {
            return Ok(Some(Exclusion::BotAuthor {
                login: issue.author().to_string(),
            }));
        }

        let invalid = issue.label_names().find(|label| {
            let lowercase = label.to_lowercase();
            self.excluded_markers
                .iter()
                .any(|marker| lowercase.contains(marker.as_str()))
        });
        if let Some(label) = invalid {
            return Ok(Some(Exclusion::InvalidLabel {
                label: label.to_string(),
            }));
        }

        Ok(None)
    }

    /// Whether the issue is admissible for analysis
    pub fn filter_issue(&self, issue: &Issue, bots: &BotClassifier) -> Result<bool> {
        Ok(self.exclusion(issue, bots)?.is_none())
    }
}
