//! Bot account detection.
//!
//! A login is a bot when its lowercase letters end in `bot` (catching `dependabot`,
//! `github-actions[bot]`, `renovate-bot`, ...) or when the ground-truth table lists it with
//! the bot classification. The table is a headerless three-column CSV: login, an unused
//! column, classification.

use crate::config::{BotConfig, ReloadPolicy};
use crate::errors::BotTableError;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Name-based half of the bot test
pub fn looks_like_bot(login: &str) -> bool {
    let letters: String = login
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase())
        .collect();
    letters.ends_with("bot")
}

/// Logins the ground-truth table classifies as bots
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroundTruthBots {
    logins: HashSet<String>,
}

impl GroundTruthBots {
    pub fn load(path: &Path, bot_label: &str) -> Result<Self, BotTableError> {
        let file = File::open(path).map_err(|source| BotTableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file, path, bot_label)
    }

    /// Parse a table from any reader; `origin` only labels errors
    pub fn from_reader<R: Read>(
        reader: R,
        origin: &Path,
        bot_label: &str,
    ) -> Result<Self, BotTableError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut logins = HashSet::new();
        for record in csv_reader.records() {
            let record = record.map_err(|source| BotTableError::Csv {
                path: origin.to_path_buf(),
                source,
            })?;
            let (Some(login), Some(classification)) = (record.get(0), record.get(2)) else {
                return Err(BotTableError::MalformedRow {
                    path: origin.to_path_buf(),
                    line: record.position().map_or(0, |pos| pos.line()),
                });
            };
            if classification == bot_label {
                logins.insert(login.to_string());
            }
        }

        Ok(Self { logins })
    }

    pub fn from_logins<I, S>(logins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            logins: logins.into_iter().map(Into::into).collect(),
        }
    }

    /// Exact, case-sensitive membership
    pub fn contains(&self, login: &str) -> bool {
        self.logins.contains(login)
    }

    pub fn len(&self) -> usize {
        self.logins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.logins.is_empty()
    }
}

#[derive(Debug, Clone)]
enum TableSource {
    Reload { path: PathBuf, bot_label: String },
    Loaded(GroundTruthBots),
}

/// Decides whether an account is automated
#[derive(Debug, Clone)]
pub struct BotClassifier {
    source: TableSource,
}

impl BotClassifier {
    /// Build from config. The table is read once here in either reload mode so a
    /// missing or malformed file fails before any issue is processed.
    pub fn from_config(config: &BotConfig) -> Result<Self, BotTableError> {
        let table = GroundTruthBots::load(&config.ground_truth, &config.bot_label)?;
        let source = match config.reload {
            ReloadPolicy::Once => TableSource::Loaded(table),
            ReloadPolicy::EveryCall => TableSource::Reload {
                path: config.ground_truth.clone(),
                bot_label: config.bot_label.clone(),
            },
        };
        Ok(Self { source })
    }

    pub fn with_table(table: GroundTruthBots) -> Self {
        Self {
            source: TableSource::Loaded(table),
        }
    }

    pub fn is_bot(&self, login: &str) -> Result<bool, BotTableError> {
        if looks_like_bot(login) {
            return Ok(true);
        }
        match &self.source {
            TableSource::Loaded(table) => Ok(table.contains(login)),
            TableSource::Reload { path, bot_label } => {
                Ok(GroundTruthBots::load(path, bot_label)?.contains(login))
            }
        }
    }
}
