use anyhow::{Context as _, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::core::IssueFeatConfig;

/// File name searched for in the current directory and its ancestors
pub const CONFIG_FILE_NAME: &str = ".issuefeat.toml";

/// Raw TOML text of an `.issuefeat.toml` candidate
pub(crate) fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    fs::read_to_string(path)
}

/// Pure function to parse and validate config from TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<IssueFeatConfig, String> {
    let config = toml::from_str::<IssueFeatConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))?;
    config.validate()?;
    Ok(config)
}

/// Load a config from an explicit path; unlike discovery, every failure is an error
pub fn load_config_from_path(path: &Path) -> Result<IssueFeatConfig> {
    let contents = read_config_file(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    parse_and_validate_config(&contents)
        .map_err(anyhow::Error::msg)
        .with_context(|| format!("Invalid config file {}", path.display()))
}

pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<IssueFeatConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// A missing candidate is expected during discovery; anything else is worth a warning
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    if error.kind() == ErrorKind::NotFound {
        return;
    }
    log::warn!(
        "Cannot read {} at {}: {}",
        CONFIG_FILE_NAME,
        config_path.display(),
        error
    );
}

/// `start` followed by its parents, nearest first, at most `max_depth` entries
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| dir.parent().map(Path::to_path_buf)).take(max_depth)
}

/// Find `.issuefeat.toml` in `start` or one of its ancestors
pub fn load_config_from(start: PathBuf) -> IssueFeatConfig {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            IssueFeatConfig::default()
        })
}

pub fn load_config() -> IssueFeatConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_from(dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            IssueFeatConfig::default()
        }
    }
}
