use std::path::PathBuf;

use four_in_a_row::{MAX_DEPTH, MAX_DEPTH_LIMIT};
use thiserror::Error;

pub const DEPTH_VAR: &str = "FOUR_IN_A_ROW_DEPTH";
pub const LOG_DIR_VAR: &str = "FOUR_IN_A_ROW_LOG_DIR";
pub const NAME_VAR: &str = "FOUR_IN_A_ROW_NAME";

const DEFAULT_LOG_DIR: &str = "analysis";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a number, found {value:?}")]
    NotANumber { var: &'static str, value: String },
    #[error("{var} must be in 1-{}, found {value}", MAX_DEPTH_LIMIT)]
    DepthOutOfRange { var: &'static str, value: u64 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayConfig {
    /// Plies the AI looks ahead.
    pub depth: u8,
    /// Where per-turn search records go; `None` disables them.
    pub log_dir: Option<PathBuf>,
    /// Human's name; prompted for when unset.
    pub name: Option<String>,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            depth: MAX_DEPTH,
            log_dir: Some(PathBuf::from(DEFAULT_LOG_DIR)),
            name: None,
        }
    }
}

impl PlayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(DEPTH_VAR) {
            config.depth = parse_depth(raw.trim())?;
        }
        if let Some(raw) = lookup(LOG_DIR_VAR) {
            let raw = raw.trim();
            config.log_dir = (!raw.is_empty()).then(|| PathBuf::from(raw));
        }
        if let Some(raw) = lookup(NAME_VAR) {
            let raw = raw.trim();
            if !raw.is_empty() {
                config.name = Some(raw.to_string());
            }
        }
        Ok(config)
    }
}

fn parse_depth(raw: &str) -> Result<u8, ConfigError> {
    let value: u64 = raw.parse().map_err(|_| ConfigError::NotANumber {
        var: DEPTH_VAR,
        value: raw.to_string(),
    })?;
    match u8::try_from(value) {
        Ok(depth) if (1..=MAX_DEPTH_LIMIT).contains(&depth) => Ok(depth),
        _ => Err(ConfigError::DepthOutOfRange {
            var: DEPTH_VAR,
            value,
        }),
    }
}
