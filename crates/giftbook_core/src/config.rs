//! Runtime configuration resolved from the environment.
//!
//! # Responsibility
//! - Resolve database path, logging and capture settings for front ends.
//!
//! # Invariants
//! - Blank variables behave as unset and fall back to defaults.
//! - Resolution never touches the file system.

use crate::logging::{default_log_level, LogLevel};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "GIFTBOOK_DB_PATH";
pub const LOG_DIR_VAR: &str = "GIFTBOOK_LOG_DIR";
pub const LOG_LEVEL_VAR: &str = "GIFTBOOK_LOG_LEVEL";
pub const SCREEN_WIDTH_VAR: &str = "GIFTBOOK_SCREEN_WIDTH";

const DEFAULT_DB_FILE_NAME: &str = "giftbook.sqlite3";
/// Logical width of a typical phone screen.
pub const DEFAULT_SCREEN_WIDTH: f64 = 390.0;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidLogLevel(String),
    InvalidScreenWidth(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel(value) => write!(
                f,
                "{LOG_LEVEL_VAR}=`{value}` is not one of trace|debug|info|warn|error"
            ),
            Self::InvalidScreenWidth(value) => {
                write!(f, "{SCREEN_WIDTH_VAR}=`{value}` must be a positive number")
            }
        }
    }
}

impl Error for ConfigError {}

/// Settings shared by every front end of the core.
#[derive(Debug, Clone, PartialEq)]
pub struct GiftbookConfig {
    pub db_path: PathBuf,
    /// Logging stays off when unset.
    pub log_dir: Option<PathBuf>,
    pub log_level: LogLevel,
    pub screen_width: f64,
}

impl Default for GiftbookConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_dir: None,
            log_level: default_log_level(),
            screen_width: DEFAULT_SCREEN_WIDTH,
        }
    }
}

impl GiftbookConfig {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|trimmed| !trimmed.is_empty())
        };
        let mut config = Self::default();

        if let Some(path) = value(DB_PATH_VAR) {
            config.db_path = PathBuf::from(path);
        }
        config.log_dir = value(LOG_DIR_VAR).map(PathBuf::from);
        if let Some(level) = value(LOG_LEVEL_VAR) {
            config.log_level = level
                .parse()
                .map_err(|_| ConfigError::InvalidLogLevel(level.clone()))?;
        }
        if let Some(width) = value(SCREEN_WIDTH_VAR) {
            config.screen_width = width
                .parse::<f64>()
                .ok()
                .filter(|w| w.is_finite() && *w > 0.0)
                .ok_or(ConfigError::InvalidScreenWidth(width))?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = GiftbookConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, GiftbookConfig::default());
        assert!(config.db_path.ends_with(DEFAULT_DB_FILE_NAME));
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn variables_override_defaults_and_blank_values_are_ignored() {
        let config = GiftbookConfig::from_lookup(lookup_from(&[
            (DB_PATH_VAR, " /data/gifts.sqlite3 "),
            (LOG_DIR_VAR, "   "),
            (LOG_LEVEL_VAR, "WARNING"),
            (SCREEN_WIDTH_VAR, "400"),
        ]))
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("/data/gifts.sqlite3"));
        assert!(config.log_dir.is_none());
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.screen_width, 400.0);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = GiftbookConfig::from_lookup(lookup_from(&[(SCREEN_WIDTH_VAR, "-3")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::InvalidScreenWidth("-3".to_string()));

        let err =
            GiftbookConfig::from_lookup(lookup_from(&[(LOG_LEVEL_VAR, "loud")])).unwrap_err();
        assert!(err.to_string().contains("loud"));
    }
}
