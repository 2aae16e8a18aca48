//! Planner settings.
//!
//! Defaults are compiled in; a JSON file may override them, and the command
//! line overrides both.

use crate::calculations::PlanMode;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_DAYS_AHEAD: i64 = 2;
pub const DEFAULT_UPCOMING_LIMIT: usize = 14;
/// Upper bound for `days_ahead`, roughly ten years.
pub const MAX_DAYS_AHEAD: i64 = 3650;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] io::Error),
    #[error("invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub days_ahead: i64,
    pub upcoming_limit: usize,
    pub mode: PlanMode,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            days_ahead: DEFAULT_DAYS_AHEAD,
            upcoming_limit: DEFAULT_UPCOMING_LIMIT,
            mode: PlanMode::default(),
        }
    }
}

impl PlannerConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let config: PlannerConfig = serde_json::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.days_ahead < 0 {
            return Err(ConfigError::Invalid(format!(
                "days_ahead must not be negative (got {})",
                self.days_ahead
            )));
        }
        if self.days_ahead > MAX_DAYS_AHEAD {
            return Err(ConfigError::Invalid(format!(
                "days_ahead must be at most {MAX_DAYS_AHEAD} (got {})",
                self.days_ahead
            )));
        }
        if self.upcoming_limit == 0 {
            return Err(ConfigError::Invalid(
                "upcoming_limit must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
