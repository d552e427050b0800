//! Runner configuration from the environment.

use std::env;
use std::path::PathBuf;

use crate::types::Mode;

pub const DEFAULT_DATA_DIR: &str = ".cascade-arcade";

/// Runner configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Directory for the JSON best-score files.
    pub data_dir: PathBuf,
    /// Mode used when a `start` request names none.
    pub mode: Mode,
    /// Fixed seed for the opening session (replays).
    pub seed: Option<String>,
    /// Write best scores to disk; off keeps them in memory.
    pub persist: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            mode: Mode::Daily,
            seed: None,
            persist: true,
        }
    }
}

impl RunnerConfig {
    /// Read `CASCADE_ARCADE_DATA_DIR` and `CASCADE_ARCADE_MODE`.
    pub fn from_env() -> Self {
        let data_dir = env::var("CASCADE_ARCADE_DATA_DIR")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let mode = env::var("CASCADE_ARCADE_MODE")
            .ok()
            .and_then(|s| Mode::from_str(s.trim()))
            .unwrap_or(Mode::Daily);

        Self {
            data_dir,
            mode,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runner_config_from_env() {
        // Only checks that reading the environment never panics.
        let config = RunnerConfig::from_env();
        assert!(config.persist);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_default_is_daily_on_disk() {
        let config = RunnerConfig::default();
        assert_eq!(config.mode, Mode::Daily);
        assert_eq!(config.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
    }
}
