//! Configuration for the game loop driver

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{EngineError, Result};

/// Default interval between two automatic descends
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;

/// Main configuration for a game driver
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Interval between automatic descends, in milliseconds
    pub tick_interval_ms: u64,

    /// Seed for piece selection (random seed if None)
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a JSON file. Missing fields take default values.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: EngineConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the tick interval in milliseconds
    pub fn with_tick_interval_ms(mut self, tick_interval_ms: u64) -> Self {
        self.tick_interval_ms = tick_interval_ms;
        self
    }

    /// Set the piece selection seed
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(EngineError::InvalidConfig(
                "tick_interval_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("tetris-engine-{}-{}", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_defaults_and_builder() {
        let config = EngineConfig::new();
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
        assert_eq!(config.seed, None);

        let config = config.with_tick_interval_ms(250).with_seed(Some(9));
        assert_eq!(config.tick_interval_ms, 250);
        assert_eq!(config.seed, Some(9));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let result = EngineConfig::new().with_tick_interval_ms(0).validate();
        assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_from_file() {
        let path = write_temp("partial.json", r#"{ "seed": 3 }"#);
        let config = EngineConfig::from_file(&path).unwrap();
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.tick_interval_ms, DEFAULT_TICK_INTERVAL_MS);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_from_file_errors() {
        let missing = std::env::temp_dir().join("tetris-engine-does-not-exist.json");
        assert!(matches!(EngineConfig::from_file(&missing), Err(EngineError::Io(_))));

        let path = write_temp("unknown.json", r#"{ "speed": 3 }"#);
        assert!(matches!(EngineConfig::from_file(&path), Err(EngineError::Serialization(_))));
        let _ = std::fs::remove_file(path);

        let path = write_temp("zero.json", r#"{ "tick_interval_ms": 0 }"#);
        assert!(matches!(EngineConfig::from_file(&path), Err(EngineError::InvalidConfig(_))));
        let _ = std::fs::remove_file(path);
    }
}
