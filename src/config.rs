use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::types::interval::MIN_SPAN_SECS;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/process";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Classification service URL; receives the clip as a JSON POST.
    pub endpoint: String,
    pub min_span_secs: f64,
    /// `None` waits for the service indefinitely.
    pub request_timeout_secs: Option<u64>,
    /// Poll cadence while playing, which drives the time-update ticks.
    pub tick_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            min_span_secs: MIN_SPAN_SECS,
            request_timeout_secs: None,
            tick_interval_ms: 100,
        }
    }
}

impl Config {
    /// Loads a JSON config. A missing file yields the defaults.
    pub fn load_from_file(path: &Path) -> Result<Config, ConfigError> {
        let path_str = path.display().to_string();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path_str, "Config file not found, using defaults");
                return Ok(Config::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path_str,
                    source,
                });
            }
        };
        let config: Config = serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path_str,
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid("endpoint must not be empty".to_string()));
        }
        if !self.min_span_secs.is_finite() || self.min_span_secs <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "min_span_secs must be positive, got {}",
                self.min_span_secs
            )));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid("tick_interval_ms must be non-zero".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from_file(&dir.path().join("genreclip.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.min_span_secs, 30.0);
        assert!(config.request_timeout_secs.is_none());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, r#"{{"endpoint": "http://classifier.local/process"}}"#).unwrap();
        let config = Config::load_from_file(tmp.path()).unwrap();
        assert_eq!(config.endpoint, "http://classifier.local/process");
        assert_eq!(config.tick_interval_ms, 100);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, "{{ not json").unwrap();
        let err = Config::load_from_file(tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_rejects_non_positive_span() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, r#"{{"min_span_secs": 0}}"#).unwrap();
        let err = Config::load_from_file(tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
