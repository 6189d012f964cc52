// In: src/config.rs

//! The single source of truth for result-stream configuration.
//!
//! `StreamConfig` is created once at the application boundary (typically from a
//! JSON document or `Default::default()`) and then shared read-only as an
//! `Arc<StreamConfig>` by every `ResultStream` opened with it.

use serde::{Deserialize, Serialize};

use crate::error::RowStreamError;
use crate::result::capability::FetchDirection;

/// Configuration accepted by `ResultStream::open`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct StreamConfig {
    /// Advisory batch size. Only validated and reported; the engine decides the
    /// real chunk cardinality. `0` means "engine default".
    #[serde(default)]
    pub fetch_size: i64,

    /// Initial fetch direction hint.
    #[serde(default)]
    pub fetch_direction: FetchDirection,

    /// If true, opening a stream installs the crate's `env_logger` backend.
    #[serde(default)]
    pub verbose_logging: bool,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            fetch_size: 0,
            fetch_direction: FetchDirection::default(),
            verbose_logging: false,
        }
    }
}

impl StreamConfig {
    /// Parses a JSON document into a validated config.
    pub fn from_json_str(json: &str) -> Result<Self, RowStreamError> {
        let config: StreamConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects negative fetch sizes and non-forward fetch directions.
    pub fn validate(&self) -> Result<(), RowStreamError> {
        if self.fetch_size < 0 {
            return Err(RowStreamError::InvalidFetchSize(self.fetch_size));
        }
        if !self.fetch_direction.is_supported() {
            return Err(RowStreamError::InvalidFetchDirection(self.fetch_direction));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_yields_defaults() {
        let config = StreamConfig::from_json_str("{}").unwrap();
        assert_eq!(config, StreamConfig::default());
    }

    #[test]
    fn test_full_json_is_parsed() {
        let config = StreamConfig::from_json_str(
            r#"{"fetch_size": 2048, "fetch_direction": "unknown", "verbose_logging": true}"#,
        )
        .unwrap();
        assert_eq!(config.fetch_size, 2048);
        assert_eq!(config.fetch_direction, FetchDirection::Unknown);
        assert!(config.verbose_logging);
    }

    #[test]
    fn test_negative_fetch_size_is_rejected() {
        let result = StreamConfig::from_json_str(r#"{"fetch_size": -1}"#);
        assert!(matches!(result, Err(RowStreamError::InvalidFetchSize(-1))));
    }

    #[test]
    fn test_reverse_direction_is_rejected() {
        let result = StreamConfig::from_json_str(r#"{"fetch_direction": "reverse"}"#);
        assert!(matches!(
            result,
            Err(RowStreamError::InvalidFetchDirection(FetchDirection::Reverse))
        ));
    }

    #[test]
    fn test_malformed_json_surfaces_serde_error() {
        let result = StreamConfig::from_json_str("{not json");
        assert!(matches!(result, Err(RowStreamError::SerdeJson(_))));
    }
}
