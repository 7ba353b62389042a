// Chunk: docs/chunks/editor_config - JSON-loadable editor settings

//! Editor settings.
//!
//! Where the settings live on disk is the host's business; this module only
//! turns a JSON document into a validated [`EditorConfig`]. Missing fields take
//! their defaults, so `{}` is a valid configuration.

use gapline_buffer::DEFAULT_GAP_RESERVE;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of columns a tab advances the cursor column.
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Errors produced while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("`{field}` must be at least 1")]
    ZeroValue { field: &'static str },
}

/// Settings shared by every buffer and view in an [`EditorContext`].
///
/// [`EditorContext`]: crate::EditorContext
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Columns a tab character occupies when computing cursor columns.
    pub tab_width: usize,
    /// Cells added to a gap buffer each time it grows.
    pub gap_reserve: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_width: DEFAULT_TAB_WIDTH,
            gap_reserve: DEFAULT_GAP_RESERVE,
        }
    }
}

impl EditorConfig {
    /// Parses and validates a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tab_width == 0 {
            return Err(ConfigError::ZeroValue { field: "tab_width" });
        }
        if self.gap_reserve == 0 {
            return Err(ConfigError::ZeroValue {
                field: "gap_reserve",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.tab_width, 4);
        assert_eq!(config.gap_reserve, 64);
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = EditorConfig::from_json("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = EditorConfig::from_json(r#"{ "tab_width": 8 }"#).unwrap();
        assert_eq!(config.tab_width, 8);
        assert_eq!(config.gap_reserve, DEFAULT_GAP_RESERVE);
    }

    #[test]
    fn test_zero_tab_width_rejected() {
        let result = EditorConfig::from_json(r#"{ "tab_width": 0 }"#);
        assert!(matches!(
            result,
            Err(ConfigError::ZeroValue { field: "tab_width" })
        ));
    }

    #[test]
    fn test_zero_gap_reserve_rejected() {
        let result = EditorConfig::from_json(r#"{ "gap_reserve": 0 }"#);
        assert!(matches!(
            result,
            Err(ConfigError::ZeroValue {
                field: "gap_reserve"
            })
        ));
    }

    #[test]
    fn test_malformed_json() {
        let result = EditorConfig::from_json("{ tab_width: ");
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_json_round_trip() {
        let config = EditorConfig {
            tab_width: 2,
            gap_reserve: 128,
        };
        let json = config.to_json().unwrap();
        assert_eq!(EditorConfig::from_json(&json).unwrap(), config);
    }
}
