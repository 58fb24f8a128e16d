//! Drawing configuration.

use crate::document::DEFAULT_CONTENT_PADDING;
use crate::outline::OutlineParams;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Tunables shared by the session, tools and renderer.
///
/// Every field has a default, so partial JSON documents are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawingConfig {
    /// Base Douglas-Peucker tolerance, scaled up for wide strokes.
    pub simplify_epsilon: f64,
    /// Padding around stroke points in the scrollable content area.
    pub bounds_padding: f64,
    pub outline: OutlineParams,
    /// Commit the stroke when the pointer leaves the surface mid-draw;
    /// otherwise leaving discards it like a cancel.
    pub commit_on_leave: bool,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            simplify_epsilon: 0.5,
            bounds_padding: DEFAULT_CONTENT_PADDING,
            outline: OutlineParams::default(),
            commit_on_leave: true,
        }
    }
}

impl DrawingConfig {
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&contents)?;
        log::debug!("Loaded drawing config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_object_is_default() {
        let config = DrawingConfig::from_json_str("{}").unwrap();
        assert_eq!(config, DrawingConfig::default());
    }

    #[test]
    fn test_partial_outline_params() {
        let config =
            DrawingConfig::from_json_str(r#"{"commit_on_leave": false, "outline": {"thinning": 0.0}}"#)
                .unwrap();
        assert!(!config.commit_on_leave);
        assert!(config.outline.thinning.abs() < f64::EPSILON);
        assert!((config.outline.spacing - 0.15).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_json() {
        let result = DrawingConfig::from_json_str("{not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"simplify_epsilon": 2.0, "bounds_padding": 10.0}}"#).unwrap();

        let config = DrawingConfig::load(file.path()).unwrap();
        assert!((config.simplify_epsilon - 2.0).abs() < f64::EPSILON);
        assert!((config.bounds_padding - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = DrawingConfig::load(dir.path().join("missing.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
