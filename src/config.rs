use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// Tunables for the editor core. Every field has a default, so partial files load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub canvas_size: CanvasSize,
    /// Rotation snaps to multiples of this many degrees
    pub snap_increment_degrees: f32,
    /// Fraction of the remaining distance to the snapped angle covered per update
    pub rotation_smoothing: f32,
    pub min_element_size: f32,
    pub min_scale: f32,
    pub resize_handle_radius: f32,
    pub rotate_handle_offset: f32,
    pub history_limit: Option<usize>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_size: CanvasSize::default(),
            snap_increment_degrees: 45.0,
            rotation_smoothing: 0.2,
            min_element_size: crate::element::MIN_ELEMENT_SIZE,
            min_scale: crate::element::MIN_ELEMENT_SCALE,
            resize_handle_radius: 15.0,
            rotate_handle_offset: 30.0,
            history_limit: None,
        }
    }
}

impl EditorConfig {
    /// Parses and validates a config, filling missing fields with defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded editor config from {}", path.display());
        Ok(config)
    }

    /// Rejects sizes, factors and increments that would break gestures
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.snap_increment_degrees > 0.0 && self.snap_increment_degrees <= 360.0) {
            return Err(ConfigError::Invalid {
                field: "snap_increment_degrees",
                reason: format!("{} is outside (0, 360]", self.snap_increment_degrees),
            });
        }
        if !(self.rotation_smoothing > 0.0 && self.rotation_smoothing <= 1.0) {
            return Err(ConfigError::Invalid {
                field: "rotation_smoothing",
                reason: format!("{} is outside (0, 1]", self.rotation_smoothing),
            });
        }
        if !(self.min_element_size > 0.0) {
            return Err(ConfigError::Invalid {
                field: "min_element_size",
                reason: "must be positive".to_owned(),
            });
        }
        if !(self.min_scale > 0.0) {
            return Err(ConfigError::Invalid {
                field: "min_scale",
                reason: "must be positive".to_owned(),
            });
        }
        Ok(())
    }
}
