//! Editor construction parameters.
//!
//! Every field has a default, so hosts may pass a partial JSON object (or
//! nothing at all). Values are validated once, at load time; an editor is
//! never built from an unvalidated config by [`EditorConfig::from_json`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::buffer::PaintMode;
use crate::color::Color;
use crate::consts::{
    DEFAULT_MAX_SCALE, DEFAULT_MIN_SCALE, DEFAULT_PAN_SENSITIVITY, DEFAULT_SCALE, DEFAULT_TILE_SIZE, MAX_TILE_SIZE,
};
use crate::error::EditorError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Grid width and height in cells. Fixed for the editor's lifetime.
    pub tile_size: u32,
    /// Lower bound on scale (canvas pixels per cell).
    pub min_scale: f64,
    /// Upper bound on scale.
    pub max_scale: f64,
    /// Scale at mount, clamped into `[min_scale, max_scale]`.
    pub initial_scale: f64,
    /// Pan offset change per unit of wheel delta.
    pub pan_sensitivity: f64,
    /// Paint color when no color source is injected.
    pub default_color: Color,
    /// Behavior when painting an already painted cell.
    pub paint_mode: PaintMode,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            initial_scale: DEFAULT_SCALE,
            pan_sensitivity: DEFAULT_PAN_SENSITIVITY,
            default_color: Color::default(),
            paint_mode: PaintMode::default(),
        }
    }
}

impl EditorConfig {
    /// Defaults for a tile of the given size.
    #[must_use]
    pub fn new(tile_size: u32) -> Self {
        Self { tile_size, ..Self::default() }
    }

    /// Parse and validate a JSON config object.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::ConfigParse`] for malformed JSON (including colors
    /// past 24 bits) and [`EditorError::InvalidConfig`] for unusable values.
    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the values describe a usable editor.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<(), EditorError> {
        if self.tile_size == 0 {
            return Err(EditorError::InvalidConfig("tile_size must be positive".to_owned()));
        }
        if self.tile_size > MAX_TILE_SIZE {
            return Err(EditorError::InvalidConfig(format!(
                "tile_size {} exceeds the maximum of {MAX_TILE_SIZE}",
                self.tile_size
            )));
        }
        if !(self.min_scale.is_finite() && self.min_scale > 0.0) {
            return Err(EditorError::InvalidConfig(format!("min_scale must be positive, got {}", self.min_scale)));
        }
        if !self.max_scale.is_finite() || self.max_scale < self.min_scale {
            return Err(EditorError::InvalidConfig(format!(
                "max_scale {} must be at least min_scale {}",
                self.max_scale, self.min_scale
            )));
        }
        if !self.initial_scale.is_finite() {
            return Err(EditorError::InvalidConfig("initial_scale must be finite".to_owned()));
        }
        if !self.pan_sensitivity.is_finite() {
            return Err(EditorError::InvalidConfig("pan_sensitivity must be finite".to_owned()));
        }
        Ok(())
    }

    /// The initial scale clamped into the configured bounds.
    ///
    /// Only meaningful on a config that passed [`EditorConfig::validate`].
    #[must_use]
    pub fn clamped_initial_scale(&self) -> f64 {
        self.initial_scale.clamp(self.min_scale, self.max_scale)
    }
}
