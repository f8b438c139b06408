use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunable constants of the measurement engine
///
/// Persisted with the app state; every field falls back to its default
/// when missing from stored or file-based settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasureConfig {
    /// Segments longer than this are always committed (pixels)
    pub commit_min_length: f32,
    /// Short segments finished faster than this are treated as a double click (ms)
    pub double_click_window_ms: f64,
    /// Double clicks farther than this from every segment center are ignored (pixels)
    pub calibration_radius: f32,
    /// Label font height (pixels)
    pub label_font_px: f32,
    /// Half length of the T-shaped end caps (pixels)
    pub cap_half_length: f32,
    pub halo_width: f32,
    /// The in-progress line stops this far short of the pointer (pixels)
    pub edit_shortening: f32,
    /// Side length of the square loupe overlay (pixels)
    pub loupe_size: f32,
    pub loupe_magnification: f32,
    /// Distance of the near loupe anchor from the viewport edge (pixels)
    pub loupe_margin: f32,
    /// Canvas size before any image is loaded
    pub default_canvas_size: [f32; 2],
}

impl Default for MeasureConfig {
    fn default() -> Self {
        Self {
            commit_min_length: 50.0,
            double_click_window_ms: 500.0,
            calibration_radius: 50.0,
            label_font_px: 18.0,
            cap_half_length: 15.0,
            halo_width: 10.0,
            edit_shortening: 2.0,
            loupe_size: 150.0,
            loupe_magnification: 5.0,
            loupe_margin: 10.0,
            default_canvas_size: [100.0, 100.0],
        }
    }
}

impl MeasureConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("commit_min_length", f64::from(self.commit_min_length)),
            ("calibration_radius", f64::from(self.calibration_radius)),
            ("label_font_px", f64::from(self.label_font_px)),
            ("cap_half_length", f64::from(self.cap_half_length)),
            ("halo_width", f64::from(self.halo_width)),
            ("loupe_size", f64::from(self.loupe_size)),
            ("loupe_magnification", f64::from(self.loupe_magnification)),
            ("default_canvas_size", f64::from(self.default_canvas_size[0])),
            ("default_canvas_size", f64::from(self.default_canvas_size[1])),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }

        let non_negative = [
            ("double_click_window_ms", self.double_click_window_ms),
            ("edit_shortening", f64::from(self.edit_shortening)),
            ("loupe_margin", f64::from(self.loupe_margin)),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }

        Ok(())
    }
}
