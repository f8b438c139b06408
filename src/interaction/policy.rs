use crate::config::MeasureConfig;

/// Decides whether a finished line is kept.
///
/// A double click also delivers two single clicks at almost the same spot.
/// Short lines finished quickly are taken to be that, not a measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommitPolicy {
    /// Lines longer than this are always kept (pixels)
    pub min_length: f32,
    /// Shorter lines need at least this much time between the clicks (ms)
    pub double_click_window_ms: f64,
}

impl Default for CommitPolicy {
    fn default() -> Self {
        Self::from_config(&MeasureConfig::default())
    }
}

impl CommitPolicy {
    pub fn from_config(config: &MeasureConfig) -> Self {
        Self {
            min_length: config.commit_min_length,
            double_click_window_ms: config.double_click_window_ms,
        }
    }

    pub fn should_commit(&self, length: f32, elapsed_secs: f64) -> bool {
        length > self.min_length
            || (length > 0.0 && elapsed_secs * 1000.0 > self.double_click_window_ms)
    }
}

/// Decides which segment a double click calibrates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationPolicy {
    /// Segment centers must be closer than this to the click (pixels)
    pub radius: f32,
}

impl Default for CalibrationPolicy {
    fn default() -> Self {
        Self::from_config(&MeasureConfig::default())
    }
}

impl CalibrationPolicy {
    pub fn from_config(config: &MeasureConfig) -> Self {
        Self {
            radius: config.calibration_radius,
        }
    }

    pub fn selects(&self, center_distance: f32) -> bool {
        center_distance < self.radius
    }
}
