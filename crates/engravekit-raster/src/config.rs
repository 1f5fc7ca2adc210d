//! Immutable scan configuration.

use engravekit_core::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};

/// Parameters for one raster engraving run.
///
/// Constructed once from resolved command-line input and passed by reference
/// into every pipeline stage; no stage mutates it or reads ambient state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Target resolution in pixels per inch.
    pub target_resolution: f64,
    /// Offset from the machine zero position in x-direction (mm).
    pub x_offset: f64,
    /// Offset from the machine zero position in y-direction (mm).
    pub y_offset: f64,
    /// Pixel values at or below this threshold are treated as background.
    pub clip_threshold: u8,
    /// Invert pixel intensities after thresholding.
    pub invert: bool,
    /// Binarize: force every foreground pixel to maximum intensity.
    pub black_and_white: bool,
    /// Flip left and right after cropping.
    pub mirror: bool,
    /// Command token that turns the laser on (power appended as `S<n>`).
    pub on_command: String,
    /// Command token that turns the laser off.
    pub off_command: String,
    /// Threshold driving value for the laser (power at intensity 0).
    pub low_power: u32,
    /// Maximal driving value for the laser (power at intensity 255).
    pub max_power: u32,
    /// Feed rate for light engraving moves (mm/min).
    pub light_speed: u32,
    /// Feed rate for full engraving moves (mm/min).
    pub low_speed: u32,
    /// Feed rate for travel moves with the laser off (mm/min).
    pub move_speed: u32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            target_resolution: 508.0,
            x_offset: 20.0,
            y_offset: 20.0,
            clip_threshold: 1,
            invert: false,
            black_and_white: false,
            mirror: false,
            on_command: "M106".to_string(),
            off_command: "M107".to_string(),
            low_power: 90,
            max_power: 255,
            light_speed: 500,
            low_speed: 70,
            move_speed: 2000,
        }
    }
}

impl ScanConfig {
    /// Check invariants that the parsers cannot express.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.target_resolution <= 0.0 {
            return Err(ConfigError::NonPositiveResolution(self.target_resolution));
        }
        if self.low_power > self.max_power {
            return Err(ConfigError::InvertedPowerBounds {
                low: self.low_power,
                max: self.max_power,
            });
        }
        Ok(())
    }
}
