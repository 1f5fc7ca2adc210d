//! Pixel-to-machine coordinate and intensity-to-power mapping.

use crate::config::ScanConfig;

/// Maps pixel row/column indices to physical machine coordinates (mm).
#[derive(Debug, Clone, Copy)]
pub struct CoordinateMapper {
    units_per_pixel: f64,
    x_offset: f64,
    y_offset: f64,
}

impl CoordinateMapper {
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            units_per_pixel: engravekit_core::units::MM_PER_INCH / config.target_resolution,
            x_offset: config.x_offset,
            y_offset: config.y_offset,
        }
    }

    /// Physical x-coordinate of a pixel column, in millimeters.
    pub fn to_x(&self, col: u32) -> f64 {
        f64::from(col) * self.units_per_pixel + self.x_offset
    }

    /// Physical y-coordinate of a pixel row, in millimeters.
    pub fn to_y(&self, row: u32) -> f64 {
        f64::from(row) * self.units_per_pixel + self.y_offset
    }
}

/// Maps a pixel intensity (0-255) to a laser driving value, linearly
/// interpolated between the configured low and maximum power.
#[derive(Debug, Clone, Copy)]
pub struct PowerMapper {
    low: u32,
    max: u32,
}

impl PowerMapper {
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            low: config.low_power,
            max: config.max_power,
        }
    }

    /// Driving value for a foreground pixel intensity.
    ///
    /// The fractional part is truncated, matching the established output of
    /// this mapping (`drive(10)` with bounds 90..255 is 96, not 97).
    pub fn drive(&self, intensity: u8) -> u32 {
        let span = f64::from(self.max) - f64::from(self.low);
        self.low + (f64::from(intensity) / 255.0 * span) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_start_at_offset() {
        let mapper = CoordinateMapper::new(&ScanConfig::default());
        assert_eq!(mapper.to_x(0), 20.0);
        assert_eq!(mapper.to_y(0), 20.0);
    }

    #[test]
    fn test_coordinates_monotonic() {
        let mapper = CoordinateMapper::new(&ScanConfig::default());
        let mut previous = f64::NEG_INFINITY;
        for col in 0..1000 {
            let x = mapper.to_x(col);
            assert!(x > previous);
            previous = x;
        }
    }

    #[test]
    fn test_units_per_pixel_at_508_dpi() {
        // 508 dpi is a 0.05 mm dot pitch
        let mapper = CoordinateMapper::new(&ScanConfig::default());
        assert!((mapper.to_x(2) - 20.1).abs() < 1e-9);
        assert!((mapper.to_x(3) - 20.15).abs() < 1e-9);
    }

    #[test]
    fn test_power_reference_values() {
        let power = PowerMapper::new(&ScanConfig::default());
        assert_eq!(power.drive(10), 96);
        assert_eq!(power.drive(40), 115);
        assert_eq!(power.drive(50), 122);
        assert_eq!(power.drive(80), 141);
        assert_eq!(power.drive(90), 148);
        assert_eq!(power.drive(255), 255);
    }

    #[test]
    fn test_power_stays_within_bounds() {
        let config = ScanConfig::default();
        let power = PowerMapper::new(&config);
        for v in 0..=255u16 {
            let drive = power.drive(v as u8);
            assert!(drive >= config.low_power);
            assert!(drive <= config.max_power);
        }
    }
}
