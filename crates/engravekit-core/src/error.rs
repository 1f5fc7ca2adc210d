//! Error types for configuration resolution.
//!
//! Configuration problems are detected before the pipeline runs and are
//! reported as a distinct error kind from decode, raster, and sink failures.

use thiserror::Error;

/// Errors raised while resolving user-supplied configuration input.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A numeric literal could not be parsed.
    #[error("Malformed numeric literal: '{0}'")]
    MalformedNumber(String),

    /// A unit suffix is not recognized for the quantity being parsed.
    #[error("Unknown unit '{unit}' in '{literal}'")]
    UnknownUnit { literal: String, unit: String },

    /// The resolved resolution is zero or negative.
    #[error("Resolution must be positive, got {0} dpi")]
    NonPositiveResolution(f64),

    /// The low driving value exceeds the maximum driving value.
    #[error("Power bounds inverted: low {low} > max {max}")]
    InvertedPowerBounds { low: u32, max: u32 },
}

/// Result type alias for configuration resolution.
pub type ConfigResult<T> = Result<T, ConfigError>;
