//! # EngraveKit Decode
//!
//! Turns an input file into the grayscale intensity matrix the raster
//! engine consumes. Two decode strategies are tried in a fixed order:
//! SVG rasterization first, raster image decode second. Each strategy
//! returns a typed result; the last failure is surfaced only when every
//! strategy has failed.

use std::fs;
use std::path::Path;

use image::GrayImage;
use thiserror::Error;
use tracing::debug;

pub mod raster;
pub mod svg;

/// Errors from the decoding stage.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The input could not be interpreted as an SVG document.
    #[error("SVG decode failed: {0}")]
    Svg(String),

    /// The input could not be interpreted as a raster image.
    #[error("Raster decode failed: {0}")]
    Raster(String),

    /// The input file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for decoding.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Resolution settings handed to the decode strategies.
#[derive(Debug, Clone, Copy)]
pub struct DecodeOptions {
    /// Resolution the matrix must be sampled at, in pixels per inch.
    pub target_resolution: f64,
    /// Resolution the raster input was authored at; defaults to the target
    /// resolution (no resampling) when not given.
    pub source_resolution: Option<f64>,
}

/// One way of turning raw file bytes into an intensity matrix.
trait DecodeStrategy {
    fn name(&self) -> &'static str;
    fn decode(&self, data: &[u8], opts: &DecodeOptions) -> DecodeResult<GrayImage>;
}

struct SvgStrategy;

impl DecodeStrategy for SvgStrategy {
    fn name(&self) -> &'static str {
        "svg"
    }

    fn decode(&self, data: &[u8], opts: &DecodeOptions) -> DecodeResult<GrayImage> {
        svg::decode(data, opts)
    }
}

struct RasterStrategy;

impl DecodeStrategy for RasterStrategy {
    fn name(&self) -> &'static str {
        "raster"
    }

    fn decode(&self, data: &[u8], opts: &DecodeOptions) -> DecodeResult<GrayImage> {
        raster::decode(data, opts)
    }
}

/// Decode an input file into an intensity matrix, trying SVG first and
/// raster formats second.
pub fn decode_file<P: AsRef<Path>>(path: P, opts: &DecodeOptions) -> DecodeResult<GrayImage> {
    let data = fs::read(path.as_ref())?;
    decode_bytes(&data, opts)
}

/// Decode in-memory input bytes through the ordered strategy list.
///
/// The outcome of each strategy replaces the previous one, so when every
/// strategy fails the error surfaced is the last strategy's failure.
pub fn decode_bytes(data: &[u8], opts: &DecodeOptions) -> DecodeResult<GrayImage> {
    let [first, rest @ ..]: [&dyn DecodeStrategy; 2] = [&SvgStrategy, &RasterStrategy];
    let mut outcome = try_strategy(first, data, opts);
    for strategy in rest {
        if outcome.is_ok() {
            break;
        }
        outcome = try_strategy(strategy, data, opts);
    }
    outcome
}

fn try_strategy(
    strategy: &dyn DecodeStrategy,
    data: &[u8],
    opts: &DecodeOptions,
) -> DecodeResult<GrayImage> {
    match strategy.decode(data, opts) {
        Ok(matrix) => {
            debug!(
                strategy = strategy.name(),
                rows = matrix.height(),
                cols = matrix.width(),
                "input decoded"
            );
            Ok(matrix)
        }
        Err(err) => {
            debug!(strategy = strategy.name(), error = %err, "decode strategy failed");
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_input_surfaces_last_strategy_failure() {
        let opts = DecodeOptions {
            target_resolution: 508.0,
            source_resolution: None,
        };
        let err = decode_bytes(b"not an image at all", &opts).unwrap_err();
        // raster is the last strategy in the order
        assert!(matches!(err, DecodeError::Raster(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let opts = DecodeOptions {
            target_resolution: 508.0,
            source_resolution: None,
        };
        let err = decode_file("/no/such/input.png", &opts).unwrap_err();
        assert!(matches!(err, DecodeError::Io(_)));
    }
}
