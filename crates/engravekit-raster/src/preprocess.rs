//! Intensity-matrix preprocessing.
//!
//! Normalizes a raw grayscale matrix before scanning: clip-to-threshold,
//! optional binarization and inversion, crop to the tight bounding box of
//! the remaining foreground, optional mirroring.

use image::GrayImage;
use tracing::debug;

use crate::config::ScanConfig;
use crate::error::{RasterError, RasterResult};

/// Preprocess a raw intensity matrix for scanning.
///
/// Transform order: clip, binarize, invert, crop, mirror. The input is not
/// mutated; the cropped result is returned as a fresh matrix.
///
/// Returns [`RasterError::EmptyImage`] when no non-zero cell remains after
/// the value transforms.
pub fn preprocess(matrix: &GrayImage, config: &ScanConfig) -> RasterResult<GrayImage> {
    let mut out = matrix.clone();

    if config.clip_threshold > 0 {
        for pixel in out.pixels_mut() {
            if pixel.0[0] <= config.clip_threshold {
                pixel.0[0] = 0;
            }
        }
    }

    if config.black_and_white {
        for pixel in out.pixels_mut() {
            if pixel.0[0] > config.clip_threshold {
                pixel.0[0] = 255;
            }
        }
    }

    if config.invert {
        image::imageops::invert(&mut out);
    }

    let (left, top, right, bottom) = foreground_bounds(&out).ok_or(RasterError::EmptyImage)?;

    let mut cropped =
        image::imageops::crop_imm(&out, left, top, right - left + 1, bottom - top + 1).to_image();

    if config.mirror {
        image::imageops::flip_horizontal_in_place(&mut cropped);
    }

    debug!(
        rows = cropped.height(),
        cols = cropped.width(),
        "preprocessed matrix"
    );
    Ok(cropped)
}

/// Inclusive bounding box (left, top, right, bottom) of all non-zero cells,
/// or `None` when every cell is background.
fn foreground_bounds(matrix: &GrayImage) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, pixel) in matrix.enumerate_pixels() {
        if pixel.0[0] == 0 {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((left, top, right, bottom)) => {
                (left.min(x), top.min(y), right.max(x), bottom.max(y))
            }
        });
    }
    bounds
}
