//! Raster image decoding.

use image::imageops::FilterType;
use image::GrayImage;
use tracing::debug;

use crate::{DecodeError, DecodeOptions, DecodeResult};

/// Decode a raster image (PNG, JPEG, ...) to grayscale and resample it to
/// the target resolution.
///
/// The scale factor is `target / source` resolution; with no source
/// resolution given the image is assumed to already be at the target and is
/// used as-is.
pub(crate) fn decode(data: &[u8], opts: &DecodeOptions) -> DecodeResult<GrayImage> {
    let img = image::load_from_memory(data).map_err(|e| DecodeError::Raster(e.to_string()))?;
    let gray = img.to_luma8();

    let source = opts.source_resolution.unwrap_or(opts.target_resolution);
    let scale = opts.target_resolution / source;
    if (scale - 1.0).abs() < 1e-9 {
        return Ok(gray);
    }

    let width = ((f64::from(gray.width()) * scale) as u32).max(1);
    let height = ((f64::from(gray.height()) * scale) as u32).max(1);
    debug!(
        scale,
        from_width = gray.width(),
        from_height = gray.height(),
        width,
        height,
        "resampling raster input"
    );
    Ok(image::imageops::resize(
        &gray,
        width,
        height,
        FilterType::CatmullRom,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(image: &GrayImage) -> Vec<u8> {
        let mut buf = Vec::new();
        image
            .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_decode_png_without_resampling() {
        let source = GrayImage::from_fn(6, 4, |x, y| image::Luma([(x * 40 + y) as u8]));
        let opts = DecodeOptions {
            target_resolution: 508.0,
            source_resolution: None,
        };
        let decoded = decode(&png_bytes(&source), &opts).unwrap();
        assert_eq!(decoded, source);
    }

    #[test]
    fn test_decode_png_with_resampling() {
        let source = GrayImage::from_pixel(10, 10, image::Luma([128]));
        let opts = DecodeOptions {
            target_resolution: 508.0,
            source_resolution: Some(254.0),
        };
        let decoded = decode(&png_bytes(&source), &opts).unwrap();
        assert_eq!(decoded.dimensions(), (20, 20));
        // a constant image stays constant under bicubic resampling
        assert!(decoded.pixels().all(|p| p.0[0] == 128));
    }

    #[test]
    fn test_non_image_input_fails() {
        let opts = DecodeOptions {
            target_resolution: 508.0,
            source_resolution: None,
        };
        assert!(matches!(
            decode(b"<svg/>", &opts),
            Err(DecodeError::Raster(_))
        ));
    }
}
