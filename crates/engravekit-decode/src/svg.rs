//! SVG rasterization.
//!
//! Parses the document with usvg and renders it into a tiny-skia pixmap
//! sized so the document's physical extent maps to the target resolution.
//! The pixmap holds premultiplied RGBA, which composites transparent
//! regions onto black before the luma conversion.

use image::GrayImage;
use resvg::{tiny_skia, usvg};
use tracing::debug;

use crate::{DecodeError, DecodeOptions, DecodeResult};

/// usvg reports document geometry in CSS pixels at 96 dpi.
const CSS_DPI: f64 = 96.0;

pub(crate) fn decode(data: &[u8], opts: &DecodeOptions) -> DecodeResult<GrayImage> {
    let usvg_opts = usvg::Options::default();
    let tree =
        usvg::Tree::from_data(data, &usvg_opts).map_err(|e| DecodeError::Svg(e.to_string()))?;

    let size = tree.size();
    let scale = (opts.target_resolution / CSS_DPI) as f32;
    let width = ((size.width() * scale).round() as u32).max(1);
    let height = ((size.height() * scale).round() as u32).max(1);
    debug!(
        doc_width = size.width(),
        doc_height = size.height(),
        width,
        height,
        "rasterizing SVG"
    );

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| DecodeError::Svg("render target dimensions are invalid".to_string()))?;
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );

    let rgba = image::RgbaImage::from_raw(width, height, pixmap.take())
        .ok_or_else(|| DecodeError::Svg("pixmap buffer size mismatch".to_string()))?;
    Ok(image::DynamicImage::ImageRgba8(rgba).to_luma8())
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE_SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg"
        width="10mm" height="5mm" viewBox="0 0 10 5">
        <rect x="2" y="1" width="6" height="3" fill="#ffffff"/>
    </svg>"##;

    fn opts() -> DecodeOptions {
        DecodeOptions {
            target_resolution: 508.0,
            source_resolution: None,
        }
    }

    #[test]
    fn test_renders_at_target_resolution() {
        let matrix = decode(WHITE_SQUARE.as_bytes(), &opts()).unwrap();
        // 10mm x 5mm at 508 dpi (20 dots/mm) is 200 x 100 pixels
        assert_eq!(matrix.dimensions(), (200, 100));
    }

    #[test]
    fn test_shape_is_foreground_background_is_black() {
        let matrix = decode(WHITE_SQUARE.as_bytes(), &opts()).unwrap();
        // center of the rect
        assert_eq!(matrix.get_pixel(100, 50).0[0], 255);
        // transparent corner composites onto black
        assert_eq!(matrix.get_pixel(0, 0).0[0], 0);
    }

    #[test]
    fn test_invalid_svg_fails() {
        assert!(matches!(
            decode(b"\x89PNG not an svg", &opts()),
            Err(DecodeError::Svg(_))
        ));
    }
}
