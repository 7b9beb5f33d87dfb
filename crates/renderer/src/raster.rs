//! Rasterizes composed SVG documents to PNG with resvg.

use heatmap_common::{Color, HeatmapError, HeatmapResult};
use tracing::debug;

/// Render `svg` at `scale` onto an opaque `background` and encode as PNG.
pub fn rasterize_png(svg: &str, scale: f32, background: Color) -> HeatmapResult<Vec<u8>> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(HeatmapError::Render(format!("invalid scale factor {}", scale)));
    }

    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt)
        .map_err(|e| HeatmapError::Render(format!("SVG parse failed: {}", e)))?;

    let size = tree.size();
    let width = (size.width() * scale).ceil() as u32;
    let height = (size.height() * scale).ceil() as u32;

    let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
        HeatmapError::Render(format!("cannot allocate {}x{} pixmap", width, height))
    })?;
    pixmap.fill(tiny_skia::Color::from_rgba8(
        background.r,
        background.g,
        background.b,
        background.a,
    ));

    let transform = tiny_skia::Transform::from_scale(scale, scale);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    debug!(width, height, "Rasterized SVG");

    pixmap
        .encode_png()
        .map_err(|e| HeatmapError::Render(format!("PNG encoding failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="20"><rect width="10" height="10" fill="#ff0000"/></svg>"##;

    #[test]
    fn test_png_signature_and_size() {
        let png = rasterize_png(SQUARE, 2.0, Color::rgb(255, 255, 255)).unwrap();
        assert_eq!(&png[0..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
        // IHDR width/height are big-endian u32 at offsets 16 and 20
        let width = u32::from_be_bytes([png[16], png[17], png[18], png[19]]);
        let height = u32::from_be_bytes([png[20], png[21], png[22], png[23]]);
        assert_eq!((width, height), (20, 40));
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(rasterize_png(SQUARE, 0.0, Color::rgb(255, 255, 255)).is_err());
        assert!(rasterize_png("not svg", 1.0, Color::rgb(255, 255, 255)).is_err());
    }
}
