use crate::drawing::{draw_column, fill_circle, stroke_polyline};
use anyhow::{Context, Result};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    ColorType, ImageEncoder, Rgb, RgbImage,
};
use std::{
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// Directory the binary writes into, relative to the working directory.
pub const OUTPUT_DIR: &str = "icons";

/// Icon sizes required by the extension manifest, in generation order.
pub const ICON_SIZES: [u32; 3] = [16, 48, 128];

/// Left edge of the background gradient (`#667eea`).
pub const GRADIENT_START: Rgb<u8> = Rgb([102, 126, 234]);

/// Right edge of the background gradient (`#764ba2`).
pub const GRADIENT_END: Rgb<u8> = Rgb([118, 75, 162]);

/// The drop is white, composited over the gradient at 230/255.
pub const DROP_COLOR: Rgb<u8> = Rgb([255, 255, 255]);
pub const DROP_ALPHA: u8 = 230;

/// Scaled layout of the logo for one icon size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconGeometry {
    pub size: u32,
    pub drop_center: (i64, i64),
    pub drop_radius: i64,
    pub glyph_x: i64,
    pub glyph_y: i64,
    pub glyph_width: i64,
    pub glyph_height: i64,
    pub stroke_width: u32,
}

impl IconGeometry {
    pub fn new(size: u32) -> Self {
        let n = size as i64;
        let glyph_width = scaled(size, 0.4);

        Self {
            size,
            drop_center: (n / 2, n / 2 - scaled(size, 0.1)),
            drop_radius: scaled(size, 0.3),
            glyph_x: (n - glyph_width) / 2,
            glyph_y: n / 2 + scaled(size, 0.05),
            glyph_width,
            glyph_height: scaled(size, 0.3),
            stroke_width: (size / 16).max(2),
        }
    }

    /// The five points of the "W": baseline, peak, valley, peak, baseline.
    pub fn glyph_points(&self) -> [(i64, i64); 5] {
        let (x, y) = (self.glyph_x, self.glyph_y);
        let (w, h) = (self.glyph_width, self.glyph_height);
        [
            (x, y),
            (x + w / 4, y - h),
            (x + w / 2, y - h / 2),
            (x + 3 * w / 4, y - h),
            (x + w, y),
        ]
    }
}

/// `size * ratio`, truncated toward zero.
fn scaled(size: u32, ratio: f64) -> i64 {
    (size as f64 * ratio) as i64
}

/// Background color of column `x` on an icon `size` pixels wide.
pub fn gradient_color(x: u32, size: u32) -> Rgb<u8> {
    let t = x as f64 / size as f64;
    let lerp = |start: u8, end: u8| (start as f64 + (end as f64 - start as f64) * t) as u8;
    Rgb([
        lerp(GRADIENT_START[0], GRADIENT_END[0]),
        lerp(GRADIENT_START[1], GRADIENT_END[1]),
        lerp(GRADIENT_START[2], GRADIENT_END[2]),
    ])
}

/// Paint the full logo onto a fresh `size`×`size` canvas.
pub fn render_icon(size: u32) -> Result<RgbImage> {
    if size == 0 {
        anyhow::bail!("invalid dimension: icon size must be positive");
    }

    let geometry = IconGeometry::new(size);
    let mut canvas = RgbImage::from_pixel(size, size, GRADIENT_START);

    for x in 0..size {
        draw_column(&mut canvas, x, gradient_color(x, size));
    }

    let (cx, cy) = geometry.drop_center;
    fill_circle(
        &mut canvas,
        cx,
        cy,
        geometry.drop_radius,
        DROP_COLOR,
        DROP_ALPHA,
    );

    stroke_polyline(
        &mut canvas,
        &geometry.glyph_points(),
        geometry.stroke_width,
        GRADIENT_START,
    );

    Ok(canvas)
}

/// Render one icon and write it to `<out_dir>/icon<size>.png`.
pub fn create_icon(size: u32, out_dir: &Path) -> Result<PathBuf> {
    let canvas = render_icon(size)?;

    let filename = format!("icon{size}.png");
    let path = out_dir.join(&filename);

    let file = File::create(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut out_file = BufWriter::new(file);
    write_png(canvas.as_raw(), &mut out_file, size)
        .with_context(|| format!("Failed to encode {filename}"))?;
    out_file
        .flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("  ✓ created {filename}");
    Ok(path)
}

fn write_png<W: Write>(image_data: &[u8], w: W, size: u32) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(image_data, size, size, ColorType::Rgb8)?;
    Ok(())
}

/// Generate every icon in [`ICON_SIZES`] into `out_dir`, creating it if needed.
pub fn generate_icons(out_dir: &Path) -> Result<()> {
    create_dir_all(out_dir).context("Can't create output directory")?;

    println!("Creating extension icons...");
    for size in ICON_SIZES {
        create_icon(size, out_dir)?;
    }
    println!("✓ All icons created successfully!");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_for_16() {
        let g = IconGeometry::new(16);
        assert_eq!(g.drop_center, (8, 7));
        assert_eq!(g.drop_radius, 4);
        assert_eq!(g.stroke_width, 2);
        assert_eq!(
            g.glyph_points(),
            [(5, 8), (6, 4), (8, 6), (9, 4), (11, 8)]
        );
    }

    #[test]
    fn test_geometry_for_48() {
        let g = IconGeometry::new(48);
        assert_eq!(g.drop_center, (24, 20));
        assert_eq!(g.drop_radius, 14);
        assert_eq!(g.stroke_width, 3);
        assert_eq!(
            g.glyph_points(),
            [(14, 26), (18, 12), (23, 19), (28, 12), (33, 26)]
        );
    }

    #[test]
    fn test_geometry_for_128() {
        let g = IconGeometry::new(128);
        assert_eq!(g.drop_center, (64, 52));
        assert_eq!(g.drop_radius, 38);
        assert_eq!(g.stroke_width, 8);
        assert_eq!(
            g.glyph_points(),
            [(38, 70), (50, 32), (63, 51), (76, 32), (89, 70)]
        );
    }

    #[test]
    fn test_gradient_endpoints() {
        assert_eq!(gradient_color(0, 128), GRADIENT_START);
        assert_eq!(gradient_color(127, 128), Rgb([117, 75, 162]));
        assert_eq!(gradient_color(64, 128), Rgb([110, 100, 198]));
    }

    #[test]
    fn test_render_icon_rejects_zero_size() {
        let err = render_icon(0).unwrap_err();
        assert!(err.to_string().contains("invalid dimension"));
    }

    #[test]
    fn test_render_icon_dimensions() {
        for size in ICON_SIZES {
            let img = render_icon(size).unwrap();
            assert_eq!(img.dimensions(), (size, size));
        }
    }

    #[test]
    fn test_render_icon_tiny_sizes_do_not_panic() {
        for size in 1..8 {
            let img = render_icon(size).unwrap();
            assert_eq!(img.dimensions(), (size, size));
        }
    }

    #[test]
    fn test_glyph_drawn_in_start_color() {
        let img = render_icon(128).unwrap();
        // Middle valley of the "W".
        assert_eq!(*img.get_pixel(63, 51), GRADIENT_START);
    }

    #[test]
    fn test_write_png_produces_decodable_rgb() {
        let canvas = render_icon(16).unwrap();
        let mut buf = Vec::new();
        write_png(canvas.as_raw(), &mut buf, 16).unwrap();

        let decoded = image::load_from_memory(&buf).unwrap();
        assert_eq!(decoded.color(), ColorType::Rgb8);
        assert_eq!(decoded.to_rgb8(), canvas);
    }
}
