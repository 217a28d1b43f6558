//! Raster primitives used to paint icons onto an RGB canvas.
//!
//! Coordinates are signed so that shapes may extend past the canvas edge;
//! anything outside the image bounds is clipped.

use image::{Rgb, RgbImage};

/// Paint column `x` from top to bottom with `color`.
pub fn draw_column(img: &mut RgbImage, x: u32, color: Rgb<u8>) {
    if x >= img.width() {
        return;
    }
    for y in 0..img.height() {
        img.put_pixel(x, y, color);
    }
}

/// Composite `src` over `dst` with the given alpha (0 = transparent, 255 = opaque).
pub fn blend(dst: Rgb<u8>, src: Rgb<u8>, alpha: u8) -> Rgb<u8> {
    let a = alpha as u32;
    let mix = |s: u8, d: u8| ((s as u32 * a + d as u32 * (255 - a) + 127) / 255) as u8;
    Rgb([
        mix(src[0], dst[0]),
        mix(src[1], dst[1]),
        mix(src[2], dst[2]),
    ])
}

/// Fill the disc of radius `radius` around `(cx, cy)`.
///
/// The disc covers the inclusive bounding box `[cx-r, cy-r, cx+r, cy+r]`.
/// Each covered pixel gets `color` blended over its current value at `alpha`.
pub fn fill_circle(img: &mut RgbImage, cx: i64, cy: i64, radius: i64, color: Rgb<u8>, alpha: u8) {
    let r2 = radius * radius;
    for y in (cy - radius)..=(cy + radius) {
        for x in (cx - radius)..=(cx + radius) {
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy > r2 {
                continue;
            }
            if let Some(pixel) = pixel_mut(img, x, y) {
                *pixel = blend(*pixel, color, alpha);
            }
        }
    }
}

/// Stroke a connected polyline through `points` with an opaque line `width` pixels wide.
///
/// A pixel is painted when its distance to any segment is within half the width,
/// which also rounds the joints between segments. Even widths sample half a
/// pixel off the centre so a straight stroke is exactly `width` pixels across.
pub fn stroke_polyline(img: &mut RgbImage, points: &[(i64, i64)], width: u32, color: Rgb<u8>) {
    let half = width as f64 / 2.0;
    let reach = half.ceil() as i64 + 1;
    let offset = if width % 2 == 0 { 0.5 } else { 0.0 };

    for segment in points.windows(2) {
        let (a, b) = (segment[0], segment[1]);
        let (min_x, max_x) = (a.0.min(b.0) - reach, a.0.max(b.0) + reach);
        let (min_y, max_y) = (a.1.min(b.1) - reach, a.1.max(b.1) + reach);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let sample = (x as f64 + offset, y as f64 + offset);
                if distance_to_segment(sample, a, b) > half {
                    continue;
                }
                if let Some(pixel) = pixel_mut(img, x, y) {
                    *pixel = color;
                }
            }
        }
    }
}

fn distance_to_segment(p: (f64, f64), a: (i64, i64), b: (i64, i64)) -> f64 {
    let (px, py) = p;
    let (ax, ay) = (a.0 as f64, a.1 as f64);
    let (dx, dy) = ((b.0 - a.0) as f64, (b.1 - a.1) as f64);

    let len2 = dx * dx + dy * dy;
    let t = if len2 == 0.0 {
        0.0
    } else {
        (((px - ax) * dx + (py - ay) * dy) / len2).clamp(0.0, 1.0)
    };

    let (nx, ny) = (ax + t * dx, ay + t * dy);
    ((px - nx).powi(2) + (py - ny).powi(2)).sqrt()
}

fn pixel_mut(img: &mut RgbImage, x: i64, y: i64) -> Option<&mut Rgb<u8>> {
    if x < 0 || y < 0 || x >= img.width() as i64 || y >= img.height() as i64 {
        return None;
    }
    Some(img.get_pixel_mut(x as u32, y as u32))
}
