//! Pseudocolor mesh rendering of an extracted slice.
//!
//! The output is a plate carree image of the selected window: each pixel
//! is colored from the nearest grid cell, missing values stay fully
//! transparent, and a light graticule with coordinate labels is drawn on
//! top. Coastlines come from the basemap the overlay is displayed on, so
//! none are drawn here.

use image::{Rgba, RgbaImage};
use rayon::prelude::*;

use gfs_common::DataSlice;

use crate::glyphs;
use crate::ramp::{self, Color};

/// Height is derived from the window's aspect ratio, clamped to this range.
const MIN_HEIGHT: u32 = 64;
const MAX_HEIGHT: u32 = 4096;

/// Candidate graticule spacings in degrees, finest first.
const GRATICULE_STEPS: &[f64] = &[0.25, 0.5, 1.0, 2.0, 5.0, 10.0, 20.0, 30.0];

const GRATICULE_COLOR: Rgba<u8> = Rgba([90, 90, 90, 140]);
const FRAME_COLOR: Rgba<u8> = Rgba([60, 60, 60, 255]);
const LABEL_COLOR: Rgba<u8> = Rgba([30, 30, 30, 255]);

/// Render the data mesh for `slice` at the requested pixel width.
///
/// Fails when the value buffer does not match the coordinate vectors; an
/// all-missing slice renders as a fully transparent image with graticule.
pub fn render_mesh(slice: &DataSlice, width: u32) -> Result<RgbaImage, String> {
    if !slice.shape_is_consistent() {
        return Err(format!(
            "slice shape mismatch: {} values for {} x {} grid",
            slice.values.len(),
            slice.ny(),
            slice.nx()
        ));
    }
    if slice.ny() == 0 || slice.nx() == 0 {
        return Err("slice has no grid points".to_string());
    }

    let (lat_min, lat_max) = min_max(&slice.lat);
    let (lon_min, lon_max) = min_max(&slice.lon);
    let lat_span = (lat_max - lat_min).max(f64::EPSILON);
    let lon_span = (lon_max - lon_min).max(f64::EPSILON);

    let height = ((width as f64 * lat_span / lon_span).round() as u32)
        .clamp(MIN_HEIGHT, MAX_HEIGHT);

    let range = slice.value_range();
    let palette = slice.palette;
    let nx = slice.nx();
    let w = width as usize;

    // Nearest-cell index for each pixel column and row, computed once.
    let col_map: Vec<usize> = (0..width)
        .map(|x| {
            let lon = lon_min + (x as f64 + 0.5) / width as f64 * lon_span;
            nearest_index(&slice.lon, lon)
        })
        .collect();
    let row_map: Vec<usize> = (0..height)
        .map(|y| {
            // Image row 0 is the northern edge
            let lat = lat_max - (y as f64 + 0.5) / height as f64 * lat_span;
            nearest_index(&slice.lat, lat)
        })
        .collect();

    let mut pixels = vec![0u8; w * height as usize * 4];
    pixels
        .par_chunks_mut(w * 4)
        .enumerate()
        .for_each(|(y, row)| {
            let j = row_map[y];
            for x in 0..w {
                let v = slice.values[j * nx + col_map[x]];
                let c = match (v.is_finite(), range) {
                    (true, Some((lo, hi))) => {
                        let t = if hi > lo { (v - lo) / (hi - lo) } else { 0.5 };
                        ramp::color_at(palette, t)
                    }
                    _ => Color::transparent(),
                };
                let px = x * 4;
                row[px] = c.r;
                row[px + 1] = c.g;
                row[px + 2] = c.b;
                row[px + 3] = c.a;
            }
        });

    let mut img = RgbaImage::from_raw(width, height, pixels)
        .ok_or_else(|| "pixel buffer size mismatch".to_string())?;

    draw_graticule(&mut img, lat_min, lat_max, lon_min, lon_max);
    draw_frame(&mut img);

    Ok(img)
}

/// Index of the coordinate nearest to `target`, assuming evenly spaced
/// coordinates in either ascending or descending order.
fn nearest_index(coords: &[f64], target: f64) -> usize {
    let n = coords.len();
    if n == 1 {
        return 0;
    }
    let step = (coords[n - 1] - coords[0]) / (n - 1) as f64;
    let idx = ((target - coords[0]) / step).round();
    (idx.max(0.0) as usize).min(n - 1)
}

fn min_max(coords: &[f64]) -> (f64, f64) {
    let mut lo = coords[0];
    let mut hi = coords[0];
    for &c in coords {
        lo = lo.min(c);
        hi = hi.max(c);
    }
    (lo, hi)
}

/// Spacing that yields a handful of lines across the span.
fn graticule_step(span: f64) -> f64 {
    for &step in GRATICULE_STEPS {
        if span / step <= 7.0 {
            return step;
        }
    }
    *GRATICULE_STEPS.last().unwrap_or(&30.0)
}

fn draw_graticule(img: &mut RgbaImage, lat_min: f64, lat_max: f64, lon_min: f64, lon_max: f64) {
    let (w, h) = (img.width(), img.height());
    let lat_span = (lat_max - lat_min).max(f64::EPSILON);
    let lon_span = (lon_max - lon_min).max(f64::EPSILON);

    // Meridians
    let step = graticule_step(lon_span);
    let mut lon = (lon_min / step).ceil() * step;
    while lon <= lon_max {
        let x = ((lon - lon_min) / lon_span * w as f64) as u32;
        if x > 0 && x < w {
            for y in 0..h {
                blend_pixel(img, x, y, GRATICULE_COLOR);
            }
            let label = format_degrees(lon);
            glyphs::draw_text(img, x as i32 + 2, (h as i32) - 10, 1, LABEL_COLOR, &label);
        }
        lon += step;
    }

    // Parallels
    let step = graticule_step(lat_span);
    let mut lat = (lat_min / step).ceil() * step;
    while lat <= lat_max {
        let y = ((lat_max - lat) / lat_span * h as f64) as u32;
        if y > 0 && y < h {
            for x in 0..w {
                blend_pixel(img, x, y, GRATICULE_COLOR);
            }
            let label = format_degrees(lat);
            glyphs::draw_text(img, 2, y as i32 + 2, 1, LABEL_COLOR, &label);
        }
        lat += step;
    }
}

fn draw_frame(img: &mut RgbaImage) {
    let (w, h) = (img.width(), img.height());
    for x in 0..w {
        img.put_pixel(x, 0, FRAME_COLOR);
        img.put_pixel(x, h - 1, FRAME_COLOR);
    }
    for y in 0..h {
        img.put_pixel(0, y, FRAME_COLOR);
        img.put_pixel(w - 1, y, FRAME_COLOR);
    }
}

/// Alpha-blend `color` over the pixel at (x, y).
fn blend_pixel(img: &mut RgbaImage, x: u32, y: u32, color: Rgba<u8>) {
    let base = img.get_pixel(x, y);
    let a = color.0[3] as u32;
    let inv = 255 - a;
    let mix = |c: u8, b: u8| ((c as u32 * a + b as u32 * inv) / 255) as u8;
    let out_a = (a + base.0[3] as u32 * inv / 255).min(255) as u8;
    img.put_pixel(
        x,
        y,
        Rgba([
            mix(color.0[0], base.0[0]),
            mix(color.0[1], base.0[1]),
            mix(color.0[2], base.0[2]),
            out_a,
        ]),
    );
}

/// Degree label without trailing zeros, e.g. "10", "-12.5", "0.25".
pub(crate) fn format_degrees(deg: f64) -> String {
    let s = format!("{:.2}", deg);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    format!("{}°", s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gfs_common::Palette;
    use test_utils::generators;

    fn slice(ny: usize, nx: usize, values: Vec<f32>) -> DataSlice {
        DataSlice {
            values,
            lat: (0..ny).map(|i| 50.0 - i as f64 * 10.0).collect(),
            lon: (0..nx).map(|i| 90.0 + i as f64 * 10.0).collect(),
            title: "2m Temperature (°C)".to_string(),
            units: "°C",
            palette: Palette::CoolWarm,
        }
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let s = slice(3, 4, vec![0.0; 5]);
        assert!(render_mesh(&s, 256).is_err());
    }

    #[test]
    fn test_aspect_ratio() {
        // 3 lat rows over 40 degrees? lat 50..30 spans 20, lon 90..120 spans 30
        let s = slice(3, 4, generators::temperature_field(3, 4));
        let img = render_mesh(&s, 300).unwrap();
        assert_eq!(img.width(), 300);
        assert_eq!(img.height(), 200);
    }

    #[test]
    fn test_nan_cells_transparent() {
        let mut values = vec![10.0; 4];
        values[0] = f32::NAN;
        let s = slice(2, 2, values);
        let img = render_mesh(&s, 128).unwrap();
        // Top-left quadrant holds the NaN cell (lat is descending, row 0 is north)
        assert_eq!(img.get_pixel(30, 20).0[3], 0);
        // Bottom-right quadrant is opaque data
        assert!(img.get_pixel(100, 100).0[3] > 0);
    }

    #[test]
    fn test_all_nan_renders_transparent() {
        let s = slice(2, 2, vec![f32::NAN; 4]);
        let img = render_mesh(&s, 128).unwrap();
        assert_eq!(img.get_pixel(40, 40).0[3], 0);
    }

    #[test]
    fn test_nearest_index_descending() {
        let lat = [20.0, 10.0, 0.0, -10.0, -20.0];
        assert_eq!(nearest_index(&lat, 20.0), 0);
        assert_eq!(nearest_index(&lat, -20.0), 4);
        assert_eq!(nearest_index(&lat, 12.0), 1);
        assert_eq!(nearest_index(&lat, 100.0), 0);
        assert_eq!(nearest_index(&lat, -100.0), 4);
    }

    #[test]
    fn test_nearest_index_ascending() {
        let lon = [0.0, 0.25, 0.5, 0.75];
        assert_eq!(nearest_index(&lon, 0.3), 1);
        assert_eq!(nearest_index(&lon, 0.7), 3);
    }

    #[test]
    fn test_format_degrees() {
        assert_eq!(format_degrees(10.0), "10°");
        assert_eq!(format_degrees(-12.5), "-12.5°");
        assert_eq!(format_degrees(0.25), "0.25°");
    }

    #[test]
    fn test_graticule_step_selection() {
        assert_eq!(graticule_step(1.0), 0.25);
        assert_eq!(graticule_step(30.0), 5.0);
        assert_eq!(graticule_step(360.0), 30.0);
    }
}
