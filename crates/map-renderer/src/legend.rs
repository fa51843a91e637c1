//! Horizontal colorbar legend for a rendered slice.

use image::{Rgba, RgbaImage};

use gfs_common::DataSlice;

use crate::glyphs;
use crate::ramp;

const LEGEND_WIDTH: u32 = 640;
const LEGEND_HEIGHT: u32 = 80;
const BAR_MARGIN: u32 = 24;
const BAR_TOP: u32 = 34;
const BAR_HEIGHT: u32 = 16;
const TICK_COUNT: usize = 5;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const INK: Rgba<u8> = Rgba([30, 30, 30, 255]);

/// Render the legend image: title, gradient bar, tick labels.
///
/// A slice with no finite values gets a bar-less legend that says so,
/// so the page never shows a colorbar that maps to nothing.
pub fn render_legend(slice: &DataSlice) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(LEGEND_WIDTH, LEGEND_HEIGHT, BACKGROUND);

    glyphs::draw_text(&mut img, BAR_MARGIN as i32, 8, 2, INK, &slice.title);

    let (lo, hi) = match slice.value_range() {
        Some(range) => range,
        None => {
            glyphs::draw_text(&mut img, BAR_MARGIN as i32, BAR_TOP as i32 + 4, 1, INK, "NO DATA IN SELECTION");
            return img;
        }
    };

    let bar_width = LEGEND_WIDTH - 2 * BAR_MARGIN;
    for dx in 0..bar_width {
        let t = dx as f32 / (bar_width - 1) as f32;
        let c = ramp::color_at(slice.palette, t);
        for dy in 0..BAR_HEIGHT {
            img.put_pixel(BAR_MARGIN + dx, BAR_TOP + dy, Rgba([c.r, c.g, c.b, 255]));
        }
    }

    // Frame around the bar
    for dx in 0..bar_width {
        img.put_pixel(BAR_MARGIN + dx, BAR_TOP, INK);
        img.put_pixel(BAR_MARGIN + dx, BAR_TOP + BAR_HEIGHT - 1, INK);
    }
    for dy in 0..BAR_HEIGHT {
        img.put_pixel(BAR_MARGIN, BAR_TOP + dy, INK);
        img.put_pixel(BAR_MARGIN + bar_width - 1, BAR_TOP + dy, INK);
    }

    for (i, label) in format_ticks(lo, hi, TICK_COUNT).iter().enumerate() {
        let t = i as f32 / (TICK_COUNT - 1) as f32;
        let x = BAR_MARGIN + (t * (bar_width - 1) as f32) as u32;
        // Tick mark below the bar, label centered under it
        for dy in 0..4 {
            img.put_pixel(x, BAR_TOP + BAR_HEIGHT + dy, INK);
        }
        let label_x = x as i32 - (glyphs::text_width(label, 1) / 2) as i32;
        glyphs::draw_text(&mut img, label_x, (BAR_TOP + BAR_HEIGHT + 6) as i32, 1, INK, label);
    }

    img
}

/// Evenly spaced tick labels between `lo` and `hi`.
///
/// Precision adapts to the span so that neighboring ticks never share a
/// label: whole degrees read "12", millimeter-scale rates read "0.04".
fn format_ticks(lo: f32, hi: f32, count: usize) -> Vec<String> {
    let span = (hi - lo).abs();
    let decimals = if span >= 10.0 {
        0
    } else if span >= 1.0 {
        1
    } else {
        3
    };
    (0..count)
        .map(|i| {
            let t = i as f32 / (count - 1) as f32;
            format!("{:.*}", decimals, lo + t * (hi - lo))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gfs_common::Palette;
    use test_utils::generators;

    fn slice(values: Vec<f32>) -> DataSlice {
        let n = values.len();
        DataSlice {
            values,
            lat: vec![0.0],
            lon: (0..n).map(|i| i as f64).collect(),
            title: "Precipitation Rate (mm/hour)".to_string(),
            units: "mm/hour",
            palette: Palette::Blues,
        }
    }

    #[test]
    fn test_legend_dimensions() {
        let img = render_legend(&slice(generators::temperature_field(1, 8)));
        assert_eq!(img.width(), LEGEND_WIDTH);
        assert_eq!(img.height(), LEGEND_HEIGHT);
    }

    #[test]
    fn test_bar_spans_palette() {
        let img = render_legend(&slice(vec![0.0, 1.0]));
        let y = BAR_TOP + BAR_HEIGHT / 2;
        let left = img.get_pixel(BAR_MARGIN + 1, y);
        let right = img.get_pixel(LEGEND_WIDTH - BAR_MARGIN - 2, y);
        // Blues runs light to dark
        assert!(left.0[0] > right.0[0]);
    }

    #[test]
    fn test_all_nan_slice() {
        let img = render_legend(&slice(vec![f32::NAN; 4]));
        // No colorbar pixels, only background and text
        let y = BAR_TOP + BAR_HEIGHT / 2;
        let mid = img.get_pixel(LEGEND_WIDTH / 2, y);
        assert!(mid.0[0] == 255 || mid.0[0] == 30);
    }

    #[test]
    fn test_tick_formatting() {
        assert_eq!(format_ticks(0.0, 40.0, 5), vec!["0", "10", "20", "30", "40"]);
        assert_eq!(format_ticks(0.0, 2.0, 3), vec!["0.0", "1.0", "2.0"]);
        assert_eq!(format_ticks(0.0, 0.08, 3), vec!["0.000", "0.040", "0.080"]);
    }
}
