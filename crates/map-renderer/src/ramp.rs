//! Fixed color ramps for the four display palettes.

use gfs_common::Palette;

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

/// A gradient stop: normalized position (0..1) and color.
type Stop = (f32, [u8; 3]);

// Stop tables approximate the matplotlib ramps of the same names, which
// is what forecasters are used to reading for these quantities.
const BLUES: &[Stop] = &[
    (0.00, [247, 251, 255]),
    (0.25, [198, 219, 239]),
    (0.50, [107, 174, 214]),
    (0.75, [33, 113, 181]),
    (1.00, [8, 48, 107]),
];

const COOLWARM: &[Stop] = &[
    (0.00, [59, 76, 192]),
    (0.25, [124, 159, 249]),
    (0.50, [220, 220, 220]),
    (0.75, [245, 136, 97]),
    (1.00, [180, 4, 38]),
];

const PLASMA: &[Stop] = &[
    (0.00, [13, 8, 135]),
    (0.25, [126, 3, 168]),
    (0.50, [204, 71, 120]),
    (0.75, [248, 149, 64]),
    (1.00, [240, 249, 33]),
];

const YLGNBU: &[Stop] = &[
    (0.00, [255, 255, 217]),
    (0.25, [199, 233, 180]),
    (0.50, [65, 182, 196]),
    (0.75, [34, 94, 168]),
    (1.00, [8, 29, 88]),
];

fn stops(palette: Palette) -> &'static [Stop] {
    match palette {
        Palette::Blues => BLUES,
        Palette::CoolWarm => COOLWARM,
        Palette::Plasma => PLASMA,
        Palette::YlGnBu => YLGNBU,
    }
}

/// Color for a normalized position `t` in 0..1 (clamped), interpolating
/// linearly between the palette's stops.
pub fn color_at(palette: Palette, t: f32) -> Color {
    let stops = stops(palette);
    let t = t.clamp(0.0, 1.0);

    let mut lower = stops[0];
    for &stop in stops {
        if stop.0 <= t {
            lower = stop;
        } else {
            let span = stop.0 - lower.0;
            let f = if span > 0.0 { (t - lower.0) / span } else { 0.0 };
            return lerp(lower.1, stop.1, f);
        }
    }
    Color::new(lower.1[0], lower.1[1], lower.1[2], 255)
}

fn lerp(a: [u8; 3], b: [u8; 3], f: f32) -> Color {
    let f = f.clamp(0.0, 1.0);
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * f).round() as u8;
    Color::new(mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2]), 255)
}
