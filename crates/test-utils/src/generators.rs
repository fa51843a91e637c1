//! Synthetic field generators for renderer and pipeline tests.

/// Temperature-like gradient in °C, roughly -20 at one corner to +40 at
/// the opposite one.
pub fn temperature_field(ny: usize, nx: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(ny * nx);
    for row in 0..ny {
        for col in 0..nx {
            let x = col as f32 / nx.max(1) as f32;
            let y = row as f32 / ny.max(1) as f32;
            data.push(-20.0 + x * 30.0 + y * 30.0);
        }
    }
    data
}

/// Gradient field with a NaN hole in the middle, for missing-data paths.
pub fn field_with_gap(ny: usize, nx: usize) -> Vec<f32> {
    let mut data = temperature_field(ny, nx);
    let row = ny / 2;
    let col = nx / 2;
    data[row * nx + col] = f32::NAN;
    data
}
