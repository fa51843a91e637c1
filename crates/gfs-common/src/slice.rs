//! The extracted 2D slice handed from the extractor to the renderer.

use crate::param::Palette;

/// A derived 2D field restricted to the requested window, together with
/// the coordinate vectors that georeference it.
///
/// `values` is row-major `[lat][lon]` in the order of the coordinate
/// vectors (which keep the grid's native orientation). Never mutated after
/// creation; each interaction builds a fresh one.
#[derive(Debug, Clone)]
pub struct DataSlice {
    pub values: Vec<f32>,
    pub lat: Vec<f64>,
    pub lon: Vec<f64>,
    pub title: String,
    pub units: &'static str,
    pub palette: Palette,
}

impl DataSlice {
    /// Number of latitude rows.
    pub fn ny(&self) -> usize {
        self.lat.len()
    }

    /// Number of longitude columns.
    pub fn nx(&self) -> usize {
        self.lon.len()
    }

    /// Whether the value buffer matches the coordinate outer product.
    pub fn shape_is_consistent(&self) -> bool {
        self.values.len() == self.ny() * self.nx()
    }

    /// Min and max over finite values, if any exist.
    pub fn value_range(&self) -> Option<(f32, f32)> {
        let mut range: Option<(f32, f32)> = None;
        for &v in &self.values {
            if v.is_finite() {
                range = Some(match range {
                    Some((lo, hi)) => (lo.min(v), hi.max(v)),
                    None => (v, v),
                });
            }
        }
        range
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slice(values: Vec<f32>, ny: usize, nx: usize) -> DataSlice {
        DataSlice {
            values,
            lat: (0..ny).map(|i| i as f64).collect(),
            lon: (0..nx).map(|i| i as f64).collect(),
            title: "test".to_string(),
            units: "1",
            palette: Palette::Blues,
        }
    }

    #[test]
    fn test_shape_check() {
        assert!(slice(vec![0.0; 6], 2, 3).shape_is_consistent());
        assert!(!slice(vec![0.0; 5], 2, 3).shape_is_consistent());
    }

    #[test]
    fn test_value_range_skips_nan() {
        let s = slice(vec![f32::NAN, 2.0, -1.0, f32::NAN, 5.0, 0.0], 2, 3);
        assert_eq!(s.value_range(), Some((-1.0, 5.0)));
    }

    #[test]
    fn test_value_range_all_nan() {
        let s = slice(vec![f32::NAN; 4], 2, 2);
        assert_eq!(s.value_range(), None);
    }
}
