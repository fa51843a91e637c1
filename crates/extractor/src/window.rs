//! Coordinate-window selection on monotonic axis vectors.

use std::ops::Range;

/// Index range of the coordinates falling inclusively within `[lo, hi]`.
///
/// Works for both ascending and descending vectors: selection is by value,
/// not by position, so a north-to-south latitude axis and the GDS
/// south-to-north axis both yield the same window for the same bounds.
/// Returns an empty range when no coordinate qualifies.
pub fn coord_window(coords: &[f64], lo: f64, hi: f64) -> Range<usize> {
    let mut first = None;
    let mut last = 0;

    for (i, &c) in coords.iter().enumerate() {
        if c >= lo && c <= hi {
            if first.is_none() {
                first = Some(i);
            }
            last = i;
        }
    }

    match first {
        Some(start) => start..last + 1,
        None => 0..0,
    }
}
