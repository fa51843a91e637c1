//! Rendering of extracted GFS slices to georeferenced PNG overlays.
//!
//! Two products come out of this crate: the data image itself, intended
//! to be stretched over its bounding box on a web basemap, and a matching
//! legend strip. Both are encoded as RGBA PNGs.

mod glyphs;
mod legend;
mod mesh;
mod png;
mod ramp;

use gfs_common::{DataSlice, ViewerError, ViewerResult};

/// Default pixel width of the data image.
pub const DEFAULT_MAP_WIDTH: u32 = 1024;

/// Render the pseudocolor map for a slice as a PNG byte stream.
///
/// The image height follows the window's aspect ratio. Missing cells are
/// transparent so the basemap shows through.
pub fn render_map(slice: &DataSlice, width: u32) -> ViewerResult<Vec<u8>> {
    let img = mesh::render_mesh(slice, width).map_err(ViewerError::RenderError)?;
    tracing::debug!(
        width = img.width(),
        height = img.height(),
        title = %slice.title,
        "rendered data mesh"
    );
    png::encode_rgba(&img).map_err(ViewerError::RenderError)
}

/// Render the legend strip for a slice as a PNG byte stream.
pub fn render_legend(slice: &DataSlice) -> ViewerResult<Vec<u8>> {
    let img = legend::render_legend(slice);
    png::encode_rgba(&img).map_err(ViewerError::RenderError)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gfs_common::Palette;
    use test_utils::generators;

    fn sample_slice() -> DataSlice {
        DataSlice {
            values: generators::field_with_gap(4, 6),
            lat: vec![15.0, 5.0, -5.0, -15.0],
            lon: vec![90.0, 100.0, 110.0, 120.0, 130.0, 140.0],
            title: "2m Temperature (°C)".to_string(),
            units: "°C",
            palette: Palette::CoolWarm,
        }
    }

    #[test]
    fn test_render_map_produces_png() {
        let png = render_map(&sample_slice(), 512).unwrap();
        assert_eq!(&png[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    }

    #[test]
    fn test_render_map_shape_mismatch() {
        let mut slice = sample_slice();
        slice.values.pop();
        let err = render_map(&slice, 512).unwrap_err();
        assert!(matches!(err, ViewerError::RenderError(_)));
        assert_eq!(err.http_status_code(), 500);
    }

    #[test]
    fn test_render_legend_produces_png() {
        let png = render_legend(&sample_slice()).unwrap();
        assert_eq!(&png[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    }
}
