//! The narrow interface the rest of the pipeline reads grids through.

use std::ops::Range;

use async_trait::async_trait;

use gfs_common::{RunId, ViewerResult};

/// Metadata for one opened model run.
///
/// Coordinate vectors keep the grid's native ordering (the GDS GFS grid
/// serves latitude ascending from -90); consumers must not assume a
/// direction. Immutable after open; shared via `Arc`.
#[derive(Debug, Clone)]
pub struct GridInfo {
    pub run: RunId,
    /// Number of forecast steps in the time dimension.
    pub steps: usize,
    pub lat: Vec<f64>,
    pub lon: Vec<f64>,
    /// Names of the (time, lat, lon) gridded variables the run offers.
    pub variables: Vec<String>,
}

impl GridInfo {
    pub fn has_variable(&self, name: &str) -> bool {
        self.variables.iter().any(|v| v == name)
    }
}

/// Capability interface for opening remote grids and reading windows of
/// them. `DodsClient` is the production implementation; tests substitute
/// a counting fake.
#[async_trait]
pub trait GridSource: Send + Sync {
    /// Resolve and open the grid for a run. A single attempt; failure
    /// surfaces as `DataUnavailable`.
    async fn open(&self, run: RunId) -> ViewerResult<GridInfo>;

    /// Read one forecast step of `var` restricted to index windows on the
    /// latitude and longitude axes. Returns row-major `[lat][lon]` values
    /// with missing points already mapped to NaN.
    async fn read_window(
        &self,
        run: RunId,
        var: &str,
        step: usize,
        lat: Range<usize>,
        lon: Range<usize>,
    ) -> ViewerResult<Vec<f32>>;
}
