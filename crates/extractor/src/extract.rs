//! The extraction pipeline: validate, window, read, derive.

use tracing::debug;

use dods_client::{GridInfo, GridSource};
use gfs_common::{DataSlice, GeoBounds, Parameter, ViewerError, ViewerResult};

use crate::window::coord_window;

/// Extract the derived 2D slice of `param` at `step`, restricted to
/// `bounds`.
///
/// Side-effect free apart from the reads through `source`; every
/// interaction builds a fresh slice.
pub async fn extract_slice(
    source: &dyn GridSource,
    grid: &GridInfo,
    param: &Parameter,
    step: usize,
    bounds: &GeoBounds,
) -> ViewerResult<DataSlice> {
    if step >= grid.steps {
        return Err(ViewerError::IndexOutOfRange {
            requested: step,
            available: grid.steps,
        });
    }

    let lat_window = coord_window(&grid.lat, bounds.lat_min, bounds.lat_max);
    let lon_window = coord_window(&grid.lon, bounds.lon_min, bounds.lon_max);
    if lat_window.is_empty() || lon_window.is_empty() {
        return Err(ViewerError::EmptySelection(format!(
            "lat {}..{}, lon {}..{} does not intersect the grid",
            bounds.lat_min, bounds.lat_max, bounds.lon_min, bounds.lon_max
        )));
    }

    let ny = lat_window.len();
    let nx = lon_window.len();
    debug!(
        param = param.key,
        step = step,
        ny = ny,
        nx = nx,
        "Extracting slice"
    );

    let mut fields = Vec::with_capacity(param.sources.len());
    for &var in param.sources {
        if !grid.has_variable(var) {
            return Err(ViewerError::DataUnavailable(format!(
                "run {} does not provide variable '{}'",
                grid.run, var
            )));
        }

        let field = source
            .read_window(grid.run, var, step, lat_window.clone(), lon_window.clone())
            .await?;
        if field.len() != ny * nx {
            return Err(ViewerError::DataUnavailable(format!(
                "window read for '{}' returned {} values, expected {}",
                var,
                field.len(),
                ny * nx
            )));
        }
        fields.push(field);
    }

    let field_refs: Vec<&[f32]> = fields.iter().map(|f| f.as_slice()).collect();
    let values = param.derivation.apply(&field_refs);

    Ok(DataSlice {
        values,
        lat: grid.lat[lat_window].to_vec(),
        lon: grid.lon[lon_window].to_vec(),
        title: param.title(),
        units: param.units,
        palette: param.palette,
    })
}
