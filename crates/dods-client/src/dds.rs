//! Parser for the OPeNDAP DDS (dataset descriptor structure) text format.
//!
//! The GDS `.dds` endpoint describes the dataset as typed declarations:
//!
//! ```text
//! Dataset {
//!     Float64 time[time = 241];
//!     Float64 lat[lat = 721];
//!     Float64 lon[lon = 1440];
//!     Grid {
//!      ARRAY:
//!         Float32 prate[time = 241][lat = 721][lon = 1440];
//!      MAPS:
//!         Float64 time[time = 241];
//!         ...
//!     } prate;
//! } gfs20250307/gfs_0p25_1hr_06z;
//! ```

use std::collections::HashMap;

use gfs_common::{ViewerError, ViewerResult};

/// A declared array: name plus (dimension name, size) pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct DdsVariable {
    pub name: String,
    pub dims: Vec<(String, usize)>,
}

impl DdsVariable {
    /// Whether this is a surface field on the (time, lat, lon) axes.
    pub fn is_surface_grid(&self) -> bool {
        self.dims.len() == 3
            && self.dims[0].0 == "time"
            && self.dims[1].0 == "lat"
            && self.dims[2].0 == "lon"
    }
}

/// Parsed structure of one dataset.
#[derive(Debug, Clone)]
pub struct DdsDataset {
    /// Coordinate axis sizes (time, lat, lon, lev, ...).
    pub axes: HashMap<String, usize>,
    /// Gridded variables, in declaration order.
    pub variables: Vec<DdsVariable>,
}

impl DdsDataset {
    pub fn axis_len(&self, name: &str) -> ViewerResult<usize> {
        self.axes.get(name).copied().ok_or_else(|| {
            ViewerError::DataUnavailable(format!("remote catalog declares no '{}' axis", name))
        })
    }

    /// Names of the surface (time, lat, lon) variables.
    pub fn surface_variables(&self) -> Vec<String> {
        self.variables
            .iter()
            .filter(|v| v.is_surface_grid())
            .map(|v| v.name.clone())
            .collect()
    }
}

/// Parse a DDS document.
///
/// Tolerant of whitespace variations; fails when no declarations are
/// found, which is what an HTML error page from the server degrades to.
pub fn parse(text: &str) -> ViewerResult<DdsDataset> {
    let mut axes = HashMap::new();
    let mut variables = Vec::new();
    let mut after_array_marker = false;

    for raw in text.lines() {
        let line = raw.trim();

        if line.starts_with("ARRAY:") {
            after_array_marker = true;
            continue;
        }
        if line.starts_with("MAPS:") {
            after_array_marker = false;
            continue;
        }

        let Some(decl) = parse_declaration(line) else {
            after_array_marker = false;
            continue;
        };

        if after_array_marker {
            variables.push(decl);
            after_array_marker = false;
        } else if decl.dims.len() == 1 && decl.dims[0].0 == decl.name {
            // Top-level coordinate axis: Float64 lat[lat = 721];
            axes.insert(decl.name.clone(), decl.dims[0].1);
        }
    }

    if axes.is_empty() && variables.is_empty() {
        return Err(ViewerError::DataUnavailable(
            "remote catalog response is not a DDS document".to_string(),
        ));
    }

    Ok(DdsDataset { axes, variables })
}

/// Parse `Float32 name[dim = N][dim = N];` into a DdsVariable.
fn parse_declaration(line: &str) -> Option<DdsVariable> {
    let line = line.strip_suffix(';').unwrap_or(line);
    let (type_name, rest) = line.split_once(char::is_whitespace)?;
    if !matches!(type_name, "Float32" | "Float64" | "Int32" | "Int16" | "Byte") {
        return None;
    }

    let bracket = rest.find('[')?;
    let name = rest[..bracket].trim().to_string();
    if name.is_empty() {
        return None;
    }

    let mut dims = Vec::new();
    for part in rest[bracket..].split('[').skip(1) {
        let part = part.strip_suffix(']')?;
        let (dim_name, size) = part.split_once('=')?;
        let size: usize = size.trim().parse().ok()?;
        dims.push((dim_name.trim().to_string(), size));
    }
    if dims.is_empty() {
        return None;
    }

    Some(DdsVariable { name, dims })
}
