//! Geographic bounding box for slice extraction and display.

use serde::{Deserialize, Serialize};

use crate::error::ViewerError;

/// A latitude/longitude window in the GFS grid's coordinate conventions:
/// latitude in degrees north (-90..90), longitude in degrees east (0..360).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl GeoBounds {
    /// Validate and build a bounding box.
    ///
    /// Longitude uses the 0-360 convention of the GFS grid; negative
    /// longitudes are rejected rather than silently wrapped so the user
    /// sees why a selection came back empty.
    pub fn new(lat_min: f64, lat_max: f64, lon_min: f64, lon_max: f64) -> Result<Self, ViewerError> {
        let check = |param: &str, value: f64, lo: f64, hi: f64| {
            if !value.is_finite() || value < lo || value > hi {
                Err(ViewerError::InvalidParameter {
                    param: param.to_string(),
                    message: format!("{} is outside the valid range {}..{}", value, lo, hi),
                })
            } else {
                Ok(())
            }
        };

        check("lat_min", lat_min, -90.0, 90.0)?;
        check("lat_max", lat_max, -90.0, 90.0)?;
        check("lon_min", lon_min, 0.0, 360.0)?;
        check("lon_max", lon_max, 0.0, 360.0)?;

        if lat_min > lat_max {
            return Err(ViewerError::InvalidParameter {
                param: "lat_min".to_string(),
                message: format!("lat_min ({}) must not exceed lat_max ({})", lat_min, lat_max),
            });
        }
        if lon_min > lon_max {
            return Err(ViewerError::InvalidParameter {
                param: "lon_min".to_string(),
                message: format!("lon_min ({}) must not exceed lon_max ({})", lon_min, lon_max),
            });
        }

        Ok(Self {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
        })
    }

    /// Latitude span in degrees.
    pub fn lat_span(&self) -> f64 {
        self.lat_max - self.lat_min
    }

    /// Longitude span in degrees.
    pub fn lon_span(&self) -> f64 {
        self.lon_max - self.lon_min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_bounds() {
        let b = GeoBounds::new(-15.0, 15.0, 90.0, 150.0).unwrap();
        assert_eq!(b.lat_span(), 30.0);
        assert_eq!(b.lon_span(), 60.0);
    }

    #[test]
    fn test_latitude_out_of_range() {
        let err = GeoBounds::new(-95.0, 15.0, 90.0, 150.0).unwrap_err();
        assert!(matches!(err, ViewerError::InvalidParameter { .. }));
    }

    #[test]
    fn test_negative_longitude_rejected() {
        // GFS longitudes are 0-360; a -60..20 box must be rejected, not wrapped
        assert!(GeoBounds::new(-15.0, 15.0, -60.0, 20.0).is_err());
    }

    #[test]
    fn test_inverted_latitudes_rejected() {
        let err = GeoBounds::new(30.0, -30.0, 90.0, 150.0).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("lat_min"), "unexpected message: {}", msg);
    }
}
