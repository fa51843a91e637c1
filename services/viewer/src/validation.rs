//! Query-string validation for the map and legend endpoints.

use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use gfs_common::{param, Cycle, GeoBounds, Parameter, RunId, ViewerError, ViewerResult};

/// Last forecast step the hourly GFS dataset carries.
const MAX_STEP: usize = 240;

/// Default window, roughly maritime Southeast Asia.
const DEFAULT_LAT_MIN: f64 = -15.0;
const DEFAULT_LAT_MAX: f64 = 15.0;
const DEFAULT_LON_MIN: f64 = 90.0;
const DEFAULT_LON_MAX: f64 = 150.0;

/// Raw query parameters as the browser sends them.
///
/// Everything is optional and arrives as strings; `resolve` applies
/// defaults and turns format errors into the 400-class error messages the
/// page displays verbatim.
#[derive(Debug, Default, Deserialize)]
pub struct MapQuery {
    pub date: Option<String>,
    pub hour: Option<String>,
    pub param: Option<String>,
    pub step: Option<String>,
    pub lat_min: Option<String>,
    pub lat_max: Option<String>,
    pub lon_min: Option<String>,
    pub lon_max: Option<String>,
}

/// A fully validated view request.
#[derive(Debug, Clone, Copy)]
pub struct ViewRequest {
    pub run: RunId,
    pub param: &'static Parameter,
    pub step: usize,
    pub bounds: GeoBounds,
}

impl MapQuery {
    /// Validate the query and fill in defaults: today's 00z run,
    /// precipitation rate at step 0 over the default window.
    pub fn resolve(&self) -> ViewerResult<ViewRequest> {
        let key = self.param.as_deref().unwrap_or("prate");
        let param = param::lookup(key)
            .ok_or_else(|| ViewerError::UnrecognizedParameter(key.to_string()))?;

        let date = match &self.date {
            Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
                ViewerError::InvalidParameter {
                    param: "date".to_string(),
                    message: format!("'{}' is not a YYYY-MM-DD date", s),
                }
            })?,
            None => Utc::now().date_naive(),
        };
        let cycle = Cycle::parse(self.hour.as_deref().unwrap_or("00"))?;

        let step = match &self.step {
            Some(s) => s.parse::<usize>().map_err(|_| ViewerError::InvalidParameter {
                param: "step".to_string(),
                message: format!("'{}' is not a forecast step index", s),
            })?,
            None => 0,
        };
        // Reject here so an impossible step never costs a remote open
        if step > MAX_STEP {
            return Err(ViewerError::InvalidParameter {
                param: "step".to_string(),
                message: format!("{} exceeds the last forecast step ({})", step, MAX_STEP),
            });
        }

        let bounds = GeoBounds::new(
            parse_coord("lat_min", &self.lat_min, DEFAULT_LAT_MIN)?,
            parse_coord("lat_max", &self.lat_max, DEFAULT_LAT_MAX)?,
            parse_coord("lon_min", &self.lon_min, DEFAULT_LON_MIN)?,
            parse_coord("lon_max", &self.lon_max, DEFAULT_LON_MAX)?,
        )?;

        Ok(ViewRequest {
            run: RunId::new(date, cycle),
            param,
            step,
            bounds,
        })
    }
}

fn parse_coord(name: &str, value: &Option<String>, default: f64) -> ViewerResult<f64> {
    match value {
        Some(s) => s.parse::<f64>().map_err(|_| ViewerError::InvalidParameter {
            param: name.to_string(),
            message: format!("'{}' is not a number", s),
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> MapQuery {
        let mut q = MapQuery::default();
        for &(k, v) in pairs {
            let v = Some(v.to_string());
            match k {
                "date" => q.date = v,
                "hour" => q.hour = v,
                "param" => q.param = v,
                "step" => q.step = v,
                "lat_min" => q.lat_min = v,
                "lat_max" => q.lat_max = v,
                "lon_min" => q.lon_min = v,
                "lon_max" => q.lon_max = v,
                other => panic!("unknown key {}", other),
            }
        }
        q
    }

    #[test]
    fn test_defaults() {
        let req = MapQuery::default().resolve().unwrap();
        assert_eq!(req.param.key, "prate");
        assert_eq!(req.step, 0);
        assert_eq!(req.run.cycle, Cycle::Z00);
        assert_eq!(req.bounds.lat_min, -15.0);
        assert_eq!(req.bounds.lon_max, 150.0);
    }

    #[test]
    fn test_full_query() {
        let req = query(&[
            ("date", "2025-03-07"),
            ("hour", "12"),
            ("param", "wind"),
            ("step", "24"),
            ("lat_min", "-5"),
            ("lat_max", "5"),
            ("lon_min", "100"),
            ("lon_max", "110"),
        ])
        .resolve()
        .unwrap();
        assert_eq!(req.run.to_string(), "2025-03-07 12z");
        assert_eq!(req.param.key, "wind");
        assert_eq!(req.step, 24);
        assert_eq!(req.bounds.lon_span(), 10.0);
    }

    #[test]
    fn test_unknown_parameter() {
        let err = query(&[("param", "vorticity")]).resolve().unwrap_err();
        assert!(matches!(err, ViewerError::UnrecognizedParameter(_)));
        assert_eq!(err.http_status_code(), 400);
    }

    #[test]
    fn test_bad_date() {
        let err = query(&[("date", "03/07/2025")]).resolve().unwrap_err();
        assert!(err.to_string().contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_bad_hour() {
        assert!(query(&[("hour", "03")]).resolve().is_err());
    }

    #[test]
    fn test_bad_step() {
        let err = query(&[("step", "-1")]).resolve().unwrap_err();
        assert_eq!(err.http_status_code(), 400);
    }

    #[test]
    fn test_step_beyond_last_forecast() {
        assert_eq!(query(&[("step", "240")]).resolve().unwrap().step, 240);

        let err = query(&[("step", "500")]).resolve().unwrap_err();
        assert!(matches!(err, ViewerError::InvalidParameter { .. }));
        assert_eq!(err.http_status_code(), 400);
    }

    #[test]
    fn test_bad_bounds() {
        assert!(query(&[("lat_min", "20"), ("lat_max", "10")]).resolve().is_err());
        assert!(query(&[("lon_min", "abc")]).resolve().is_err());
    }
}
