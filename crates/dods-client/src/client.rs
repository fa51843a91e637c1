//! reqwest-backed GDS client.

use std::ops::Range;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use gfs_common::{RunId, ViewerError, ViewerResult};

use crate::ascii;
use crate::dds;
use crate::source::{GridInfo, GridSource};
use crate::MISSING_THRESHOLD;

/// Default GDS catalog for the 0.25° hourly GFS.
pub const DEFAULT_BASE_URL: &str = "https://nomads.ncep.noaa.gov/dods/gfs_0p25_1hr";

/// Defensive request timeout; the fetch contract itself specifies none.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// OPeNDAP client for the GrADS Data Server.
pub struct DodsClient {
    http: Client,
    base_url: String,
}

impl DodsClient {
    /// Create a client against the given catalog base URL.
    pub fn new(base_url: impl Into<String>) -> ViewerResult<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| ViewerError::DataUnavailable(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Dataset URL for a run: `{base}/gfs{YYYYMMDD}/gfs_0p25_1hr_{HH}z`.
    pub fn dataset_url(&self, run: RunId) -> String {
        format!(
            "{}/gfs{}/gfs_0p25_1hr_{}z",
            self.base_url,
            run.date_compact(),
            run.hour_padded()
        )
    }

    async fn fetch_text(&self, url: &str) -> ViewerResult<String> {
        debug!(url = %url, "GDS request");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ViewerError::DataUnavailable(format!("request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ViewerError::DataUnavailable(format!(
                "{} answered {} (run not yet published?)",
                url, status
            )));
        }

        response
            .text()
            .await
            .map_err(|e| ViewerError::DataUnavailable(format!("reading {} failed: {}", url, e)))
    }
}

#[async_trait]
impl GridSource for DodsClient {
    async fn open(&self, run: RunId) -> ViewerResult<GridInfo> {
        let url = self.dataset_url(run);

        let dds_text = self.fetch_text(&format!("{}.dds", url)).await?;
        let dataset = dds::parse(&dds_text)?;

        let steps = dataset.axis_len("time")?;
        let nlat = dataset.axis_len("lat")?;
        let nlon = dataset.axis_len("lon")?;

        let lat_body = self.fetch_text(&format!("{}.ascii?lat", url)).await?;
        let lat = ascii::parse_block(&lat_body, "lat")?;
        let lon_body = self.fetch_text(&format!("{}.ascii?lon", url)).await?;
        let lon = ascii::parse_block(&lon_body, "lon")?;

        if lat.len() != nlat || lon.len() != nlon {
            return Err(ViewerError::DataUnavailable(format!(
                "coordinate vectors ({}x{}) disagree with the catalog ({}x{})",
                lat.len(),
                lon.len(),
                nlat,
                nlon
            )));
        }

        let variables = dataset.surface_variables();
        info!(
            run = %run,
            steps = steps,
            nlat = nlat,
            nlon = nlon,
            variables = variables.len(),
            "Opened GFS run"
        );

        Ok(GridInfo {
            run,
            steps,
            lat,
            lon,
            variables,
        })
    }

    async fn read_window(
        &self,
        run: RunId,
        var: &str,
        step: usize,
        lat: Range<usize>,
        lon: Range<usize>,
    ) -> ViewerResult<Vec<f32>> {
        // GDS hyperslab bounds are inclusive on both ends.
        let url = format!(
            "{}.ascii?{}[{}:{}][{}:{}][{}:{}]",
            self.dataset_url(run),
            var,
            step,
            step,
            lat.start,
            lat.end - 1,
            lon.start,
            lon.end - 1,
        );

        let body = self.fetch_text(&url).await?;
        let raw = ascii::parse_block(&body, var)?;

        Ok(raw
            .into_iter()
            .map(|v| {
                let v = v as f32;
                if v.abs() >= MISSING_THRESHOLD {
                    f32::NAN
                } else {
                    v
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use gfs_common::Cycle;

    fn run() -> RunId {
        RunId::new(NaiveDate::from_ymd_opt(2025, 3, 7).unwrap(), Cycle::Z06)
    }

    #[test]
    fn test_dataset_url() {
        let client = DodsClient::new(DEFAULT_BASE_URL).unwrap();
        assert_eq!(
            client.dataset_url(run()),
            "https://nomads.ncep.noaa.gov/dods/gfs_0p25_1hr/gfs20250307/gfs_0p25_1hr_06z"
        );
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = DodsClient::new("http://example.com/dods/gfs_0p25_1hr/").unwrap();
        assert!(client
            .dataset_url(run())
            .starts_with("http://example.com/dods/gfs_0p25_1hr/gfs20250307"));
    }
}
