//! A deterministic in-memory `GridSource` with fetch counters.

use std::collections::HashMap;
use std::ops::Range;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;

use dods_client::{GridInfo, GridSource};
use gfs_common::{Cycle, RunId, ViewerError, ViewerResult};

/// Fake grid source for tests.
///
/// Unless overridden with `with_constant`, a variable's value at global
/// indices (row, col) is `col * 1000 + row`, so window reads are easy to
/// verify. `open_count`/`read_count` expose how often the remote would
/// have been hit.
pub struct FakeGridSource {
    lat: Vec<f64>,
    lon: Vec<f64>,
    steps: usize,
    variables: Vec<String>,
    constants: HashMap<String, f32>,
    open_count: AtomicUsize,
    read_count: AtomicUsize,
}

impl FakeGridSource {
    pub fn new(lat: Vec<f64>, lon: Vec<f64>, steps: usize, variables: &[&str]) -> Self {
        Self {
            lat,
            lon,
            steps,
            variables: variables.iter().map(|v| v.to_string()).collect(),
            constants: HashMap::new(),
            open_count: AtomicUsize::new(0),
            read_count: AtomicUsize::new(0),
        }
    }

    /// A coarse GFS-like grid: latitude ascending -90..90, longitude
    /// 0..180, 241 forecast steps, all five registry source variables.
    pub fn gfs_like() -> Self {
        let lat = (0..=18).map(|i| -90.0 + i as f64 * 10.0).collect();
        let lon = (0..=18).map(|i| i as f64 * 10.0).collect();
        Self::new(
            lat,
            lon,
            241,
            &["prate", "tmp2m", "ugrd10m", "vgrd10m", "prmsl"],
        )
    }

    /// Make `var` read as a constant field.
    pub fn with_constant(mut self, var: &str, value: f32) -> Self {
        self.constants.insert(var.to_string(), value);
        self
    }

    /// The GridInfo `open` would return, without counting an open.
    pub fn grid_info(&self) -> GridInfo {
        GridInfo {
            run: Self::default_run(),
            steps: self.steps,
            lat: self.lat.clone(),
            lon: self.lon.clone(),
            variables: self.variables.clone(),
        }
    }

    pub fn default_run() -> RunId {
        RunId::new(NaiveDate::from_ymd_opt(2025, 3, 7).unwrap(), Cycle::Z00)
    }

    pub fn open_count(&self) -> usize {
        self.open_count.load(Ordering::SeqCst)
    }

    pub fn read_count(&self) -> usize {
        self.read_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GridSource for FakeGridSource {
    async fn open(&self, run: RunId) -> ViewerResult<GridInfo> {
        self.open_count.fetch_add(1, Ordering::SeqCst);
        Ok(GridInfo {
            run,
            ..self.grid_info()
        })
    }

    async fn read_window(
        &self,
        _run: RunId,
        var: &str,
        step: usize,
        lat: Range<usize>,
        lon: Range<usize>,
    ) -> ViewerResult<Vec<f32>> {
        self.read_count.fetch_add(1, Ordering::SeqCst);

        if !self.variables.iter().any(|v| v == var) {
            return Err(ViewerError::DataUnavailable(format!(
                "fake source has no variable '{}'",
                var
            )));
        }
        if step >= self.steps || lat.end > self.lat.len() || lon.end > self.lon.len() {
            return Err(ViewerError::DataUnavailable(format!(
                "window out of bounds for '{}'",
                var
            )));
        }

        let constant = self.constants.get(var).copied();
        let mut values = Vec::with_capacity(lat.len() * lon.len());
        for row in lat {
            for col in lon.clone() {
                values.push(constant.unwrap_or((col * 1000 + row) as f32));
            }
        }
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_window_values_follow_pattern() {
        let source = FakeGridSource::gfs_like();
        let values = source
            .read_window(FakeGridSource::default_run(), "tmp2m", 0, 1..3, 2..4)
            .await
            .unwrap();
        // rows 1..3 x cols 2..4, value = col * 1000 + row
        assert_eq!(values, vec![2001.0, 3001.0, 2002.0, 3002.0]);
        assert_eq!(source.read_count(), 1);
    }
}
