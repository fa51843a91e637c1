//! Per-process grid cache keyed by run identifier.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use gfs_common::{RunId, ViewerResult};

use crate::source::{GridInfo, GridSource};

/// Owns the grid source and caches opened runs for the process lifetime.
///
/// Entries are only ever inserted, never replaced. The lock is held across
/// the remote open so a given run is fetched at most once even if two
/// interactions race on it.
pub struct GfsStore {
    source: Arc<dyn GridSource>,
    cache: Mutex<HashMap<RunId, Arc<GridInfo>>>,
}

impl GfsStore {
    pub fn new(source: Arc<dyn GridSource>) -> Self {
        Self {
            source,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Open the grid for a run, or return the cached one.
    pub async fn open(&self, run: RunId) -> ViewerResult<Arc<GridInfo>> {
        let mut cache = self.cache.lock().await;
        if let Some(grid) = cache.get(&run) {
            debug!(run = %run, "Grid cache hit");
            return Ok(Arc::clone(grid));
        }

        let grid = Arc::new(self.source.open(run).await?);
        cache.insert(run, Arc::clone(&grid));
        Ok(grid)
    }

    /// The underlying source. Window reads go straight through it; only
    /// opened grids are cached.
    pub fn source(&self) -> &Arc<dyn GridSource> {
        &self.source
    }
}
