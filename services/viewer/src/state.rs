//! Shared application state.

use std::sync::Arc;

use anyhow::Result;

use dods_client::{DodsClient, GfsStore, GridSource};

/// State shared by all request handlers.
pub struct AppState {
    pub store: GfsStore,
}

impl AppState {
    /// Build state with a live GDS client against `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = DodsClient::new(base_url)?;
        Ok(Self {
            store: GfsStore::new(Arc::new(client)),
        })
    }

    /// Build state over an arbitrary grid source.
    pub fn with_source(source: Arc<dyn GridSource>) -> Self {
        Self {
            store: GfsStore::new(source),
        }
    }
}
