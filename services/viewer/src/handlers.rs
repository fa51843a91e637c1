//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{info, warn};

use gfs_common::{param, DataSlice, ViewerError, ViewerResult};

use crate::page;
use crate::state::AppState;
use crate::validation::{MapQuery, ViewRequest};

/// Serve the interactive page.
pub async fn index_handler() -> Html<&'static str> {
    Html(page::INDEX_HTML)
}

/// Open the run and extract the requested slice.
///
/// The parameter was already resolved during validation, so an
/// unrecognized key never reaches the remote server.
pub async fn run_pipeline(state: &AppState, req: &ViewRequest) -> ViewerResult<DataSlice> {
    let grid = state.store.open(req.run).await?;
    extractor::extract_slice(
        state.store.source().as_ref(),
        &grid,
        req.param,
        req.step,
        &req.bounds,
    )
    .await
}

/// GET /map: the pseudocolor data image for the selection.
pub async fn map_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<MapQuery>,
) -> Response {
    let result = async {
        let req = query.resolve()?;
        info!(run = %req.run, param = req.param.key, step = req.step, "Map request");
        let slice = run_pipeline(&state, &req).await?;
        map_renderer::render_map(&slice, map_renderer::DEFAULT_MAP_WIDTH)
    }
    .await;

    match result {
        Ok(png) => png_response(png),
        Err(e) => error_response(e),
    }
}

/// GET /legend: the colorbar strip matching the /map image.
pub async fn legend_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<MapQuery>,
) -> Response {
    let result = async {
        let req = query.resolve()?;
        let slice = run_pipeline(&state, &req).await?;
        map_renderer::render_legend(&slice)
    }
    .await;

    match result {
        Ok(png) => png_response(png),
        Err(e) => error_response(e),
    }
}

/// GET /api/parameters: the display parameter catalog for the page.
pub async fn parameters_handler() -> Json<serde_json::Value> {
    let entries: Vec<_> = param::PARAMETERS
        .iter()
        .map(|p| {
            json!({
                "key": p.key,
                "label": p.label,
                "units": p.units,
                "palette": p.palette,
            })
        })
        .collect();
    Json(json!({ "parameters": entries }))
}

/// GET /health: liveness probe.
pub async fn health_handler() -> &'static str {
    "OK"
}

fn png_response(png: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/png"),
            // Selections are interactive; never let a browser cache a stale map
            (header::CACHE_CONTROL, "no-store"),
        ],
        png,
    )
        .into_response()
}

/// The page shows these bodies verbatim, so they stay plain text.
fn error_response(e: ViewerError) -> Response {
    let status =
        StatusCode::from_u16(e.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    warn!(status = %status, error = %e, "Request failed");
    (status, e.to_string()).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use gfs_common::{Cycle, GeoBounds, RunId};
    use test_utils::FakeGridSource;

    fn state_and_source() -> (AppState, Arc<FakeGridSource>) {
        let source = Arc::new(FakeGridSource::gfs_like());
        (AppState::with_source(source.clone()), source)
    }

    fn request(step: usize) -> ViewRequest {
        ViewRequest {
            run: RunId::new(NaiveDate::from_ymd_opt(2025, 3, 7).unwrap(), Cycle::Z00),
            param: param::lookup("prate").unwrap(),
            step,
            bounds: GeoBounds::new(-15.0, 15.0, 90.0, 150.0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_pipeline_extracts_slice() {
        let (state, _source) = state_and_source();
        let req = request(0);
        let slice = run_pipeline(&state, &req).await.unwrap();
        assert!(slice.shape_is_consistent());
        assert_eq!(slice.units, "mm/hour");
    }

    #[tokio::test]
    async fn test_pipeline_caches_grid() {
        let (state, source) = state_and_source();
        let req = request(0);
        run_pipeline(&state, &req).await.unwrap();
        run_pipeline(&state, &req).await.unwrap();
        assert_eq!(source.open_count(), 1);
    }

    #[tokio::test]
    async fn test_pipeline_rejects_out_of_range_step() {
        let (state, source) = state_and_source();
        let req = request(10_000);
        let err = run_pipeline(&state, &req).await.unwrap_err();
        assert!(matches!(err, ViewerError::IndexOutOfRange { .. }));
        // The grid is opened but no field is read
        assert_eq!(source.read_count(), 0);
    }

    #[tokio::test]
    async fn test_impossible_step_never_hits_source() {
        let (state, source) = state_and_source();
        let query = MapQuery {
            step: Some("500".to_string()),
            ..MapQuery::default()
        };
        let err = query.resolve().unwrap_err();
        assert_eq!(err.http_status_code(), 400);
        drop(state);
        assert_eq!(source.open_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_parameter_never_hits_source() {
        let (state, source) = state_and_source();
        let query = MapQuery {
            param: Some("vorticity".to_string()),
            ..MapQuery::default()
        };
        assert!(query.resolve().is_err());
        drop(state);
        assert_eq!(source.open_count(), 0);
    }
}
