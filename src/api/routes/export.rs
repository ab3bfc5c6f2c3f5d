//! Export Routes
//!
//! File downloads for the recent inscriptions.
//!
//! - GET /api/v1/export/csv - `inscriptions.csv`
//! - GET /api/v1/export/images - `images.zip`

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::inscriptions::load_dashboard;
use crate::api::dto::FeedParams;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::export::{build_image_archive, encode_csv, ARCHIVE_FILENAME, CSV_FILENAME};

/// GET /api/v1/export/csv
///
/// The CSV always has a header row, even when nothing is recent.
pub async fn export_csv(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FeedParams>,
) -> ApiResult<Response> {
    ensure_enabled(&state)?;

    let dashboard = load_dashboard(&state, params.url.as_deref()).await?;
    let csv = encode_csv(&dashboard.recent)?;

    tracing::info!(rows = dashboard.recent.len(), "Exported CSV");

    Ok(attachment("text/csv", CSV_FILENAME, csv.into_bytes()))
}

/// GET /api/v1/export/images
///
/// Images that cannot be fetched are left out of the archive.
pub async fn export_images(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FeedParams>,
) -> ApiResult<Response> {
    ensure_enabled(&state)?;

    let dashboard = load_dashboard(&state, params.url.as_deref()).await?;
    let archive = build_image_archive(state.source.as_ref(), &dashboard.recent).await?;

    Ok(attachment("application/zip", ARCHIVE_FILENAME, archive.bytes))
}

fn ensure_enabled(state: &AppState) -> ApiResult<()> {
    if state.config.enable_export {
        Ok(())
    } else {
        Err(ApiError::NotFound("Export feature is disabled".to_string()))
    }
}

fn attachment(content_type: &'static str, filename: &str, body: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        Body::from(body),
    )
        .into_response()
}
