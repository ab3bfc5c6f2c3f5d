//! Inscription Routes
//!
//! - GET /api/v1/inscriptions - Recent inscriptions, most viewed first
//! - GET /api/v1/charts - Chart aggregates for the recent inscriptions

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use std::sync::Arc;

use crate::api::dto::{ChartsResponse, FeedParams, InscriptionsResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::dashboard::Dashboard;
use crate::source::fetch_inscriptions;

/// GET /api/v1/inscriptions
///
/// A failed fetch is not an HTTP error: the response carries the notice
/// and an empty list.
pub async fn list_inscriptions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FeedParams>,
) -> ApiResult<Json<InscriptionsResponse>> {
    let dashboard = load_dashboard(&state, params.url.as_deref()).await?;
    Ok(Json(dashboard.into()))
}

/// GET /api/v1/charts
pub async fn chart_data(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FeedParams>,
) -> ApiResult<Json<ChartsResponse>> {
    let dashboard = load_dashboard(&state, params.url.as_deref()).await?;
    Ok(Json(dashboard.into()))
}

/// Fetch the requested feed and build the dashboard view model
pub(crate) async fn load_dashboard(state: &AppState, url: Option<&str>) -> ApiResult<Dashboard> {
    let url = state.feed_url(url)?;
    let outcome = fetch_inscriptions(state.source.as_ref(), &url).await;
    Ok(Dashboard::build(&url, &outcome, &state.dashboard, Utc::now()))
}
