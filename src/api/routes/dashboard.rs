//! Dashboard Route
//!
//! - GET /?url=... - Rendered dashboard page

use axum::{
    extract::{Query, State},
    response::Html,
};
use chrono::Utc;
use std::sync::Arc;

use crate::api::dto::FeedParams;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::dashboard::{render_html, Page};

/// GET /
///
/// Without a `url` parameter the configured feed is loaded; an empty
/// `url` renders just the form.
pub async fn dashboard_page(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FeedParams>,
) -> ApiResult<Html<String>> {
    let url = params
        .url
        .unwrap_or_else(|| state.default_url.to_string());

    let page = if url.trim().is_empty() {
        Page::form_only(state.default_url.to_string(), &state.dashboard)
    } else {
        Page::load(state.source.as_ref(), &url, &state.dashboard, Utc::now()).await?
    };

    Ok(Html(render_html(&page)))
}
