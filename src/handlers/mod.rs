/// HTTP request handlers
use crate::domain::Health;
use crate::errors::{ApiError, ApiResult};
use crate::filters::FilterState;
use crate::render;
use crate::services::{PreviousService, UpcomingService};
use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub upcoming: Arc<UpcomingService>,
    pub previous: Arc<PreviousService>,
}

/// Health check handler
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        now: Utc::now(),
    })
}

/// Upcoming-launches dashboard page
pub async fn upcoming_page(State(state): State<AppState>) -> ApiResult<Html<String>> {
    // The background task keeps the snapshot warm; the first request after
    // startup may have to fetch inline.
    if !state.upcoming.has_snapshot().await {
        state.upcoming.refresh().await?;
    }
    let view = state
        .upcoming
        .view()
        .await
        .ok_or_else(|| ApiError::NetworkOrDecode("no launch data available".to_string()))?;
    Ok(Html(render::upcoming_page(&view)))
}

/// Previous-launches dashboard page
pub async fn previous_page(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<AppState>,
) -> ApiResult<Html<String>> {
    let filters = FilterState::from_params(&params);
    let view = state.previous.load(filters).await?;
    Ok(Html(render::previous_page(&view)))
}
