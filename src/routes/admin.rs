use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::models::{EventWithProduct, Product};
use crate::state::AppState;

/// Upper bound on the admin event feed, matching the dashboard page size
const ADMIN_FEED_LIMIT: i64 = 200;

#[derive(Debug, Deserialize)]
pub struct AdminEventsParams {
    pub limit: Option<i64>,
}

/// Catalog listing for the admin dashboard
pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let products = state.catalog.all_products().await?;
    Ok(Json(products))
}

/// Recent events across all sessions, joined with product sku/name
pub async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<AdminEventsParams>,
) -> AppResult<Json<Vec<EventWithProduct>>> {
    let limit = params.limit.unwrap_or(ADMIN_FEED_LIMIT).clamp(1, ADMIN_FEED_LIMIT);
    let events = state.events.recent_events(limit).await?;
    Ok(Json(events))
}
