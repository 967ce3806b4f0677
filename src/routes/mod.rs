use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::request_id_middleware;
use crate::state::AppState;

pub mod admin;
pub mod events;
pub mod products;
pub mod recommendations;

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Storefront / widget
        .route("/recommendations", get(recommendations::recommend))
        .route("/events", post(events::collect))
        .route("/products", get(products::list))
        .route("/products/:id", get(products::detail))
        // Admin dashboard
        .route("/admin/products", get(admin::list_products))
        .route("/admin/events", get(admin::list_events))
        .route(
            "/admin/recommendations/preview",
            get(recommendations::preview),
        )
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
