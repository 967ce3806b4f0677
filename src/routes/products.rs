use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::models::Product;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    pub products: Vec<Product>,
}

/// Full catalog, id ascending
pub async fn list(State(state): State<AppState>) -> AppResult<Json<ProductsResponse>> {
    let products = state.catalog.all_products().await?;
    Ok(Json(ProductsResponse { products }))
}

/// Single product lookup
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Product>> {
    state
        .catalog
        .find(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {id} not found")))
}
