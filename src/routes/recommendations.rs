use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::Product;
use crate::services::{RecommendationRequest, Strategy, DEFAULT_LIMIT};
use crate::state::AppState;

/// Raw query parameters as the widget and the admin UI send them
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationParams {
    pub session_id: Option<String>,
    pub current_product_id: Option<i64>,
    pub limit: Option<i64>,
}

impl RecommendationParams {
    /// Boundary validation. The engine only ever receives a well-formed
    /// request: a positive limit (default 8), a positive current product id
    /// when present, and a session id that is not just whitespace.
    fn validate(self) -> AppResult<RecommendationRequest> {
        if let Some(id) = self.current_product_id {
            if id <= 0 {
                return Err(AppError::InvalidInput(
                    "currentProductId must be a positive integer".to_string(),
                ));
            }
        }

        let limit = match self.limit {
            None => DEFAULT_LIMIT,
            Some(limit) if limit >= 1 => limit as usize,
            Some(_) => {
                return Err(AppError::InvalidInput(
                    "limit must be a positive integer".to_string(),
                ))
            }
        };

        let session_id = self
            .session_id
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(RecommendationRequest {
            session_id,
            current_product_id: self.current_product_id,
            limit,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub items: Vec<Product>,
}

/// Explainability metadata for the admin preview
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationDebug {
    pub strategy: Strategy,
    pub session_id: Option<String>,
    pub current_product_id: Option<i64>,
    pub limit: usize,
    pub categories_used: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub items: Vec<Product>,
    pub debug: RecommendationDebug,
}

/// Storefront/widget endpoint: ranked items only
pub async fn recommend(
    State(state): State<AppState>,
    Query(params): Query<RecommendationParams>,
) -> AppResult<Json<RecommendationsResponse>> {
    let request = params.validate()?;
    let outcome = state.recommender.recommend(&request).await?;
    Ok(Json(RecommendationsResponse {
        items: outcome.items,
    }))
}

/// Admin preview: same pipeline, plus the metadata explaining the result
pub async fn preview(
    State(state): State<AppState>,
    Query(params): Query<RecommendationParams>,
) -> AppResult<Json<PreviewResponse>> {
    let request = params.validate()?;
    let outcome = state.recommender.recommend(&request).await?;

    let debug = RecommendationDebug {
        strategy: outcome.strategy,
        session_id: request.session_id,
        current_product_id: request.current_product_id,
        limit: request.limit,
        categories_used: outcome.categories_used,
    };

    Ok(Json(PreviewResponse {
        items: outcome.items,
        debug,
    }))
}
