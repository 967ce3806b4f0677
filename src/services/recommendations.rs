//! The recommendation pipeline: history read, affinity scoring, category
//! selection, catalog ranking. Stateless across calls; every run re-reads
//! the stores, so a changing store can change the answer. That is expected.

use std::sync::Arc;

use crate::error::AppResult;
use crate::models::{Product, SessionEvent};
use crate::stores::{EventStore, ProductCatalog, SESSION_WINDOW};

use super::ranking::rank_products;
use super::scoring::score_categories;
use super::selection::{select_categories, CategorySelection, Strategy};

/// Result list length when the caller does not ask for one
pub const DEFAULT_LIMIT: usize = 8;

/// A validated recommendation request. Constructed only at the HTTP
/// boundary; the engine never sees raw parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationRequest {
    pub session_id: Option<String>,
    pub current_product_id: Option<i64>,
    pub limit: usize,
}

/// What one engine run produced, with the metadata that explains it
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationOutcome {
    pub items: Vec<Product>,
    pub strategy: Strategy,
    pub categories_used: Vec<String>,
}

/// The rule-based engine, wired to injected stores
pub struct Recommender {
    events: Arc<dyn EventStore>,
    catalog: Arc<dyn ProductCatalog>,
}

impl Recommender {
    pub fn new(events: Arc<dyn EventStore>, catalog: Arc<dyn ProductCatalog>) -> Self {
        Self { events, catalog }
    }

    /// Runs the full pipeline for one request.
    ///
    /// An unknown `current_product_id` degrades to "no primary category";
    /// an empty catalog degrades to an empty list. A failed store read
    /// fails the whole request with no partial result.
    pub async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> AppResult<RecommendationOutcome> {
        // The current-product lookup and the history read are independent.
        let (current_product, history) = tokio::join!(
            self.current_product(request.current_product_id),
            self.session_history(request.session_id.as_deref()),
        );
        let current_product = current_product?;
        let history = history?;

        let scores = score_categories(&history);
        let primary = current_product
            .as_ref()
            .and_then(|product| product.category.as_deref());
        let CategorySelection {
            categories_used,
            strategy,
        } = select_categories(&scores, primary);

        let (catalog, engagement) = tokio::join!(
            self.catalog.all_products(),
            self.events.engagement_by_product(),
        );
        let items = rank_products(
            catalog?,
            &engagement?,
            &categories_used,
            request.current_product_id,
            request.limit,
        );

        tracing::debug!(
            strategy = ?strategy,
            categories = ?categories_used,
            item_count = items.len(),
            "computed recommendations"
        );

        Ok(RecommendationOutcome {
            items,
            strategy,
            categories_used,
        })
    }

    async fn current_product(&self, product_id: Option<i64>) -> AppResult<Option<Product>> {
        match product_id {
            Some(id) => self.catalog.find(id).await,
            None => Ok(None),
        }
    }

    async fn session_history(&self, session_id: Option<&str>) -> AppResult<Vec<SessionEvent>> {
        match session_id {
            Some(session_id) => {
                self.events
                    .recent_session_events(session_id, SESSION_WINDOW)
                    .await
            }
            None => Ok(Vec::new()),
        }
    }
}
