use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{EngagementCounts, Event, EventWithProduct, NewEvent, Product, SessionEvent};

pub mod memory;
pub mod postgres;

/// Number of most-recent session events consulted for category affinity
pub const SESSION_WINDOW: usize = 20;

/// Read/write access to the interaction event log.
///
/// Injected into the engine and the routes so tests can substitute fakes;
/// a failed read surfaces immediately, the engine never retries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventStore: Send + Sync {
    /// The most recent events for a session, newest first, each annotated
    /// with its product's category. At most `n` entries; a session with no
    /// events yields an empty vec, not an error.
    async fn recent_session_events(
        &self,
        session_id: &str,
        n: usize,
    ) -> AppResult<Vec<SessionEvent>>;

    /// All-time event tallies per product, for trending rank. Products
    /// without events are simply absent.
    async fn engagement_by_product(&self) -> AppResult<HashMap<i64, EngagementCounts>>;

    /// Appends one event to the log
    async fn record(&self, event: NewEvent) -> AppResult<Event>;

    /// Latest events across all sessions, joined with product sku/name,
    /// for the admin dashboard feed
    async fn recent_events(&self, limit: i64) -> AppResult<Vec<EventWithProduct>>;
}

/// Read access to the product catalog
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Looks up a single product; `None` for an unknown id
    async fn find(&self, product_id: i64) -> AppResult<Option<Product>>;

    /// The whole catalog, id ascending
    async fn all_products(&self) -> AppResult<Vec<Product>>;
}
