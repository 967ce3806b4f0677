use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::AppResult;
use crate::models::{EngagementCounts, Event, EventType, EventWithProduct, NewEvent, Product, SessionEvent};

use super::{EventStore, ProductCatalog};

/// In-memory implementation of both store traits.
///
/// Backs the integration tests and local runs without Postgres. Events keep
/// their insertion order; "most recent" means highest id.
#[derive(Default)]
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    products: Vec<Product>,
    events: Vec<Event>,
    next_event_id: i64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_product(&self, product: Product) {
        let mut inner = self.inner.write().await;
        inner.products.push(product);
        inner.products.sort_by_key(|p| p.id);
    }

    /// Seeding shorthand for tests: an anonymous event for a session
    pub async fn add_event(&self, session_id: &str, product_id: i64, event_type: EventType) {
        let mut inner = self.inner.write().await;
        inner.next_event_id += 1;
        let id = inner.next_event_id;
        inner.events.push(Event {
            id,
            session_id: session_id.to_string(),
            user_id: None,
            product_id,
            event_type,
            created_at: Utc::now(),
        });
    }
}

#[async_trait]
impl EventStore for InMemoryStore {
    async fn recent_session_events(
        &self,
        session_id: &str,
        n: usize,
    ) -> AppResult<Vec<SessionEvent>> {
        let inner = self.inner.read().await;
        let events = inner
            .events
            .iter()
            .rev()
            .filter(|e| e.session_id == session_id)
            .take(n)
            .map(|e| SessionEvent {
                product_id: e.product_id,
                event_type: e.event_type,
                category: inner
                    .products
                    .iter()
                    .find(|p| p.id == e.product_id)
                    .and_then(|p| p.category.clone()),
            })
            .collect();
        Ok(events)
    }

    async fn engagement_by_product(&self) -> AppResult<HashMap<i64, EngagementCounts>> {
        let inner = self.inner.read().await;
        let mut engagement: HashMap<i64, EngagementCounts> = HashMap::new();
        for event in &inner.events {
            engagement
                .entry(event.product_id)
                .or_default()
                .bump(event.event_type);
        }
        Ok(engagement)
    }

    async fn record(&self, event: NewEvent) -> AppResult<Event> {
        let mut inner = self.inner.write().await;
        inner.next_event_id += 1;
        let stored = Event {
            id: inner.next_event_id,
            session_id: event.session_id,
            user_id: event.user_id,
            product_id: event.product_id,
            event_type: event.event_type,
            created_at: Utc::now(),
        };
        inner.events.push(stored.clone());
        Ok(stored)
    }

    async fn recent_events(&self, limit: i64) -> AppResult<Vec<EventWithProduct>> {
        let inner = self.inner.read().await;
        let events = inner
            .events
            .iter()
            .rev()
            .take(limit.max(0) as usize)
            .map(|e| {
                let product = inner.products.iter().find(|p| p.id == e.product_id);
                EventWithProduct {
                    id: e.id,
                    session_id: e.session_id.clone(),
                    event_type: e.event_type,
                    created_at: e.created_at,
                    product_sku: product.map(|p| p.sku.clone()),
                    product_name: product.map(|p| p.name.clone()),
                }
            })
            .collect();
        Ok(events)
    }
}

#[async_trait]
impl ProductCatalog for InMemoryStore {
    async fn find(&self, product_id: i64) -> AppResult<Option<Product>> {
        let inner = self.inner.read().await;
        Ok(inner.products.iter().find(|p| p.id == product_id).cloned())
    }

    async fn all_products(&self) -> AppResult<Vec<Product>> {
        let inner = self.inner.read().await;
        Ok(inner.products.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, category: Option<&str>) -> Product {
        Product {
            id,
            sku: format!("SKU-{id}"),
            name: format!("Product {id}"),
            category: category.map(str::to_string),
            price_cents: Some(1000),
            image_url: None,
        }
    }

    #[tokio::test]
    async fn session_history_is_newest_first_and_capped() {
        let store = InMemoryStore::new();
        store.add_product(product(1, Some("hoodies"))).await;
        store.add_product(product(2, None)).await;

        for _ in 0..5 {
            store.add_event("s1", 1, EventType::View).await;
        }
        store.add_event("s1", 2, EventType::Click).await;
        store.add_event("other", 1, EventType::AddToCart).await;

        let history = store.recent_session_events("s1", 3).await.unwrap();
        assert_eq!(history.len(), 3);
        // Newest event for s1 is the click on the uncategorized product.
        assert_eq!(history[0].product_id, 2);
        assert_eq!(history[0].event_type, EventType::Click);
        assert_eq!(history[0].category, None);
        assert_eq!(history[1].category.as_deref(), Some("hoodies"));
    }

    #[tokio::test]
    async fn unknown_session_yields_empty_history() {
        let store = InMemoryStore::new();
        let history = store.recent_session_events("nope", 20).await.unwrap();
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn engagement_tallies_per_product() {
        let store = InMemoryStore::new();
        store.add_event("a", 1, EventType::View).await;
        store.add_event("b", 1, EventType::AddToCart).await;
        store.add_event("a", 2, EventType::Click).await;

        let engagement = store.engagement_by_product().await.unwrap();
        assert_eq!(engagement[&1].views, 1);
        assert_eq!(engagement[&1].add_to_carts, 1);
        assert_eq!(engagement[&2].clicks, 1);
        assert!(!engagement.contains_key(&3));
    }
}
