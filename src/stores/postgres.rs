use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::error::{AppError, AppResult};
use crate::models::{EngagementCounts, Event, EventType, EventWithProduct, NewEvent, Product, SessionEvent};

use super::{EventStore, ProductCatalog};

/// Event log backed by the `events` table
#[derive(Clone)]
pub struct PgEventStore {
    pool: PgPool,
}

impl PgEventStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Product catalog backed by the `products` table
#[derive(Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn event_type_from_row(raw: &str) -> AppResult<EventType> {
    EventType::parse(raw)
        .ok_or_else(|| AppError::Internal(format!("unrecognized event type in store: {raw}")))
}

fn product_from_row(row: &PgRow) -> AppResult<Product> {
    Ok(Product {
        id: row.try_get("id")?,
        sku: row.try_get("sku")?,
        name: row.try_get("name")?,
        category: row.try_get("category")?,
        price_cents: row.try_get("price_cents")?,
        image_url: row.try_get("image_url")?,
    })
}

#[async_trait]
impl EventStore for PgEventStore {
    async fn recent_session_events(
        &self,
        session_id: &str,
        n: usize,
    ) -> AppResult<Vec<SessionEvent>> {
        let rows = sqlx::query(
            r#"
            SELECT e.product_id, e.event_type, p.category
            FROM events e
            LEFT JOIN products p ON p.id = e.product_id
            WHERE e.session_id = $1
            ORDER BY e.created_at DESC, e.id DESC
            LIMIT $2
            "#,
        )
        .bind(session_id)
        .bind(n as i64)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                let raw: String = row.try_get("event_type")?;
                Ok(SessionEvent {
                    product_id: row.try_get("product_id")?,
                    event_type: event_type_from_row(&raw)?,
                    category: row.try_get("category")?,
                })
            })
            .collect()
    }

    async fn engagement_by_product(&self) -> AppResult<HashMap<i64, EngagementCounts>> {
        let rows = sqlx::query(
            r#"
            SELECT
                product_id,
                COUNT(*) FILTER (WHERE event_type = 'view')        AS views,
                COUNT(*) FILTER (WHERE event_type = 'click')       AS clicks,
                COUNT(*) FILTER (WHERE event_type = 'add_to_cart') AS add_to_carts
            FROM events
            GROUP BY product_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut engagement = HashMap::with_capacity(rows.len());
        for row in &rows {
            let product_id: i64 = row.try_get("product_id")?;
            let views: i64 = row.try_get("views")?;
            let clicks: i64 = row.try_get("clicks")?;
            let add_to_carts: i64 = row.try_get("add_to_carts")?;
            engagement.insert(
                product_id,
                EngagementCounts {
                    views: views as u64,
                    clicks: clicks as u64,
                    add_to_carts: add_to_carts as u64,
                },
            );
        }
        Ok(engagement)
    }

    async fn record(&self, event: NewEvent) -> AppResult<Event> {
        let row = sqlx::query(
            r#"
            INSERT INTO events (session_id, user_id, product_id, event_type)
            VALUES ($1, $2, $3, $4)
            RETURNING id, session_id, user_id, product_id, event_type, created_at
            "#,
        )
        .bind(&event.session_id)
        .bind(&event.user_id)
        .bind(event.product_id)
        .bind(event.event_type.as_str())
        .fetch_one(&self.pool)
        .await?;

        let raw: String = row.try_get("event_type")?;
        Ok(Event {
            id: row.try_get("id")?,
            session_id: row.try_get("session_id")?,
            user_id: row.try_get("user_id")?,
            product_id: row.try_get("product_id")?,
            event_type: event_type_from_row(&raw)?,
            created_at: row.try_get("created_at")?,
        })
    }

    async fn recent_events(&self, limit: i64) -> AppResult<Vec<EventWithProduct>> {
        let rows = sqlx::query(
            r#"
            SELECT
                e.id,
                e.session_id,
                e.event_type,
                e.created_at,
                p.sku  AS product_sku,
                p.name AS product_name
            FROM events e
            LEFT JOIN products p ON p.id = e.product_id
            ORDER BY e.created_at DESC, e.id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                let raw: String = row.try_get("event_type")?;
                Ok(EventWithProduct {
                    id: row.try_get("id")?,
                    session_id: row.try_get("session_id")?,
                    event_type: event_type_from_row(&raw)?,
                    created_at: row.try_get("created_at")?,
                    product_sku: row.try_get("product_sku")?,
                    product_name: row.try_get("product_name")?,
                })
            })
            .collect()
    }
}

#[async_trait]
impl ProductCatalog for PgCatalog {
    async fn find(&self, product_id: i64) -> AppResult<Option<Product>> {
        let row = sqlx::query(
            r#"
            SELECT id, sku, name, category, price_cents, image_url
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(product_from_row).transpose()
    }

    async fn all_products(&self) -> AppResult<Vec<Product>> {
        let rows = sqlx::query(
            r#"
            SELECT id, sku, name, category, price_cents, image_url
            FROM products
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(product_from_row).collect()
    }
}
