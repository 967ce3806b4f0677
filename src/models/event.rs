use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of interaction recorded by the storefront or the widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    View,
    Click,
    AddToCart,
}

impl EventType {
    /// Parses the wire representation (`view`, `click`, `add_to_cart`),
    /// tolerating mixed case. Returns `None` for anything else.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "view" => Some(EventType::View),
            "click" => Some(EventType::Click),
            "add_to_cart" => Some(EventType::AddToCart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::View => "view",
            EventType::Click => "click",
            EventType::AddToCart => "add_to_cart",
        }
    }
}

/// A stored interaction event, as returned after ingestion
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub session_id: String,
    pub user_id: Option<String>,
    pub product_id: i64,
    pub event_type: EventType,
    pub created_at: DateTime<Utc>,
}

/// A validated, not-yet-stored event from the collection endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub session_id: String,
    pub user_id: Option<String>,
    pub product_id: i64,
    pub event_type: EventType,
}

/// One entry of a session's history window: the event plus the category of
/// the product it touched, when that product has one. Events whose product
/// lacks a category still occupy their slot in the window.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionEvent {
    pub product_id: i64,
    pub event_type: EventType,
    pub category: Option<String>,
}

/// Admin feed row: an event joined with the product it refers to
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventWithProduct {
    pub id: i64,
    pub session_id: String,
    pub event_type: EventType,
    pub created_at: DateTime<Utc>,
    pub product_sku: Option<String>,
    pub product_name: Option<String>,
}

/// All-time event tallies for a single product. Weighting happens in the
/// ranking logic, never in the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngagementCounts {
    pub views: u64,
    pub clicks: u64,
    pub add_to_carts: u64,
}

impl EngagementCounts {
    /// Raw number of events, independent of type
    pub fn total(&self) -> u64 {
        self.views + self.clicks + self.add_to_carts
    }

    pub fn bump(&mut self, event_type: EventType) {
        match event_type {
            EventType::View => self.views += 1,
            EventType::Click => self.clicks += 1,
            EventType::AddToCart => self.add_to_carts += 1,
        }
    }
}
