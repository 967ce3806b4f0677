use serde::{Deserialize, Serialize};

/// A catalog product as served to the storefront, widget and admin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub sku: String,
    pub name: String,
    pub category: Option<String>,
    pub price_cents: Option<i64>,
    pub image_url: Option<String>,
}
