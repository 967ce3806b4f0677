//! Product ranking: one unified sort over the whole catalog.
//!
//! Category-matched products lead (when any categories are selected), then
//! all-time engagement, then raw event count, then product id. Running a
//! single pass instead of a category query plus a trending fill keeps the
//! result deterministic when a category has fewer matches than the limit.

use std::collections::HashMap;

use crate::models::{EngagementCounts, Product};

/// Weighted all-time engagement for one product: carts count triple,
/// clicks double, views single.
fn engagement_score(counts: &EngagementCounts) -> u64 {
    counts.add_to_carts * 3 + counts.clicks * 2 + counts.views
}

fn sort_key(
    product: &Product,
    engagement: &HashMap<i64, EngagementCounts>,
    categories_used: &[String],
) -> (bool, u64, u64) {
    let counts = engagement.get(&product.id).copied().unwrap_or_default();
    let in_category = product
        .category
        .as_deref()
        .is_some_and(|c| categories_used.iter().any(|used| used == c));
    (in_category, engagement_score(&counts), counts.total())
}

/// Ranks the catalog, drops the current product, cuts to `limit`.
///
/// A catalog smaller than `limit` comes back whole; there is no padding.
pub fn rank_products(
    mut catalog: Vec<Product>,
    engagement: &HashMap<i64, EngagementCounts>,
    categories_used: &[String],
    current_product_id: Option<i64>,
    limit: usize,
) -> Vec<Product> {
    if let Some(current) = current_product_id {
        catalog.retain(|p| p.id != current);
    }

    catalog.sort_by(|a, b| {
        let a_key = sort_key(a, engagement, categories_used);
        let b_key = sort_key(b, engagement, categories_used);
        b_key
            .cmp(&a_key)
            .then_with(|| a.id.cmp(&b.id))
    });

    catalog.truncate(limit);
    catalog
}
