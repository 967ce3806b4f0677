//! Candidate category selection: which categories the ranker should favor,
//! in what order, and under which strategy label.

use std::collections::HashMap;

use serde::Serialize;

/// Which ranking path produced a result set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    TrendingOnly,
    CategoryAndTrending,
}

/// Outcome of category selection, primary category first
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySelection {
    pub categories_used: Vec<String>,
    pub strategy: Strategy,
}

/// Derives the ordered category list for a request.
///
/// The current product's category (when it resolved to one) leads. The rest
/// come from the affinity scores, highest first; score ties break on
/// category name ascending so the outcome is stable across runs. One extra
/// slot with a primary category, two without.
pub fn select_categories(
    scores: &HashMap<String, u32>,
    primary: Option<&str>,
) -> CategorySelection {
    let mut ranked: Vec<(&str, u32)> = scores
        .iter()
        .filter(|(name, _)| primary != Some(name.as_str()))
        .map(|(name, score)| (name.as_str(), *score))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let extras = if primary.is_some() { 1 } else { 2 };

    let mut categories_used: Vec<String> = primary.map(str::to_string).into_iter().collect();
    categories_used.extend(ranked.into_iter().take(extras).map(|(name, _)| name.to_string()));

    let strategy = if categories_used.is_empty() {
        Strategy::TrendingOnly
    } else {
        Strategy::CategoryAndTrending
    };

    CategorySelection {
        categories_used,
        strategy,
    }
}
