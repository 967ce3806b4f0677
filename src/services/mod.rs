pub mod ranking;
pub mod recommendations;
pub mod scoring;
pub mod selection;

pub use recommendations::{RecommendationOutcome, RecommendationRequest, Recommender, DEFAULT_LIMIT};
pub use selection::Strategy;
