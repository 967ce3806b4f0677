use std::sync::Arc;

use crate::services::Recommender;
use crate::stores::{EventStore, ProductCatalog};

/// Shared application state: the injected stores plus the engine built on
/// top of them. Cheap to clone per request.
#[derive(Clone)]
pub struct AppState {
    pub events: Arc<dyn EventStore>,
    pub catalog: Arc<dyn ProductCatalog>,
    pub recommender: Arc<Recommender>,
}

impl AppState {
    pub fn new(events: Arc<dyn EventStore>, catalog: Arc<dyn ProductCatalog>) -> Self {
        let recommender = Arc::new(Recommender::new(events.clone(), catalog.clone()));
        Self {
            events,
            catalog,
            recommender,
        }
    }
}
