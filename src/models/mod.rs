pub mod event;
pub mod product;

pub use event::{EngagementCounts, Event, EventType, EventWithProduct, NewEvent, SessionEvent};
pub use product::Product;
