//! Category affinity scoring over a session's recent history.
//!
//! The window is ordered newest first; an event contributes its base weight
//! plus a recency bonus that fades to zero after the tenth position.

use std::collections::HashMap;

use crate::models::{EventType, SessionEvent};

/// Bonus for the newest event; position `i` earns `max(0, 10 - i)`.
const RECENCY_BONUS_CEILING: u32 = 10;

fn base_weight(event_type: EventType) -> u32 {
    match event_type {
        EventType::View => 1,
        EventType::Click => 5,
        EventType::AddToCart => 8,
    }
}

fn recency_bonus(index: usize) -> u32 {
    RECENCY_BONUS_CEILING.saturating_sub(index as u32)
}

/// Turns an ordered event window (index 0 = most recent) into a score per
/// category. Events without a category contribute nothing but still consume
/// their position in the window. Only categories that actually appeared end
/// up in the map; absent means zero.
pub fn score_categories(events: &[SessionEvent]) -> HashMap<String, u32> {
    let mut scores: HashMap<String, u32> = HashMap::new();
    for (index, event) in events.iter().enumerate() {
        let Some(category) = event.category.as_deref() else {
            continue;
        };
        let points = base_weight(event.event_type) + recency_bonus(index);
        *scores.entry(category.to_string()).or_insert(0) += points;
    }
    scores
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(category: Option<&str>, event_type: EventType) -> SessionEvent {
        SessionEvent {
            product_id: 1,
            event_type,
            category: category.map(str::to_string),
        }
    }

    #[test]
    fn empty_history_scores_nothing() {
        assert!(score_categories(&[]).is_empty());
    }

    #[test]
    fn base_weights_per_event_type() {
        // Pad the window so all three land past the recency bonus range.
        let mut events = vec![event(None, EventType::View); 10];
        events.push(event(Some("sneakers"), EventType::View));
        events.push(event(Some("hoodies"), EventType::Click));
        events.push(event(Some("caps"), EventType::AddToCart));

        let scores = score_categories(&events);
        assert_eq!(scores["sneakers"], 1);
        assert_eq!(scores["hoodies"], 5);
        assert_eq!(scores["caps"], 8);
    }

    #[test]
    fn recency_bonus_fades_with_index() {
        // Same event type everywhere, so differences come from position only.
        let events: Vec<_> = (0..12)
            .map(|i| event(Some(&format!("cat{i}")), EventType::View))
            .collect();

        let scores = score_categories(&events);
        assert_eq!(scores["cat0"], 1 + 10);
        assert_eq!(scores["cat1"], 1 + 9);
        assert_eq!(scores["cat9"], 1 + 1);
        assert_eq!(scores["cat10"], 1);
        assert_eq!(scores["cat11"], 1);
    }

    #[test]
    fn uncategorized_events_consume_window_slots() {
        let events = vec![
            event(None, EventType::AddToCart),
            event(Some("hoodies"), EventType::View),
        ];

        let scores = score_categories(&events);
        // The hoodie view sits at index 1, so its bonus is 9, not 10.
        assert_eq!(scores["hoodies"], 1 + 9);
        assert_eq!(scores.len(), 1);
    }

    #[test]
    fn scores_accumulate_per_category() {
        let events = vec![
            event(Some("hoodies"), EventType::AddToCart),
            event(Some("hoodies"), EventType::Click),
            event(Some("sneakers"), EventType::View),
        ];

        let scores = score_categories(&events);
        assert_eq!(scores["hoodies"], (8 + 10) + (5 + 9));
        assert_eq!(scores["sneakers"], 1 + 8);
    }
}
