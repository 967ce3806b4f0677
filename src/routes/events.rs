use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::models::{Event, EventType, NewEvent};
use crate::state::AppState;

/// Event payload as sent by the storefront and the widget
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectEventRequest {
    pub session_id: Option<String>,
    pub user_id: Option<String>,
    pub product_id: Option<i64>,
    pub event_type: Option<String>,
}

impl CollectEventRequest {
    fn validate(self) -> AppResult<NewEvent> {
        let session_id = self
            .session_id
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::InvalidInput("sessionId is required".to_string()))?;

        let product_id = match self.product_id {
            Some(id) if id > 0 => id,
            _ => {
                return Err(AppError::InvalidInput(
                    "productId must be a positive integer".to_string(),
                ))
            }
        };

        let event_type = self
            .event_type
            .as_deref()
            .and_then(EventType::parse)
            .ok_or_else(|| {
                AppError::InvalidInput(
                    "eventType must be one of: view, click, add_to_cart".to_string(),
                )
            })?;

        let user_id = self
            .user_id
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(NewEvent {
            session_id,
            user_id,
            product_id,
            event_type,
        })
    }
}

/// Ingests one interaction event from the storefront or the widget
pub async fn collect(
    State(state): State<AppState>,
    Json(body): Json<CollectEventRequest>,
) -> AppResult<(StatusCode, Json<Event>)> {
    let event = state.events.record(body.validate()?).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> CollectEventRequest {
        CollectEventRequest {
            session_id: Some("sess-1".to_string()),
            user_id: None,
            product_id: Some(3),
            event_type: Some("click".to_string()),
        }
    }

    #[test]
    fn accepts_a_well_formed_payload() {
        let event = valid().validate().unwrap();
        assert_eq!(event.session_id, "sess-1");
        assert_eq!(event.product_id, 3);
        assert_eq!(event.event_type, EventType::Click);
    }

    #[test]
    fn rejects_missing_session_id() {
        let request = CollectEventRequest {
            session_id: None,
            ..valid()
        };
        assert!(matches!(request.validate(), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn rejects_unknown_event_type() {
        let request = CollectEventRequest {
            event_type: Some("purchase".to_string()),
            ..valid()
        };
        assert!(matches!(request.validate(), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn rejects_non_positive_product_id() {
        let request = CollectEventRequest {
            product_id: Some(-1),
            ..valid()
        };
        assert!(matches!(request.validate(), Err(AppError::InvalidInput(_))));
    }
}
