// src/models/event.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// A scheduled community event
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub starts_at: DateTime<Utc>,
    pub posted_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateEventRequest {
    pub posted_by: Uuid,

    #[validate(length(min = 1, max = 255))]
    pub title: String,

    pub starts_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,

    pub starts_at: Option<DateTime<Utc>>,
}

impl UpdateEventRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.starts_at.is_none()
    }
}

impl Event {
    pub fn has_started(&self, now: DateTime<Utc>) -> bool {
        self.starts_at <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_has_started() {
        let now = Utc::now();
        let event = Event {
            id: Uuid::new_v4(),
            title: "Town hall".to_string(),
            starts_at: now + Duration::hours(2),
            posted_by: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        };

        assert!(!event.has_started(now));
        assert!(event.has_started(now + Duration::hours(2)));
    }

    #[test]
    fn test_update_request() {
        assert!(UpdateEventRequest::default().is_empty());

        let req = UpdateEventRequest {
            title: Some("x".repeat(256)),
            starts_at: None,
        };
        assert!(req.validate().is_err());
    }
}
