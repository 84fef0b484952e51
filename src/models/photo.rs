// src/models/photo.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::patch::present;

/// A photo posted by a member, optionally attached to an event
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Photo {
    pub id: Uuid,
    pub caption: Option<String>,
    pub url: Option<String>,
    pub event_id: Option<Uuid>,
    pub posted_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a new photo
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePhotoRequest {
    pub posted_by: Uuid,
    pub event_id: Option<Uuid>,

    #[validate(url)]
    pub url: Option<String>,

    #[validate(length(max = 1000))]
    pub caption: Option<String>,
}

/// Partial update; every column is nullable, so each field distinguishes
/// "leave unchanged" (`None`) from "clear" (`Some(None)`)
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdatePhotoRequest {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub event_id: Option<Option<Uuid>>,

    #[validate(url)]
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub url: Option<Option<String>>,

    #[validate(length(max = 1000))]
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub caption: Option<Option<String>>,
}

impl UpdatePhotoRequest {
    pub fn is_empty(&self) -> bool {
        self.event_id.is_none() && self.url.is_none() && self.caption.is_none()
    }
}
