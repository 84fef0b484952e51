// src/db/photo_repository.rs
// DOCUMENTATION: Photo database operations
// PURPOSE: Handle CRUD operations for member photos, optionally tied to events

use crate::errors::PortalError;
use crate::models::patch::split;
use crate::models::{CreatePhotoRequest, Photo, UpdatePhotoRequest};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct PhotoRepository;

impl PhotoRepository {
    /// Create a new photo
    /// DOCUMENTATION: event_id is optional; when given it must reference an event
    pub async fn create(pool: &PgPool, req: &CreatePhotoRequest) -> Result<Photo, PortalError> {
        req.validate()?;

        let photo = sqlx::query_as::<_, Photo>(
            r#"
            INSERT INTO photos (id, caption, url, event_id, posted_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&req.caption)
        .bind(&req.url)
        .bind(req.event_id)
        .bind(req.posted_by)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to create photo: {}", e);
            PortalError::from(e)
        })?;

        Ok(photo)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Photo>, PortalError> {
        let photo = sqlx::query_as::<_, Photo>("SELECT * FROM photos WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to fetch photo {}: {}", id, e);
                PortalError::from(e)
            })?;

        Ok(photo)
    }

    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Photo, PortalError> {
        Self::find_by_id(pool, id)
            .await?
            .ok_or_else(|| PortalError::NotFound(format!("photo {}", id)))
    }

    pub async fn list_all(pool: &PgPool) -> Result<Vec<Photo>, PortalError> {
        let photos = sqlx::query_as::<_, Photo>("SELECT * FROM photos ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to list photos: {}", e);
                PortalError::from(e)
            })?;

        Ok(photos)
    }

    /// Get photos for an event
    pub async fn list_by_event(pool: &PgPool, event_id: Uuid) -> Result<Vec<Photo>, PortalError> {
        let photos = sqlx::query_as::<_, Photo>(
            r#"
            SELECT * FROM photos
            WHERE event_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(event_id)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to fetch photos for event {}: {}", event_id, e);
            PortalError::from(e)
        })?;

        Ok(photos)
    }

    pub async fn list_by_poster(pool: &PgPool, posted_by: Uuid) -> Result<Vec<Photo>, PortalError> {
        let photos = sqlx::query_as::<_, Photo>(
            r#"
            SELECT * FROM photos
            WHERE posted_by = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(posted_by)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to fetch photos posted by {}: {}", posted_by, e);
            PortalError::from(e)
        })?;

        Ok(photos)
    }

    /// Partial update
    /// DOCUMENTATION: Fields left as None keep their stored value;
    /// Some(None) clears the column. The merge runs inside a single UPDATE.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: UpdatePhotoRequest,
    ) -> Result<Photo, PortalError> {
        if req.is_empty() {
            return Err(PortalError::NoUpdateFields);
        }
        req.validate()?;

        let (caption_set, caption) = split(req.caption);
        let (url_set, url) = split(req.url);
        let (event_set, event_id) = split(req.event_id);

        let photo = sqlx::query_as::<_, Photo>(
            r#"
            UPDATE photos
            SET caption = CASE WHEN $2 THEN $3 ELSE caption END,
                url = CASE WHEN $4 THEN $5 ELSE url END,
                event_id = CASE WHEN $6 THEN $7 ELSE event_id END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(caption_set)
        .bind(caption)
        .bind(url_set)
        .bind(url)
        .bind(event_set)
        .bind(event_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to update photo {}: {}", id, e);
            PortalError::from(e)
        })?
        .ok_or_else(|| PortalError::NotFound(format!("photo {}", id)))?;

        Ok(photo)
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), PortalError> {
        let result = sqlx::query("DELETE FROM photos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to delete photo {}: {}", id, e);
                PortalError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(PortalError::NotFound(format!("photo {}", id)));
        }

        Ok(())
    }
}
