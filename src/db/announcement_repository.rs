// src/db/announcement_repository.rs

use crate::errors::PortalError;
use crate::models::patch::split;
use crate::models::{Announcement, CreateAnnouncementRequest, UpdateAnnouncementRequest};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct AnnouncementRepository;

impl AnnouncementRepository {
    pub async fn create(
        pool: &PgPool,
        req: &CreateAnnouncementRequest,
    ) -> Result<Announcement, PortalError> {
        req.validate()?;

        let announcement = sqlx::query_as::<_, Announcement>(
            r#"
            INSERT INTO announcements (id, title, body, posted_by)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&req.title)
        .bind(&req.body)
        .bind(req.posted_by)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to create announcement: {}", e);
            PortalError::from(e)
        })?;

        log::info!("Created announcement with id: {}", announcement.id);
        Ok(announcement)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Announcement>, PortalError> {
        let announcement =
            sqlx::query_as::<_, Announcement>("SELECT * FROM announcements WHERE id = $1")
                .bind(id)
                .fetch_optional(pool)
                .await
                .map_err(|e| {
                    log::error!("Failed to fetch announcement {}: {}", id, e);
                    PortalError::from(e)
                })?;

        Ok(announcement)
    }

    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Announcement, PortalError> {
        Self::find_by_id(pool, id)
            .await?
            .ok_or_else(|| PortalError::NotFound(format!("announcement {}", id)))
    }

    pub async fn list_all(pool: &PgPool) -> Result<Vec<Announcement>, PortalError> {
        let announcements = sqlx::query_as::<_, Announcement>(
            "SELECT * FROM announcements ORDER BY created_at DESC",
        )
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to list announcements: {}", e);
            PortalError::from(e)
        })?;

        Ok(announcements)
    }

    pub async fn list_by_poster(
        pool: &PgPool,
        posted_by: Uuid,
    ) -> Result<Vec<Announcement>, PortalError> {
        let announcements = sqlx::query_as::<_, Announcement>(
            "SELECT * FROM announcements WHERE posted_by = $1 ORDER BY created_at DESC",
        )
        .bind(posted_by)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to list announcements for {}: {}", posted_by, e);
            PortalError::from(e)
        })?;

        Ok(announcements)
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: UpdateAnnouncementRequest,
    ) -> Result<Announcement, PortalError> {
        if req.is_empty() {
            return Err(PortalError::NoUpdateFields);
        }
        req.validate()?;

        let (body_set, body) = split(req.body);

        let announcement = sqlx::query_as::<_, Announcement>(
            r#"
            UPDATE announcements
            SET title = COALESCE($2, title),
                body = CASE WHEN $3 THEN $4 ELSE body END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(req.title)
        .bind(body_set)
        .bind(body)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to update announcement {}: {}", id, e);
            PortalError::from(e)
        })?
        .ok_or_else(|| PortalError::NotFound(format!("announcement {}", id)))?;

        Ok(announcement)
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), PortalError> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to delete announcement {}: {}", id, e);
                PortalError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(PortalError::NotFound(format!("announcement {}", id)));
        }

        Ok(())
    }
}
