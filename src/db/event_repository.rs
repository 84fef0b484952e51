// src/db/event_repository.rs
// DOCUMENTATION: Event database operations

use crate::errors::PortalError;
use crate::models::{CreateEventRequest, Event, UpdateEventRequest};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct EventRepository;

impl EventRepository {
    pub async fn create(pool: &PgPool, req: &CreateEventRequest) -> Result<Event, PortalError> {
        req.validate()?;

        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (id, title, starts_at, posted_by)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&req.title)
        .bind(req.starts_at)
        .bind(req.posted_by)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to create event: {}", e);
            PortalError::from(e)
        })?;

        log::info!("Created event with id: {}", event.id);
        Ok(event)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Event>, PortalError> {
        let event = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to fetch event {}: {}", id, e);
                PortalError::from(e)
            })?;

        Ok(event)
    }

    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Event, PortalError> {
        Self::find_by_id(pool, id)
            .await?
            .ok_or_else(|| PortalError::NotFound(format!("event {}", id)))
    }

    /// All events in calendar order
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Event>, PortalError> {
        let events = sqlx::query_as::<_, Event>("SELECT * FROM events ORDER BY starts_at ASC")
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to list events: {}", e);
                PortalError::from(e)
            })?;

        Ok(events)
    }

    /// Events starting at or after `now`, soonest first
    pub async fn list_upcoming(pool: &PgPool, now: DateTime<Utc>) -> Result<Vec<Event>, PortalError> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT * FROM events
            WHERE starts_at >= $1
            ORDER BY starts_at ASC
            "#,
        )
        .bind(now)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to list upcoming events: {}", e);
            PortalError::from(e)
        })?;

        Ok(events)
    }

    pub async fn list_by_poster(pool: &PgPool, posted_by: Uuid) -> Result<Vec<Event>, PortalError> {
        let events = sqlx::query_as::<_, Event>(
            "SELECT * FROM events WHERE posted_by = $1 ORDER BY starts_at ASC",
        )
        .bind(posted_by)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to list events for {}: {}", posted_by, e);
            PortalError::from(e)
        })?;

        Ok(events)
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: UpdateEventRequest,
    ) -> Result<Event, PortalError> {
        if req.is_empty() {
            return Err(PortalError::NoUpdateFields);
        }
        req.validate()?;

        // Both columns are NOT NULL, so COALESCE is enough here
        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET title = COALESCE($2, title),
                starts_at = COALESCE($3, starts_at),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&req.title)
        .bind(req.starts_at)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to update event {}: {}", id, e);
            PortalError::from(e)
        })?
        .ok_or_else(|| PortalError::NotFound(format!("event {}", id)))?;

        Ok(event)
    }

    /// Delete an event and the photos attached to it
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), PortalError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to delete event {}: {}", id, e);
                PortalError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(PortalError::NotFound(format!("event {}", id)));
        }

        log::info!("Deleted event {}", id);
        Ok(())
    }
}
