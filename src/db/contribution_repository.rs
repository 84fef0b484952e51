// src/db/contribution_repository.rs
// DOCUMENTATION: Contribution database operations
// PURPOSE: CRUD and due-date lookups for contributions

use crate::errors::PortalError;
use crate::models::patch::split;
use crate::models::{Contribution, CreateContributionRequest, UpdateContributionRequest};
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct ContributionRepository;

impl ContributionRepository {
    /// Create a new contribution
    /// DOCUMENTATION: Fails with ForeignKeyViolation when created_by is not a user
    pub async fn create(
        pool: &PgPool,
        req: &CreateContributionRequest,
    ) -> Result<Contribution, PortalError> {
        req.validate()?;

        let contribution = sqlx::query_as::<_, Contribution>(
            r#"
            INSERT INTO contributions (id, title, description, amount, due_date, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&req.title)
        .bind(&req.description)
        .bind(req.amount)
        .bind(req.due_date)
        .bind(req.created_by)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to create contribution: {}", e);
            PortalError::from(e)
        })?;

        log::info!("Created contribution with id: {}", contribution.id);
        Ok(contribution)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Contribution>, PortalError> {
        let contribution =
            sqlx::query_as::<_, Contribution>("SELECT * FROM contributions WHERE id = $1")
                .bind(id)
                .fetch_optional(pool)
                .await
                .map_err(|e| {
                    log::error!("Failed to fetch contribution {}: {}", id, e);
                    PortalError::from(e)
                })?;

        Ok(contribution)
    }

    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Contribution, PortalError> {
        Self::find_by_id(pool, id)
            .await?
            .ok_or_else(|| PortalError::NotFound(format!("contribution {}", id)))
    }

    pub async fn list_all(pool: &PgPool) -> Result<Vec<Contribution>, PortalError> {
        let contributions = sqlx::query_as::<_, Contribution>(
            "SELECT * FROM contributions ORDER BY created_at DESC",
        )
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to list contributions: {}", e);
            PortalError::from(e)
        })?;

        Ok(contributions)
    }

    pub async fn list_by_creator(
        pool: &PgPool,
        created_by: Uuid,
    ) -> Result<Vec<Contribution>, PortalError> {
        let contributions = sqlx::query_as::<_, Contribution>(
            r#"
            SELECT * FROM contributions
            WHERE created_by = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(created_by)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to list contributions for {}: {}", created_by, e);
            PortalError::from(e)
        })?;

        Ok(contributions)
    }

    /// Contributions due on or before `date`, earliest first
    pub async fn list_due_before(
        pool: &PgPool,
        date: NaiveDate,
    ) -> Result<Vec<Contribution>, PortalError> {
        let contributions = sqlx::query_as::<_, Contribution>(
            r#"
            SELECT * FROM contributions
            WHERE due_date <= $1
            ORDER BY due_date ASC
            "#,
        )
        .bind(date)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to list contributions due before {}: {}", date, e);
            PortalError::from(e)
        })?;

        Ok(contributions)
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: UpdateContributionRequest,
    ) -> Result<Contribution, PortalError> {
        if req.is_empty() {
            return Err(PortalError::NoUpdateFields);
        }
        req.validate()?;

        let (description_set, description) = split(req.description);

        let contribution = sqlx::query_as::<_, Contribution>(
            r#"
            UPDATE contributions
            SET title = COALESCE($2, title),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                amount = COALESCE($5, amount),
                due_date = COALESCE($6, due_date),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(req.title)
        .bind(description_set)
        .bind(description)
        .bind(req.amount)
        .bind(req.due_date)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to update contribution {}: {}", id, e);
            PortalError::from(e)
        })?
        .ok_or_else(|| PortalError::NotFound(format!("contribution {}", id)))?;

        Ok(contribution)
    }

    /// Delete a contribution together with its payments
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), PortalError> {
        let result = sqlx::query("DELETE FROM contributions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to delete contribution {}: {}", id, e);
                PortalError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(PortalError::NotFound(format!("contribution {}", id)));
        }

        log::info!("Deleted contribution {}", id);
        Ok(())
    }
}
