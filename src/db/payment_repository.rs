// src/db/payment_repository.rs
// DOCUMENTATION: Payment database operations
// PURPOSE: Record member payments against contributions

use crate::errors::PortalError;
use crate::models::patch::split;
use crate::models::{CreatePaymentRequest, Payment, PaymentStatus, UpdatePaymentRequest};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct PaymentRepository;

impl PaymentRepository {
    /// Create a new payment
    /// DOCUMENTATION: Both user_id and contribution_id must exist,
    /// otherwise PostgreSQL rejects the row with a foreign-key violation
    pub async fn create(pool: &PgPool, req: &CreatePaymentRequest) -> Result<Payment, PortalError> {
        req.validate()?;

        let payment = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (id, user_id, contribution_id, amount, receipt_url, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(req.user_id)
        .bind(req.contribution_id)
        .bind(req.amount)
        .bind(&req.receipt_url)
        .bind(req.status.unwrap_or_default())
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to create payment: {}", e);
            PortalError::from(e)
        })?;

        log::info!(
            "Created payment {} for contribution {}",
            payment.id,
            payment.contribution_id
        );
        Ok(payment)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Payment>, PortalError> {
        let payment = sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to fetch payment {}: {}", id, e);
                PortalError::from(e)
            })?;

        Ok(payment)
    }

    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Payment, PortalError> {
        Self::find_by_id(pool, id)
            .await?
            .ok_or_else(|| PortalError::NotFound(format!("payment {}", id)))
    }

    pub async fn list_all(pool: &PgPool) -> Result<Vec<Payment>, PortalError> {
        let payments =
            sqlx::query_as::<_, Payment>("SELECT * FROM payments ORDER BY created_at DESC")
                .fetch_all(pool)
                .await
                .map_err(|e| {
                    log::error!("Failed to list payments: {}", e);
                    PortalError::from(e)
                })?;

        Ok(payments)
    }

    /// Every payment made by a user, newest first
    pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Payment>, PortalError> {
        let payments = sqlx::query_as::<_, Payment>(
            r#"
            SELECT * FROM payments
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to list payments for user {}: {}", user_id, e);
            PortalError::from(e)
        })?;

        Ok(payments)
    }

    pub async fn list_by_contribution(
        pool: &PgPool,
        contribution_id: Uuid,
    ) -> Result<Vec<Payment>, PortalError> {
        let payments = sqlx::query_as::<_, Payment>(
            r#"
            SELECT * FROM payments
            WHERE contribution_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(contribution_id)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!(
                "Failed to list payments for contribution {}: {}",
                contribution_id,
                e
            );
            PortalError::from(e)
        })?;

        Ok(payments)
    }

    /// Partial update applied in one statement
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: UpdatePaymentRequest,
    ) -> Result<Payment, PortalError> {
        if req.is_empty() {
            return Err(PortalError::NoUpdateFields);
        }
        req.validate()?;

        let (receipt_set, receipt_url) = split(req.receipt_url);

        let payment = sqlx::query_as::<_, Payment>(
            r#"
            UPDATE payments
            SET user_id = COALESCE($2, user_id),
                contribution_id = COALESCE($3, contribution_id),
                amount = COALESCE($4, amount),
                receipt_url = CASE WHEN $5 THEN $6 ELSE receipt_url END,
                status = COALESCE($7, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(req.user_id)
        .bind(req.contribution_id)
        .bind(req.amount)
        .bind(receipt_set)
        .bind(receipt_url)
        .bind(req.status)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to update payment {}: {}", id, e);
            PortalError::from(e)
        })?
        .ok_or_else(|| PortalError::NotFound(format!("payment {}", id)))?;

        Ok(payment)
    }

    pub async fn set_status(
        pool: &PgPool,
        id: Uuid,
        status: PaymentStatus,
    ) -> Result<Payment, PortalError> {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            UPDATE payments
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to set status of payment {}: {}", id, e);
            PortalError::from(e)
        })?
        .ok_or_else(|| PortalError::NotFound(format!("payment {}", id)))?;

        log::info!("Payment {} marked {}", id, payment.status);
        Ok(payment)
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), PortalError> {
        let result = sqlx::query("DELETE FROM payments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to delete payment {}: {}", id, e);
                PortalError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(PortalError::NotFound(format!("payment {}", id)));
        }

        log::info!("Deleted payment {}", id);
        Ok(())
    }
}
