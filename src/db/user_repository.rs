// src/db/user_repository.rs
// DOCUMENTATION: User database operations
// PURPOSE: CRUD plus email-verification and activation state for members

use crate::errors::PortalError;
use crate::models::patch::split;
use crate::models::{CreateUserRequest, UpdateUserRequest, User};
use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

fn verification_expiry(ttl: Duration) -> Result<DateTime<Utc>, PortalError> {
    Utc::now()
        .checked_add_signed(ttl)
        .ok_or_else(|| PortalError::InvalidInput(format!("verification TTL {} is out of range", ttl)))
}

pub struct UserRepository;

impl UserRepository {
    /// Create a new user
    /// DOCUMENTATION: Issues a fresh verification code valid for `verification_ttl`.
    /// Email uniqueness is enforced by the users_email_key index.
    /// `password_hash` must already be hashed by the caller; it is stored verbatim.
    pub async fn create(
        pool: &PgPool,
        req: &CreateUserRequest,
        verification_ttl: Duration,
    ) -> Result<User, PortalError> {
        req.validate()?;

        let code = User::generate_verification_code();
        let expires_at = verification_expiry(verification_ttl)?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (
                id, fullname, email, password_hash, phone, dob, photo_url,
                user_role, email_verification_code, email_verification_expires_at,
                is_email_verified, is_active
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, FALSE, $11)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&req.fullname)
        .bind(&req.email)
        .bind(&req.password_hash)
        .bind(&req.phone)
        .bind(req.dob)
        .bind(&req.photo_url)
        .bind(req.user_role.unwrap_or_default())
        .bind(&code)
        .bind(expires_at)
        .bind(req.is_active.unwrap_or(false))
        .fetch_one(pool)
        .await
        .map_err(|e| match PortalError::from(e) {
            PortalError::AlreadyExists(constraint) if constraint == EMAIL_UNIQUE_CONSTRAINT => {
                log::warn!("Rejected duplicate email: {}", req.email);
                PortalError::AlreadyExists(format!("email {}", req.email))
            }
            other => {
                log::error!("Failed to create user: {}", other);
                other
            }
        })?;

        log::info!("Created user with id: {}", user.id);
        Ok(user)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, PortalError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to fetch user {}: {}", id, e);
                PortalError::from(e)
            })?;

        Ok(user)
    }

    /// Like find_by_id, but a missing row is an error
    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<User, PortalError> {
        Self::find_by_id(pool, id)
            .await?
            .ok_or_else(|| PortalError::NotFound(format!("user {}", id)))
    }

    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, PortalError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to fetch user by email: {}", e);
                PortalError::from(e)
            })?;

        Ok(user)
    }

    pub async fn find_by_verification_code(
        pool: &PgPool,
        code: &str,
    ) -> Result<Option<User>, PortalError> {
        let user =
            sqlx::query_as::<_, User>("SELECT * FROM users WHERE email_verification_code = $1")
                .bind(code)
                .fetch_optional(pool)
                .await
                .map_err(|e| {
                    log::error!("Failed to fetch user by verification code: {}", e);
                    PortalError::from(e)
                })?;

        Ok(user)
    }

    /// All users, newest first
    pub async fn list_all(pool: &PgPool) -> Result<Vec<User>, PortalError> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to list users: {}", e);
                PortalError::from(e)
            })?;

        Ok(users)
    }

    /// Active users, served by idx_users_is_active
    pub async fn list_active(pool: &PgPool) -> Result<Vec<User>, PortalError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE is_active = TRUE ORDER BY created_at DESC",
        )
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to list active users: {}", e);
            PortalError::from(e)
        })?;

        Ok(users)
    }

    /// Partial profile update
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: UpdateUserRequest,
    ) -> Result<User, PortalError> {
        if req.is_empty() {
            return Err(PortalError::NoUpdateFields);
        }
        req.validate()?;

        let (phone_set, phone) = split(req.phone);
        let (dob_set, dob) = split(req.dob);
        let (photo_set, photo_url) = split(req.photo_url);

        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET fullname = COALESCE($2, fullname),
                phone = CASE WHEN $3 THEN $4 ELSE phone END,
                dob = CASE WHEN $5 THEN $6 ELSE dob END,
                photo_url = CASE WHEN $7 THEN $8 ELSE photo_url END,
                user_role = COALESCE($9, user_role),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(req.fullname)
        .bind(phone_set)
        .bind(phone)
        .bind(dob_set)
        .bind(dob)
        .bind(photo_set)
        .bind(photo_url)
        .bind(req.user_role)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to update user {}: {}", id, e);
            PortalError::from(e)
        })?
        .ok_or_else(|| PortalError::NotFound(format!("user {}", id)))?;

        Ok(user)
    }

    /// Consume a verification code
    /// DOCUMENTATION: Marks the email verified and clears the code and expiry
    pub async fn verify_email(pool: &PgPool, code: &str) -> Result<User, PortalError> {
        let user = Self::find_by_verification_code(pool, code)
            .await?
            .ok_or(PortalError::InvalidVerificationCode)?;

        if user.is_verification_expired(Utc::now()) {
            return Err(PortalError::VerificationCodeExpired);
        }

        let verified = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET is_email_verified = TRUE,
                email_verification_code = NULL,
                email_verification_expires_at = NULL,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(user.id)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to verify email for user {}: {}", user.id, e);
            PortalError::from(e)
        })?;

        log::info!("Email verified for user: {}", verified.id);
        Ok(verified)
    }

    /// Issue a new verification code for an unverified user.
    /// Already-verified users are returned unchanged.
    pub async fn regenerate_verification_code(
        pool: &PgPool,
        email: &str,
        verification_ttl: Duration,
    ) -> Result<User, PortalError> {
        let user = Self::find_by_email(pool, email)
            .await?
            .ok_or_else(|| PortalError::NotFound(format!("user with email {}", email)))?;

        if user.is_email_verified {
            return Ok(user);
        }

        let expires_at = verification_expiry(verification_ttl)?;

        let updated = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET email_verification_code = $2,
                email_verification_expires_at = $3,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(user.id)
        .bind(User::generate_verification_code())
        .bind(expires_at)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to regenerate verification code: {}", e);
            PortalError::from(e)
        })?;

        Ok(updated)
    }

    pub async fn set_active(pool: &PgPool, id: Uuid, is_active: bool) -> Result<User, PortalError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET is_active = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(is_active)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to set active flag for user {}: {}", id, e);
            PortalError::from(e)
        })?
        .ok_or_else(|| PortalError::NotFound(format!("user {}", id)))?;

        log::info!("User {} active status set to {}", id, user.is_active);
        Ok(user)
    }

    /// Flip is_active in a single statement
    pub async fn toggle_active(pool: &PgPool, id: Uuid) -> Result<User, PortalError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET is_active = NOT is_active, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to toggle user {}: {}", id, e);
            PortalError::from(e)
        })?
        .ok_or_else(|| PortalError::NotFound(format!("user {}", id)))?;

        log::info!("User {} active status toggled to {}", id, user.is_active);
        Ok(user)
    }

    /// Delete a user
    /// DOCUMENTATION: Cascades to the user's contributions, payments, events,
    /// photos and announcements
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), PortalError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to delete user {}: {}", id, e);
                PortalError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(PortalError::NotFound(format!("user {}", id)));
        }

        log::info!("Deleted user {}", id);
        Ok(())
    }
}
