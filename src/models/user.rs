// src/models/user.rs
// DOCUMENTATION: Community members and their roles
// PURPOSE: Row mapping for the users table plus create/update DTOs

use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use super::patch::present;

/// Length of generated email verification codes
pub const VERIFICATION_CODE_LENGTH: usize = 32;

/// Role of a member, stored as the `user_roles` enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Hash, Default)]
#[sqlx(type_name = "user_roles", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    SuperAdmin,
    Admin,
    #[default]
    Member,
    Treasurer,
}

impl UserRole {
    pub const ALL: [UserRole; 4] = [
        UserRole::SuperAdmin,
        UserRole::Admin,
        UserRole::Member,
        UserRole::Treasurer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::SuperAdmin => "superadmin",
            UserRole::Admin => "admin",
            UserRole::Member => "member",
            UserRole::Treasurer => "treasurer",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "superadmin" | "super_admin" => Ok(UserRole::SuperAdmin),
            "admin" => Ok(UserRole::Admin),
            "member" => Ok(UserRole::Member),
            "treasurer" => Ok(UserRole::Treasurer),
            other => Err(format!("unknown user role: {}", other)),
        }
    }
}

/// Complete user record from the database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub fullname: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub dob: Option<DateTime<Utc>>,
    pub photo_url: Option<String>,
    pub user_role: UserRole,
    pub email_verification_code: Option<String>,
    pub email_verification_expires_at: Option<DateTime<Utc>>,
    pub is_email_verified: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a new user
/// DOCUMENTATION: `password_hash` is stored as given; hashing happens upstream
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 255))]
    pub fullname: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password_hash: String,

    #[validate(length(max = 32))]
    pub phone: Option<String>,

    pub dob: Option<DateTime<Utc>>,

    #[validate(url)]
    pub photo_url: Option<String>,

    /// Defaults to member
    #[serde(default)]
    pub user_role: Option<UserRole>,

    /// Defaults to inactive
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Partial update of a user's profile
/// DOCUMENTATION: Nullable columns take `Some(None)` to clear
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 255))]
    pub fullname: Option<String>,

    #[validate(length(max = 32))]
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub phone: Option<Option<String>>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub dob: Option<Option<DateTime<Utc>>>,

    #[validate(url)]
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<Option<String>>,

    pub user_role: Option<UserRole>,
}

impl UpdateUserRequest {
    pub fn is_empty(&self) -> bool {
        self.fullname.is_none()
            && self.phone.is_none()
            && self.dob.is_none()
            && self.photo_url.is_none()
            && self.user_role.is_none()
    }
}

/// User DTO without credentials or verification secrets
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub fullname: String,
    pub email: String,
    pub phone: Option<String>,
    pub dob: Option<DateTime<Utc>>,
    pub photo_url: Option<String>,
    pub user_role: UserRole,
    pub is_email_verified: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Random alphanumeric code for the email verification link
    pub fn generate_verification_code() -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(VERIFICATION_CODE_LENGTH)
            .map(char::from)
            .collect()
    }

    /// A code without an expiry never expires
    pub fn is_verification_expired(&self, now: DateTime<Utc>) -> bool {
        self.email_verification_expires_at
            .map(|expires_at| now > expires_at)
            .unwrap_or(false)
    }

    pub fn to_response(&self) -> UserResponse {
        UserResponse {
            id: self.id,
            fullname: self.fullname.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            dob: self.dob,
            photo_url: self.photo_url.clone(),
            user_role: self.user_role,
            is_email_verified: self.is_email_verified,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
