// src/models/payment.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use super::amount::validate_amount;
use super::patch::present;

/// Payment state, stored as the `payment_status` enum.
/// New rows default to verified, matching the column default.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Hash, Default)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    #[default]
    Verified,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Verified => "verified",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(PaymentStatus::Pending),
            "verified" => Ok(PaymentStatus::Verified),
            other => Err(format!("unknown payment status: {}", other)),
        }
    }
}

/// A member's payment towards a contribution
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Payment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub contribution_id: Uuid,
    pub amount: Decimal,
    pub receipt_url: Option<String>,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePaymentRequest {
    pub user_id: Uuid,
    pub contribution_id: Uuid,

    #[validate(custom = "validate_amount")]
    pub amount: Decimal,

    #[validate(url)]
    pub receipt_url: Option<String>,

    /// Omitted means verified
    #[serde(default)]
    pub status: Option<PaymentStatus>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdatePaymentRequest {
    pub user_id: Option<Uuid>,
    pub contribution_id: Option<Uuid>,

    #[validate(custom = "validate_amount")]
    pub amount: Option<Decimal>,

    #[validate(url)]
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub receipt_url: Option<Option<String>>,

    pub status: Option<PaymentStatus>,
}

impl UpdatePaymentRequest {
    pub fn is_empty(&self) -> bool {
        self.user_id.is_none()
            && self.contribution_id.is_none()
            && self.amount.is_none()
            && self.receipt_url.is_none()
            && self.status.is_none()
    }
}
