// src/models/contribution.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::amount::validate_amount;
use super::patch::present;

/// A dues item members are expected to pay, created by a user
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Contribution {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    /// NUMERIC(20, 9)
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateContributionRequest {
    pub created_by: Uuid,

    #[validate(length(min = 1, max = 255))]
    pub title: String,

    pub description: Option<String>,

    #[validate(custom = "validate_amount")]
    pub amount: Decimal,

    pub due_date: NaiveDate,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateContributionRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,

    #[validate(custom = "validate_amount")]
    pub amount: Option<Decimal>,

    pub due_date: Option<NaiveDate>,
}

impl UpdateContributionRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.amount.is_none()
            && self.due_date.is_none()
    }
}

impl Contribution {
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.due_date < today
    }
}
