// Shared helpers for the PostgreSQL-backed integration tests.
// These tests are ignored by default; see `test_pool`.

#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use community_portal_db::db::{ContributionRepository, UserRepository};
use community_portal_db::models::{Contribution, CreateContributionRequest, CreateUserRequest, User};
use community_portal_db::run_migrations;
use rust_decimal::Decimal;
use sqlx::postgres::{PgPool, PgPoolOptions};
use uuid::Uuid;

/// Connect to DATABASE_URL and bring the schema up to date.
/// The database tests are `#[ignore]`d; run them with
/// `DATABASE_URL=postgres://... cargo test -- --ignored`.
pub async fn test_pool() -> PgPool {
    let url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must point at a PostgreSQL database for --ignored tests");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("DATABASE_URL is set but unreachable");

    run_migrations(&pool).await.expect("migrations apply");
    pool
}

pub fn user_request(tag: &str) -> CreateUserRequest {
    CreateUserRequest {
        fullname: format!("Test {}", tag),
        email: format!("{}-{}@example.org", tag, Uuid::new_v4().simple()),
        password_hash: "$2b$12$abcdefghijklmnopqrstuv".to_string(),
        phone: None,
        dob: None,
        photo_url: None,
        user_role: None,
        is_active: None,
    }
}

pub async fn create_user(pool: &PgPool, tag: &str) -> User {
    UserRepository::create(pool, &user_request(tag), Duration::hours(24))
        .await
        .expect("user created")
}

pub async fn create_contribution(pool: &PgPool, created_by: Uuid) -> Contribution {
    ContributionRepository::create(
        pool,
        &CreateContributionRequest {
            created_by,
            title: "Monthly dues".to_string(),
            description: Some("Covers hall rental".to_string()),
            amount: Decimal::new(2500, 2),
            due_date: NaiveDate::from_ymd_opt(2030, 1, 31).expect("valid date"),
        },
    )
    .await
    .expect("contribution created")
}
