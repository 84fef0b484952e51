mod common;

use community_portal_db::config::{reapply_migrations, run_migrations};
use community_portal_db::db::SchemaRepository;

#[tokio::test]
#[ignore = "needs PostgreSQL at DATABASE_URL"]
async fn test_applying_migrations_twice_is_idempotent() {
    let pool = common::test_pool().await;

    let before = SchemaRepository::snapshot(&pool).await.unwrap();

    tokio_test::assert_ok!(reapply_migrations(&pool).await);
    tokio_test::assert_ok!(run_migrations(&pool).await);

    let after = SchemaRepository::snapshot(&pool).await.unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
#[ignore = "needs PostgreSQL at DATABASE_URL"]
async fn test_enum_domains() {
    let pool = common::test_pool().await;

    let roles = SchemaRepository::enum_labels(&pool, "user_roles").await.unwrap();
    assert_eq!(roles, vec!["superadmin", "admin", "member", "treasurer"]);

    let statuses = SchemaRepository::enum_labels(&pool, "payment_status")
        .await
        .unwrap();
    assert_eq!(statuses, vec!["pending", "verified"]);
}

#[tokio::test]
#[ignore = "needs PostgreSQL at DATABASE_URL"]
async fn test_column_layout() {
    let pool = common::test_pool().await;
    let snapshot = SchemaRepository::snapshot(&pool).await.unwrap();

    for table in ["users", "contributions", "events", "announcements", "photos", "payments"] {
        let id = snapshot.column(table, "id").expect("id column");
        assert_eq!(id.data_type, "uuid", "{}.id", table);
        for ts in ["created_at", "updated_at"] {
            let column = snapshot.column(table, ts).expect("timestamp column");
            assert!(!column.is_nullable, "{}.{}", table, ts);
            assert_eq!(column.data_type, "timestamp with time zone");
        }
    }

    let role = snapshot.column("users", "user_role").unwrap();
    assert_eq!(role.data_type, "user_roles");
    assert!(role.column_default.as_deref().unwrap().contains("'member'"));

    let status = snapshot.column("payments", "status").unwrap();
    assert_eq!(status.data_type, "payment_status");
    assert!(status.column_default.as_deref().unwrap().contains("'verified'"));

    for table in ["contributions", "payments"] {
        let amount = snapshot.column(table, "amount").unwrap();
        assert_eq!(amount.data_type, "numeric(20,9)");
        assert!(!amount.is_nullable);
    }

    assert!(snapshot.column("users", "email_verification_code").unwrap().is_nullable);
    assert!(!snapshot.column("users", "is_email_verified").unwrap().is_nullable);
    assert!(snapshot.column("photos", "url").unwrap().is_nullable);
    assert!(snapshot.column("photos", "event_id").unwrap().is_nullable);
    assert!(!snapshot.column("photos", "posted_by").unwrap().is_nullable);
    assert_eq!(snapshot.column("contributions", "due_date").unwrap().data_type, "date");
    assert_eq!(snapshot.columns_of("users").count(), 14);
}

#[tokio::test]
#[ignore = "needs PostgreSQL at DATABASE_URL"]
async fn test_every_foreign_key_cascades() {
    let pool = common::test_pool().await;
    let snapshot = SchemaRepository::snapshot(&pool).await.unwrap();

    let expected = [
        "announcements_posted_by_fkey",
        "contributions_created_by_fkey",
        "events_posted_by_fkey",
        "payments_contribution_id_fkey",
        "payments_user_id_fkey",
        "photos_event_id_fkey",
        "photos_posted_by_fkey",
    ];

    for name in expected {
        let fk = snapshot
            .foreign_keys
            .iter()
            .find(|fk| fk.constraint_name == name)
            .unwrap_or_else(|| panic!("missing foreign key {}", name));
        assert_eq!(fk.delete_rule, "CASCADE", "{}", name);
    }
}

#[tokio::test]
#[ignore = "needs PostgreSQL at DATABASE_URL"]
async fn test_indexes_present() {
    let pool = common::test_pool().await;
    let snapshot = SchemaRepository::snapshot(&pool).await.unwrap();

    let names: Vec<&str> = snapshot.indexes.iter().map(|i| i.index_name.as_str()).collect();
    for index in [
        "users_email_key",
        "idx_users_is_active",
        "idx_contributions_created_by",
        "idx_payments_user_id",
        "idx_payments_contribution_id",
        "idx_photos_event_id",
    ] {
        assert!(names.contains(&index), "missing index {}", index);
    }
}
