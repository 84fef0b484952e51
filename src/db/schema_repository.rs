// src/db/schema_repository.rs
// DOCUMENTATION: Read-only catalog queries
// PURPOSE: Describe the applied schema so it can be reported and compared

use crate::errors::PortalError;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

/// Tables owned by this crate, in migration order
pub const PORTAL_TABLES: [&str; 6] = [
    "users",
    "contributions",
    "events",
    "announcements",
    "photos",
    "payments",
];

/// Enum types owned by this crate
pub const PORTAL_ENUMS: [&str; 2] = ["user_roles", "payment_status"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct ColumnInfo {
    pub table_name: String,
    pub column_name: String,
    pub data_type: String,
    pub is_nullable: bool,
    pub column_default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct IndexInfo {
    pub table_name: String,
    pub index_name: String,
    pub definition: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct ForeignKeyInfo {
    pub constraint_name: String,
    pub delete_rule: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumInfo {
    pub type_name: String,
    pub labels: Vec<String>,
}

/// Everything needed to tell two schemas apart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaSnapshot {
    pub columns: Vec<ColumnInfo>,
    pub indexes: Vec<IndexInfo>,
    pub foreign_keys: Vec<ForeignKeyInfo>,
    pub enums: Vec<EnumInfo>,
}

impl SchemaSnapshot {
    pub fn columns_of<'a>(&'a self, table: &'a str) -> impl Iterator<Item = &'a ColumnInfo> + 'a {
        self.columns.iter().filter(move |c| c.table_name == table)
    }

    pub fn column(&self, table: &str, column: &str) -> Option<&ColumnInfo> {
        self.columns
            .iter()
            .find(|c| c.table_name == table && c.column_name == column)
    }
}

pub struct SchemaRepository;

impl SchemaRepository {
    pub async fn columns(pool: &PgPool) -> Result<Vec<ColumnInfo>, PortalError> {
        let columns = sqlx::query_as::<_, ColumnInfo>(
            r#"
            SELECT table_name::text AS table_name,
                   column_name::text AS column_name,
                   CASE WHEN data_type = 'USER-DEFINED' THEN udt_name::text
                        WHEN data_type = 'numeric'
                            THEN format('numeric(%s,%s)', numeric_precision, numeric_scale)
                        ELSE data_type::text
                   END AS data_type,
                   (is_nullable = 'YES') AS is_nullable,
                   column_default::text AS column_default
            FROM information_schema.columns
            WHERE table_schema = current_schema()
              AND table_name::text = ANY($1)
            ORDER BY table_name, ordinal_position
            "#,
        )
        .bind(PORTAL_TABLES.to_vec())
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to read column catalog: {}", e);
            PortalError::from(e)
        })?;

        Ok(columns)
    }

    pub async fn indexes(pool: &PgPool) -> Result<Vec<IndexInfo>, PortalError> {
        let indexes = sqlx::query_as::<_, IndexInfo>(
            r#"
            SELECT tablename::text AS table_name,
                   indexname::text AS index_name,
                   indexdef AS definition
            FROM pg_indexes
            WHERE schemaname = current_schema()
              AND tablename::text = ANY($1)
            ORDER BY tablename, indexname
            "#,
        )
        .bind(PORTAL_TABLES.to_vec())
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to read index catalog: {}", e);
            PortalError::from(e)
        })?;

        Ok(indexes)
    }

    pub async fn foreign_keys(pool: &PgPool) -> Result<Vec<ForeignKeyInfo>, PortalError> {
        let foreign_keys = sqlx::query_as::<_, ForeignKeyInfo>(
            r#"
            SELECT constraint_name::text AS constraint_name,
                   delete_rule::text AS delete_rule
            FROM information_schema.referential_constraints
            WHERE constraint_schema = current_schema()
            ORDER BY constraint_name
            "#,
        )
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to read foreign key catalog: {}", e);
            PortalError::from(e)
        })?;

        Ok(foreign_keys)
    }

    /// Labels of an enum type in declaration order; empty if the type is absent
    pub async fn enum_labels(pool: &PgPool, type_name: &str) -> Result<Vec<String>, PortalError> {
        let labels: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT e.enumlabel::text
            FROM pg_enum e
            JOIN pg_type t ON t.oid = e.enumtypid
            JOIN pg_namespace n ON n.oid = t.typnamespace
            WHERE t.typname::text = $1 AND n.nspname = current_schema()
            ORDER BY e.enumsortorder
            "#,
        )
        .bind(type_name)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to read labels of enum {}: {}", type_name, e);
            PortalError::from(e)
        })?;

        Ok(labels.into_iter().map(|(label,)| label).collect())
    }

    pub async fn snapshot(pool: &PgPool) -> Result<SchemaSnapshot, PortalError> {
        let mut enums = Vec::with_capacity(PORTAL_ENUMS.len());
        for type_name in PORTAL_ENUMS {
            enums.push(EnumInfo {
                type_name: type_name.to_string(),
                labels: Self::enum_labels(pool, type_name).await?,
            });
        }

        Ok(SchemaSnapshot {
            columns: Self::columns(pool).await?,
            indexes: Self::indexes(pool).await?,
            foreign_keys: Self::foreign_keys(pool).await?,
            enums,
        })
    }
}
