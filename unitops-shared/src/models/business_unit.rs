/// Business unit model and database operations
///
/// A business unit is a named organizational/location boundary owning zero or
/// more employees and inventory items. Unit names are unique; customer-facing
/// requests reference units by name.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE business_units (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(100) NOT NULL UNIQUE,
///     location VARCHAR(50) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Business unit model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BusinessUnit {
    /// Unique unit ID (UUID v4)
    pub id: Uuid,

    /// Unit name, unique across all units
    pub name: String,

    /// Physical location
    pub location: String,

    /// When the unit was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new business unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBusinessUnit {
    /// Unit name (must be unique)
    pub name: String,

    /// Physical location
    pub location: String,
}

impl BusinessUnit {
    /// Creates a new business unit
    ///
    /// # Errors
    ///
    /// Returns an error if the name is already taken or the database is
    /// unreachable.
    pub async fn create(pool: &PgPool, data: CreateBusinessUnit) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, BusinessUnit>(
            r#"
            INSERT INTO business_units (name, location)
            VALUES ($1, $2)
            RETURNING id, name, location, created_at
            "#,
        )
        .bind(data.name)
        .bind(data.location)
        .fetch_one(pool)
        .await
    }

    /// Finds a business unit by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, BusinessUnit>(
            "SELECT id, name, location, created_at FROM business_units WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Finds a business unit by name
    ///
    /// Order placement and feedback creation resolve the target unit this way.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, BusinessUnit>(
            "SELECT id, name, location, created_at FROM business_units WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(pool)
        .await
    }

    /// Lists all business units, newest first
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, BusinessUnit>(
            "SELECT id, name, location, created_at FROM business_units ORDER BY created_at DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Counts all business units
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM business_units")
            .fetch_one(pool)
            .await
    }
}
