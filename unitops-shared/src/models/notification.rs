/// Notification model and database operations
///
/// A notification is created when an employee reports an inventory item whose
/// stock has crossed below the low-stock threshold. Rows carry a resolved
/// flag but nothing resolves them automatically.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE notifications (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     inventory_id UUID NOT NULL REFERENCES inventory_items(id),
///     message VARCHAR(255) NOT NULL,
///     resolved BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Notification model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Notification {
    /// Unique notification ID (UUID v4)
    pub id: Uuid,

    /// Inventory item the notification refers to
    pub inventory_id: Uuid,

    /// Human-readable message
    pub message: String,

    /// Whether the notification has been handled
    pub resolved: bool,

    /// When the notification was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a notification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNotification {
    /// Inventory item the notification refers to
    pub inventory_id: Uuid,

    /// Human-readable message
    pub message: String,
}

impl Notification {
    /// Creates a notification
    pub async fn create(pool: &PgPool, data: CreateNotification) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (inventory_id, message)
            VALUES ($1, $2)
            RETURNING id, inventory_id, message, resolved, created_at
            "#,
        )
        .bind(data.inventory_id)
        .bind(data.message)
        .fetch_one(pool)
        .await
    }

    /// Lists all notifications, newest first
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Notification>(
            r#"
            SELECT id, inventory_id, message, resolved, created_at
            FROM notifications
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await
    }
}
