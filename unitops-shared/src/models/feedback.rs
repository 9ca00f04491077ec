/// Feedback model and database operations
///
/// Customers leave feedback against a named business unit, optionally with a
/// 1-5 rating. Staff read it back scoped by the access policy: admins see
/// everything, employees only their own unit's rows.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE feedback (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id),
///     unit_id UUID NOT NULL REFERENCES business_units(id),
///     comment VARCHAR(500) NOT NULL,
///     rating INTEGER CHECK (rating BETWEEN 1 AND 5),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Feedback model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Feedback {
    /// Unique feedback ID (UUID v4)
    pub id: Uuid,

    /// Customer who left the feedback
    pub user_id: Uuid,

    /// Business unit the feedback targets
    pub unit_id: Uuid,

    /// Free-text comment
    pub comment: String,

    /// Optional rating, 1-5
    pub rating: Option<i32>,

    /// When the feedback was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating feedback
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFeedback {
    /// Customer leaving the feedback
    pub user_id: Uuid,

    /// Target business unit
    pub unit_id: Uuid,

    /// Free-text comment
    pub comment: String,

    /// Optional rating, 1-5
    pub rating: Option<i32>,
}

/// Feedback row joined with display names for the list view
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct FeedbackDetails {
    /// Unique feedback ID
    pub id: Uuid,

    /// Customer who left the feedback
    pub user_id: Uuid,

    /// Business unit the feedback targets
    pub unit_id: Uuid,

    /// Free-text comment
    pub comment: String,

    /// Optional rating, 1-5
    pub rating: Option<i32>,

    /// When the feedback was created
    pub created_at: DateTime<Utc>,

    /// Customer display name
    pub customer_name: String,

    /// Business unit name
    pub unit_name: String,
}

impl Feedback {
    /// Creates a feedback entry
    pub async fn create(pool: &PgPool, data: CreateFeedback) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Feedback>(
            r#"
            INSERT INTO feedback (user_id, unit_id, comment, rating)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, unit_id, comment, rating, created_at
            "#,
        )
        .bind(data.user_id)
        .bind(data.unit_id)
        .bind(data.comment)
        .bind(data.rating)
        .fetch_one(pool)
        .await
    }

    /// Lists feedback with customer and unit names, optionally scoped to one unit
    ///
    /// `unit_id = None` lists everything (admin view); `Some(unit)` restricts
    /// to that unit (employee view). Newest first.
    pub async fn list_details(
        pool: &PgPool,
        unit_id: Option<Uuid>,
    ) -> Result<Vec<FeedbackDetails>, sqlx::Error> {
        match unit_id {
            None => {
                sqlx::query_as::<_, FeedbackDetails>(
                    r#"
                    SELECT f.id, f.user_id, f.unit_id, f.comment, f.rating, f.created_at,
                           u.name AS customer_name, b.name AS unit_name
                    FROM feedback f
                    JOIN users u ON u.id = f.user_id
                    JOIN business_units b ON b.id = f.unit_id
                    ORDER BY f.created_at DESC
                    "#,
                )
                .fetch_all(pool)
                .await
            }
            Some(unit) => {
                sqlx::query_as::<_, FeedbackDetails>(
                    r#"
                    SELECT f.id, f.user_id, f.unit_id, f.comment, f.rating, f.created_at,
                           u.name AS customer_name, b.name AS unit_name
                    FROM feedback f
                    JOIN users u ON u.id = f.user_id
                    JOIN business_units b ON b.id = f.unit_id
                    WHERE f.unit_id = $1
                    ORDER BY f.created_at DESC
                    "#,
                )
                .bind(unit)
                .fetch_all(pool)
                .await
            }
        }
    }
}
