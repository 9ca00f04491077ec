/// Order and order-item models
///
/// Orders and their line items are created atomically by the order engine
/// (see [`crate::ordering`]) and never updated afterwards. Each line item
/// snapshots the unit price observed when the order was validated, so later
/// inventory price changes never alter a placed order.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE orders (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID REFERENCES users(id),
///     unit_id UUID NOT NULL REFERENCES business_units(id),
///     order_type VARCHAR(20) NOT NULL,
///     total_amount DOUBLE PRECISION NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
///
/// CREATE TABLE order_items (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     order_id UUID NOT NULL REFERENCES orders(id) ON DELETE CASCADE,
///     inventory_id UUID NOT NULL REFERENCES inventory_items(id),
///     quantity INTEGER NOT NULL,
///     price DOUBLE PRECISION NOT NULL
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Order model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    /// Unique order ID (UUID v4)
    pub id: Uuid,

    /// Customer who placed the order
    pub user_id: Option<Uuid>,

    /// Business unit the order was placed against
    pub unit_id: Uuid,

    /// Free-form order type label (e.g. "online", "walk-in")
    pub order_type: String,

    /// Sum of line quantity × price at validation time
    pub total_amount: f64,

    /// When the order was placed
    pub created_at: DateTime<Utc>,
}

/// Order line item with its price snapshot
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderItem {
    /// Unique line ID (UUID v4)
    pub id: Uuid,

    /// Owning order
    pub order_id: Uuid,

    /// Referenced inventory item
    pub inventory_id: Uuid,

    /// Units ordered
    pub quantity: i32,

    /// Unit price snapshotted at order time
    pub price: f64,
}

impl Order {
    /// Finds an order by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Order>(
            r#"
            SELECT id, user_id, unit_id, order_type, total_amount, created_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Lists orders, either for all units or scoped to one
    ///
    /// `unit_id = None` lists everything (admin view); `Some(unit)` restricts
    /// to that unit (employee view). Newest first.
    pub async fn list(pool: &PgPool, unit_id: Option<Uuid>) -> Result<Vec<Self>, sqlx::Error> {
        match unit_id {
            None => {
                sqlx::query_as::<_, Order>(
                    r#"
                    SELECT id, user_id, unit_id, order_type, total_amount, created_at
                    FROM orders
                    ORDER BY created_at DESC
                    "#,
                )
                .fetch_all(pool)
                .await
            }
            Some(unit) => {
                sqlx::query_as::<_, Order>(
                    r#"
                    SELECT id, user_id, unit_id, order_type, total_amount, created_at
                    FROM orders
                    WHERE unit_id = $1
                    ORDER BY created_at DESC
                    "#,
                )
                .bind(unit)
                .fetch_all(pool)
                .await
            }
        }
    }
}

impl OrderItem {
    /// Lists the line items of one order
    pub async fn list_by_order(pool: &PgPool, order_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT id, order_id, inventory_id, quantity, price
            FROM order_items
            WHERE order_id = $1
            "#,
        )
        .bind(order_id)
        .fetch_all(pool)
        .await
    }
}
