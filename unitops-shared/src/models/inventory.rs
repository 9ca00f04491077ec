/// Inventory model and database operations
///
/// Each inventory item belongs to exactly one business unit. Quantity can
/// never go negative: the schema carries a CHECK constraint and the order
/// engine validates before deducting. `(unit_id, name)` is unique so that a
/// request naming an item within a unit resolves deterministically.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE inventory_items (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     unit_id UUID NOT NULL REFERENCES business_units(id),
///     name VARCHAR(100) NOT NULL,
///     description VARCHAR(255),
///     quantity INTEGER NOT NULL CHECK (quantity >= 0),
///     reorder_level INTEGER NOT NULL,
///     price DOUBLE PRECISION NOT NULL CHECK (price >= 0),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     UNIQUE (unit_id, name)
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Stock level at or below which an item counts as low inventory
pub const LOW_STOCK_THRESHOLD: i32 = 10;

/// Inventory item model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct InventoryItem {
    /// Unique item ID (UUID v4)
    pub id: Uuid,

    /// Owning business unit
    pub unit_id: Uuid,

    /// Item name, unique within the unit
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Units in stock, never negative
    pub quantity: i32,

    /// Stock level that should trigger restocking
    pub reorder_level: i32,

    /// Price per unit
    pub price: f64,

    /// When the item was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new inventory item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInventoryItem {
    /// Owning business unit
    pub unit_id: Uuid,

    /// Item name
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Initial stock
    pub quantity: i32,

    /// Restock trigger level
    pub reorder_level: i32,

    /// Price per unit
    pub price: f64,
}

/// Input for updating an inventory item
///
/// Only non-None fields are written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateInventoryItem {
    /// New stock quantity
    pub quantity: Option<i32>,

    /// New restock trigger level
    pub reorder_level: Option<i32>,

    /// New price per unit
    pub price: Option<f64>,
}

/// Inventory statistics for the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryStats {
    /// Number of inventory items in scope
    pub total_inventory: i64,

    /// Number of items below the low-stock threshold
    pub low_inventory_count: i64,
}

impl InventoryItem {
    /// Creates a new inventory item
    ///
    /// # Errors
    ///
    /// Returns an error if the (unit, name) pair already exists or the
    /// database is unreachable.
    pub async fn create(pool: &PgPool, data: CreateInventoryItem) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, InventoryItem>(
            r#"
            INSERT INTO inventory_items (unit_id, name, description, quantity, reorder_level, price)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, unit_id, name, description, quantity, reorder_level, price, created_at
            "#,
        )
        .bind(data.unit_id)
        .bind(data.name)
        .bind(data.description)
        .bind(data.quantity)
        .bind(data.reorder_level)
        .bind(data.price)
        .fetch_one(pool)
        .await
    }

    /// Finds an inventory item by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, InventoryItem>(
            r#"
            SELECT id, unit_id, name, description, quantity, reorder_level, price, created_at
            FROM inventory_items
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Finds an inventory item by name across all units
    ///
    /// Oldest match wins when the same name exists in several units; callers
    /// that know the unit should use [`InventoryItem::find_by_name_in_unit`].
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, InventoryItem>(
            r#"
            SELECT id, unit_id, name, description, quantity, reorder_level, price, created_at
            FROM inventory_items
            WHERE name = $1
            ORDER BY created_at
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(pool)
        .await
    }

    /// Finds an inventory item by name within one business unit
    pub async fn find_by_name_in_unit(
        pool: &PgPool,
        name: &str,
        unit_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, InventoryItem>(
            r#"
            SELECT id, unit_id, name, description, quantity, reorder_level, price, created_at
            FROM inventory_items
            WHERE name = $1 AND unit_id = $2
            "#,
        )
        .bind(name)
        .bind(unit_id)
        .fetch_optional(pool)
        .await
    }

    /// Lists inventory, either for all units or scoped to one
    ///
    /// `unit_id = None` lists everything (admin view); `Some(unit)` restricts
    /// to that unit (employee view).
    pub async fn list(pool: &PgPool, unit_id: Option<Uuid>) -> Result<Vec<Self>, sqlx::Error> {
        match unit_id {
            None => {
                sqlx::query_as::<_, InventoryItem>(
                    r#"
                    SELECT id, unit_id, name, description, quantity, reorder_level, price, created_at
                    FROM inventory_items
                    ORDER BY created_at DESC
                    "#,
                )
                .fetch_all(pool)
                .await
            }
            Some(unit) => {
                sqlx::query_as::<_, InventoryItem>(
                    r#"
                    SELECT id, unit_id, name, description, quantity, reorder_level, price, created_at
                    FROM inventory_items
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

    /// Lists items below the low-stock threshold across all units
    pub async fn list_low_stock(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, InventoryItem>(
            r#"
            SELECT id, unit_id, name, description, quantity, reorder_level, price, created_at
            FROM inventory_items
            WHERE quantity < $1
            ORDER BY quantity
            "#,
        )
        .bind(LOW_STOCK_THRESHOLD)
        .fetch_all(pool)
        .await
    }

    /// Updates an inventory item
    ///
    /// Only non-None fields in `data` are written.
    ///
    /// # Returns
    ///
    /// The updated item if found, None if the item doesn't exist
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateInventoryItem,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut query = String::from("UPDATE inventory_items SET id = id");
        let mut bind_count = 1;

        if data.quantity.is_some() {
            bind_count += 1;
            query.push_str(&format!(", quantity = ${}", bind_count));
        }
        if data.reorder_level.is_some() {
            bind_count += 1;
            query.push_str(&format!(", reorder_level = ${}", bind_count));
        }
        if data.price.is_some() {
            bind_count += 1;
            query.push_str(&format!(", price = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 RETURNING id, unit_id, name, description, quantity, reorder_level, price, created_at",
        );

        let mut q = sqlx::query_as::<_, InventoryItem>(&query).bind(id);

        if let Some(quantity) = data.quantity {
            q = q.bind(quantity);
        }
        if let Some(reorder_level) = data.reorder_level {
            q = q.bind(reorder_level);
        }
        if let Some(price) = data.price {
            q = q.bind(price);
        }

        q.fetch_optional(pool).await
    }

    /// Deletes an inventory item by ID
    ///
    /// # Returns
    ///
    /// True if a row was deleted, false if the item didn't exist
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM inventory_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Total and low-stock item counts, optionally scoped to one unit
    pub async fn stats(pool: &PgPool, unit_id: Option<Uuid>) -> Result<InventoryStats, sqlx::Error> {
        let (total, low): (i64, i64) = match unit_id {
            None => {
                sqlx::query_as(
                    r#"
                    SELECT COUNT(*), COUNT(*) FILTER (WHERE quantity < $1)
                    FROM inventory_items
                    "#,
                )
                .bind(LOW_STOCK_THRESHOLD)
                .fetch_one(pool)
                .await?
            }
            Some(unit) => {
                sqlx::query_as(
                    r#"
                    SELECT COUNT(*), COUNT(*) FILTER (WHERE quantity < $1)
                    FROM inventory_items
                    WHERE unit_id = $2
                    "#,
                )
                .bind(LOW_STOCK_THRESHOLD)
                .bind(unit)
                .fetch_one(pool)
                .await?
            }
        };

        Ok(InventoryStats {
            total_inventory: total,
            low_inventory_count: low,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_stock_threshold() {
        // The reporting flow and both notification endpoints share this value
        assert_eq!(LOW_STOCK_THRESHOLD, 10);
    }

    #[test]
    fn test_update_inventory_default() {
        let update = UpdateInventoryItem::default();
        assert!(update.quantity.is_none());
        assert!(update.reorder_level.is_none());
        assert!(update.price.is_none());
    }
}
