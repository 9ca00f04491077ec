/// Order placement engine
///
/// The one multi-step mutation in the system: validate every requested line
/// against current stock, compute the order total from prices observed at
/// validation time, deduct stock, and persist the order with its
/// price-snapshotted line items — all inside a single transaction.
///
/// # Invariants
///
/// - No oversell: an inventory row can never go negative. Every item row is
///   locked with `SELECT ... FOR UPDATE` before its stock check, so two
///   concurrent orders against the same item serialize and cannot jointly
///   overdraw.
/// - All-or-nothing: any failed precondition rolls the transaction back with
///   no inventory mutation and no order/order-item rows.
/// - Price snapshots: each line item stores the price used for the total;
///   later inventory price changes never alter a placed order.
///
/// # Line normalization
///
/// Requested lines are aggregated per distinct inventory name before any
/// stock check, so an order naming the same item twice is checked against the
/// combined quantity. Zero and negative quantities are rejected outright.
/// Item rows are locked in name order, which keeps concurrent multi-item
/// orders deadlock-free.
///
/// # Example
///
/// ```no_run
/// use unitops_shared::ordering::{place_order, OrderLine, PlaceOrder};
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, customer_id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// let order = place_order(
///     &pool,
///     PlaceOrder {
///         customer_id,
///         unit_name: "Warehouse-A".to_string(),
///         order_type: "online".to_string(),
///         items: vec![OrderLine {
///             inventory_name: "Widget".to_string(),
///             quantity: 3,
///         }],
///     },
/// )
/// .await?;
/// println!("placed order {} for {}", order.id, order.total_amount);
/// # Ok(())
/// # }
/// ```

use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::order::Order;

/// One requested order line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    /// Inventory item name within the target unit
    pub inventory_name: String,

    /// Units requested
    pub quantity: i32,
}

/// A complete order placement request
#[derive(Debug, Clone)]
pub struct PlaceOrder {
    /// Customer placing the order
    pub customer_id: Uuid,

    /// Target business unit, by name
    pub unit_name: String,

    /// Free-form order type label
    pub order_type: String,

    /// Requested lines
    pub items: Vec<OrderLine>,
}

/// Error type for order placement
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    /// The named business unit does not exist
    #[error("Business unit '{0}' does not exist")]
    UnitNotFound(String),

    /// A named inventory item does not exist in the target unit
    #[error("Inventory item '{0}' does not exist in this business unit")]
    ItemNotFound(String),

    /// A line requests more than is in stock
    #[error("Not enough stock for item '{name}'. Available: {available}")]
    InsufficientStock {
        /// Item name
        name: String,
        /// Units currently in stock
        available: i32,
    },

    /// A line requests zero or negative units
    #[error("Invalid quantity {quantity} for item '{name}'")]
    InvalidQuantity {
        /// Item name
        name: String,
        /// The rejected quantity
        quantity: i32,
    },

    /// The order has no lines
    #[error("Order contains no items")]
    EmptyOrder,

    /// Database failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Aggregates requested lines per distinct inventory name
///
/// Duplicate names within one request are combined so the stock check runs
/// against the cumulative quantity, not per line. Rejects empty orders and
/// zero/negative quantities. The result is sorted by name; locking rows in a
/// deterministic order keeps concurrent multi-item orders deadlock-free.
///
/// # Errors
///
/// - [`OrderError::EmptyOrder`] for an empty line list
/// - [`OrderError::InvalidQuantity`] for any line with quantity <= 0
pub fn aggregate_lines(items: &[OrderLine]) -> Result<Vec<OrderLine>, OrderError> {
    if items.is_empty() {
        return Err(OrderError::EmptyOrder);
    }

    let mut merged: Vec<OrderLine> = Vec::new();

    for line in items {
        if line.quantity <= 0 {
            return Err(OrderError::InvalidQuantity {
                name: line.inventory_name.clone(),
                quantity: line.quantity,
            });
        }

        match merged
            .iter_mut()
            .find(|l| l.inventory_name == line.inventory_name)
        {
            Some(existing) => existing.quantity += line.quantity,
            None => merged.push(line.clone()),
        }
    }

    merged.sort_by(|a, b| a.inventory_name.cmp(&b.inventory_name));

    Ok(merged)
}

/// Places an order atomically
///
/// # Algorithm
///
/// 1. Normalize the requested lines ([`aggregate_lines`]).
/// 2. Open a transaction and resolve the business unit by name.
/// 3. For each line: lock the inventory row (`FOR UPDATE`), verify the item
///    exists in the unit and has enough stock, and accumulate
///    quantity × current price into the total.
/// 4. Deduct each line's quantity.
/// 5. Insert the order row and one order-item row per line, snapshotting the
///    price used in step 3.
/// 6. Commit. Any earlier failure rolls everything back.
///
/// # Errors
///
/// - [`OrderError::UnitNotFound`] / [`OrderError::ItemNotFound`] for missing entities
/// - [`OrderError::InsufficientStock`] when a line exceeds available stock
/// - [`OrderError::EmptyOrder`] / [`OrderError::InvalidQuantity`] for malformed input
/// - [`OrderError::Database`] for storage failures
pub async fn place_order(pool: &PgPool, request: PlaceOrder) -> Result<Order, OrderError> {
    let lines = aggregate_lines(&request.items)?;

    let mut tx = pool.begin().await?;

    let unit: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM business_units WHERE name = $1")
        .bind(&request.unit_name)
        .fetch_optional(&mut *tx)
        .await?;

    let (unit_id,) = unit.ok_or_else(|| OrderError::UnitNotFound(request.unit_name.clone()))?;

    // Validation pass: lock each row, check stock, accumulate the total at
    // the price observed under the lock.
    let mut validated: Vec<(Uuid, i32, f64)> = Vec::with_capacity(lines.len());
    let mut total_amount = 0.0_f64;

    for line in &lines {
        let item: Option<(Uuid, i32, f64)> = sqlx::query_as(
            r#"
            SELECT id, quantity, price
            FROM inventory_items
            WHERE name = $1 AND unit_id = $2
            FOR UPDATE
            "#,
        )
        .bind(&line.inventory_name)
        .bind(unit_id)
        .fetch_optional(&mut *tx)
        .await?;

        let (item_id, available, price) =
            item.ok_or_else(|| OrderError::ItemNotFound(line.inventory_name.clone()))?;

        if available < line.quantity {
            return Err(OrderError::InsufficientStock {
                name: line.inventory_name.clone(),
                available,
            });
        }

        total_amount += f64::from(line.quantity) * price;
        validated.push((item_id, line.quantity, price));

        debug!(
            item = %line.inventory_name,
            requested = line.quantity,
            available,
            "Order line validated"
        );
    }

    // Deduction pass: every row is already locked, so these cannot conflict
    // with a concurrent placement.
    for (item_id, quantity, _) in &validated {
        sqlx::query("UPDATE inventory_items SET quantity = quantity - $1 WHERE id = $2")
            .bind(quantity)
            .bind(item_id)
            .execute(&mut *tx)
            .await?;
    }

    let order: Order = sqlx::query_as(
        r#"
        INSERT INTO orders (user_id, unit_id, order_type, total_amount)
        VALUES ($1, $2, $3, $4)
        RETURNING id, user_id, unit_id, order_type, total_amount, created_at
        "#,
    )
    .bind(request.customer_id)
    .bind(unit_id)
    .bind(&request.order_type)
    .bind(total_amount)
    .fetch_one(&mut *tx)
    .await?;

    for (item_id, quantity, price) in &validated {
        sqlx::query(
            r#"
            INSERT INTO order_items (order_id, inventory_id, quantity, price)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(order.id)
        .bind(item_id)
        .bind(quantity)
        .bind(price)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    info!(
        order_id = %order.id,
        unit = %request.unit_name,
        lines = validated.len(),
        total = total_amount,
        "Order placed"
    );

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(name: &str, quantity: i32) -> OrderLine {
        OrderLine {
            inventory_name: name.to_string(),
            quantity,
        }
    }

    #[test]
    fn test_aggregate_empty_order_rejected() {
        assert!(matches!(aggregate_lines(&[]), Err(OrderError::EmptyOrder)));
    }

    #[test]
    fn test_aggregate_zero_quantity_rejected() {
        let result = aggregate_lines(&[line("Widget", 0)]);
        assert!(matches!(
            result,
            Err(OrderError::InvalidQuantity { quantity: 0, .. })
        ));
    }

    #[test]
    fn test_aggregate_negative_quantity_rejected() {
        let result = aggregate_lines(&[line("Widget", 3), line("Gadget", -1)]);
        assert!(matches!(
            result,
            Err(OrderError::InvalidQuantity { quantity: -1, .. })
        ));
    }

    #[test]
    fn test_aggregate_single_line() {
        let lines = aggregate_lines(&[line("Widget", 3)]).unwrap();
        assert_eq!(lines, vec![line("Widget", 3)]);
    }

    #[test]
    fn test_aggregate_merges_duplicates() {
        // The same item twice must be checked against the combined quantity
        let lines = aggregate_lines(&[line("Widget", 3), line("Widget", 4)]).unwrap();
        assert_eq!(lines, vec![line("Widget", 7)]);
    }

    #[test]
    fn test_aggregate_sorts_by_name() {
        let lines =
            aggregate_lines(&[line("Zest", 1), line("Apple", 2), line("Mango", 3)]).unwrap();
        let names: Vec<&str> = lines.iter().map(|l| l.inventory_name.as_str()).collect();
        assert_eq!(names, vec!["Apple", "Mango", "Zest"]);
    }

    #[test]
    fn test_aggregate_mixed_duplicates_and_distinct() {
        let lines = aggregate_lines(&[
            line("Widget", 2),
            line("Gadget", 1),
            line("Widget", 5),
            line("Gadget", 1),
        ])
        .unwrap();
        assert_eq!(lines, vec![line("Gadget", 2), line("Widget", 7)]);
    }

    #[test]
    fn test_aggregate_rejects_before_merging() {
        // A bad line is rejected even when a duplicate would absorb it
        let result = aggregate_lines(&[line("Widget", 2), line("Widget", 0)]);
        assert!(matches!(result, Err(OrderError::InvalidQuantity { .. })));
    }

    #[test]
    fn test_error_messages() {
        let err = OrderError::InsufficientStock {
            name: "Widget".to_string(),
            available: 2,
        };
        assert_eq!(
            err.to_string(),
            "Not enough stock for item 'Widget'. Available: 2"
        );

        let err = OrderError::UnitNotFound("Warehouse-A".to_string());
        assert_eq!(err.to_string(), "Business unit 'Warehouse-A' does not exist");
    }

    // Transactional behavior (atomic deduction, oversell under concurrency)
    // is covered by the database-backed tests in tests/ordering_tests.rs.
}
