/// Read-side financial aggregations
///
/// Pure reporting queries over orders, order items, and inventory. Every
/// function takes the unit filter produced by the access policy
/// (`None` = all units for admins, `Some(unit)` = an employee's own unit)
/// and has no side effects: repeated calls over unchanged data return
/// identical results.
///
/// # Example
///
/// ```no_run
/// use unitops_shared::reports;
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// // Admin view: everything
/// let sales = reports::sales_report(&pool, None).await?;
/// println!("{} orders, {} total", sales.order_count, sales.total_sales);
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Aggregate sales totals
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SalesReport {
    /// Sum of order totals in scope
    pub total_sales: f64,

    /// Number of orders in scope
    pub order_count: i64,
}

/// Current inventory valuation
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct InventoryValuation {
    /// Sum of quantity × price over inventory in scope
    pub total_valuation: f64,
}

/// Revenue accumulated per product
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProductRevenue {
    /// Inventory item name
    pub product_name: String,

    /// Sum of line quantity × snapshotted price
    pub total_revenue: f64,
}

/// A customer ranked by total spend
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TopCustomer {
    /// Customer display name
    pub customer_name: String,

    /// Sum of their order totals
    pub total_spent: f64,
}

/// Sales aggregated into a year/month bucket
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MonthlySales {
    /// Calendar year
    pub year: i32,

    /// Calendar month (1-12)
    pub month: i32,

    /// Sum of order totals in the bucket
    pub total_sales: f64,

    /// Number of orders in the bucket
    pub order_count: i64,
}

/// Total sales and order count, optionally scoped to one unit
pub async fn sales_report(pool: &PgPool, unit_id: Option<Uuid>) -> Result<SalesReport, sqlx::Error> {
    match unit_id {
        None => {
            sqlx::query_as::<_, SalesReport>(
                r#"
                SELECT COALESCE(SUM(total_amount), 0) AS total_sales,
                       COUNT(id) AS order_count
                FROM orders
                "#,
            )
            .fetch_one(pool)
            .await
        }
        Some(unit) => {
            sqlx::query_as::<_, SalesReport>(
                r#"
                SELECT COALESCE(SUM(total_amount), 0) AS total_sales,
                       COUNT(id) AS order_count
                FROM orders
                WHERE unit_id = $1
                "#,
            )
            .bind(unit)
            .fetch_one(pool)
            .await
        }
    }
}

/// Inventory valuation (Σ quantity × price), optionally scoped to one unit
pub async fn inventory_valuation(
    pool: &PgPool,
    unit_id: Option<Uuid>,
) -> Result<InventoryValuation, sqlx::Error> {
    match unit_id {
        None => {
            sqlx::query_as::<_, InventoryValuation>(
                r#"
                SELECT COALESCE(SUM(quantity * price), 0) AS total_valuation
                FROM inventory_items
                "#,
            )
            .fetch_one(pool)
            .await
        }
        Some(unit) => {
            sqlx::query_as::<_, InventoryValuation>(
                r#"
                SELECT COALESCE(SUM(quantity * price), 0) AS total_valuation
                FROM inventory_items
                WHERE unit_id = $1
                "#,
            )
            .bind(unit)
            .fetch_one(pool)
            .await
        }
    }
}

/// Revenue per product over order-item price snapshots
///
/// Revenue reflects the prices at which lines were actually sold, not the
/// items' current prices.
pub async fn revenue_by_product(
    pool: &PgPool,
    unit_id: Option<Uuid>,
) -> Result<Vec<ProductRevenue>, sqlx::Error> {
    match unit_id {
        None => {
            sqlx::query_as::<_, ProductRevenue>(
                r#"
                SELECT i.name AS product_name,
                       COALESCE(SUM(oi.quantity * oi.price), 0) AS total_revenue
                FROM order_items oi
                JOIN inventory_items i ON i.id = oi.inventory_id
                GROUP BY i.name
                ORDER BY total_revenue DESC
                "#,
            )
            .fetch_all(pool)
            .await
        }
        Some(unit) => {
            sqlx::query_as::<_, ProductRevenue>(
                r#"
                SELECT i.name AS product_name,
                       COALESCE(SUM(oi.quantity * oi.price), 0) AS total_revenue
                FROM order_items oi
                JOIN inventory_items i ON i.id = oi.inventory_id
                WHERE i.unit_id = $1
                GROUP BY i.name
                ORDER BY total_revenue DESC
                "#,
            )
            .bind(unit)
            .fetch_all(pool)
            .await
        }
    }
}

/// Customers ranked by total spend, highest first
pub async fn top_customers(
    pool: &PgPool,
    unit_id: Option<Uuid>,
) -> Result<Vec<TopCustomer>, sqlx::Error> {
    match unit_id {
        None => {
            sqlx::query_as::<_, TopCustomer>(
                r#"
                SELECT u.name AS customer_name,
                       COALESCE(SUM(o.total_amount), 0) AS total_spent
                FROM orders o
                JOIN users u ON u.id = o.user_id
                GROUP BY u.name
                ORDER BY total_spent DESC
                "#,
            )
            .fetch_all(pool)
            .await
        }
        Some(unit) => {
            sqlx::query_as::<_, TopCustomer>(
                r#"
                SELECT u.name AS customer_name,
                       COALESCE(SUM(o.total_amount), 0) AS total_spent
                FROM orders o
                JOIN users u ON u.id = o.user_id
                WHERE o.unit_id = $1
                GROUP BY u.name
                ORDER BY total_spent DESC
                "#,
            )
            .bind(unit)
            .fetch_all(pool)
            .await
        }
    }
}

/// Sales bucketed by calendar month, oldest first
pub async fn monthly_sales(
    pool: &PgPool,
    unit_id: Option<Uuid>,
) -> Result<Vec<MonthlySales>, sqlx::Error> {
    match unit_id {
        None => {
            sqlx::query_as::<_, MonthlySales>(
                r#"
                SELECT EXTRACT(YEAR FROM created_at)::INT AS year,
                       EXTRACT(MONTH FROM created_at)::INT AS month,
                       COALESCE(SUM(total_amount), 0) AS total_sales,
                       COUNT(id) AS order_count
                FROM orders
                GROUP BY 1, 2
                ORDER BY 1, 2
                "#,
            )
            .fetch_all(pool)
            .await
        }
        Some(unit) => {
            sqlx::query_as::<_, MonthlySales>(
                r#"
                SELECT EXTRACT(YEAR FROM created_at)::INT AS year,
                       EXTRACT(MONTH FROM created_at)::INT AS month,
                       COALESCE(SUM(total_amount), 0) AS total_sales,
                       COUNT(id) AS order_count
                FROM orders
                WHERE unit_id = $1
                GROUP BY 1, 2
                ORDER BY 1, 2
                "#,
            )
            .bind(unit)
            .fetch_all(pool)
            .await
        }
    }
}
