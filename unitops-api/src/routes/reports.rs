/// Financial report endpoints
///
/// Thin wrappers over the read-side aggregations in
/// [`unitops_shared::reports`]. Every endpoint applies the same scoping rule:
/// admins see all units, employees their own unit, customers nothing. All
/// endpoints are side-effect-free.
///
/// # Endpoints
///
/// - `GET /financial-reports/sales-report`
/// - `GET /financial-reports/sales-report/monthly`
/// - `GET /financial-reports/inventory-valuation`
/// - `GET /financial-reports/revenue-by-product`
/// - `GET /financial-reports/top-customers`

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Extension, Json};
use unitops_shared::auth::{middleware::AuthenticatedUser, policy::unit_scope};
use unitops_shared::reports::{
    self, InventoryValuation, MonthlySales, ProductRevenue, SalesReport, TopCustomer,
};

/// Total sales and order count
pub async fn sales_report(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
) -> ApiResult<Json<SalesReport>> {
    let scope = unit_scope(&current_user)?;

    let report = reports::sales_report(&state.db, scope.filter()).await?;

    Ok(Json(report))
}

/// Sales bucketed by calendar month
pub async fn monthly_sales_report(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
) -> ApiResult<Json<Vec<MonthlySales>>> {
    let scope = unit_scope(&current_user)?;

    let report = reports::monthly_sales(&state.db, scope.filter()).await?;

    Ok(Json(report))
}

/// Current inventory valuation
pub async fn inventory_valuation(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
) -> ApiResult<Json<InventoryValuation>> {
    let scope = unit_scope(&current_user)?;

    let report = reports::inventory_valuation(&state.db, scope.filter()).await?;

    Ok(Json(report))
}

/// Revenue per product over price snapshots
pub async fn revenue_by_product(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
) -> ApiResult<Json<Vec<ProductRevenue>>> {
    let scope = unit_scope(&current_user)?;

    let report = reports::revenue_by_product(&state.db, scope.filter()).await?;

    Ok(Json(report))
}

/// Customers ranked by total spend
pub async fn top_customers(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
) -> ApiResult<Json<Vec<TopCustomer>>> {
    let scope = unit_scope(&current_user)?;

    let report = reports::top_customers(&state.db, scope.filter()).await?;

    Ok(Json(report))
}
