/// Feedback endpoints
///
/// Customers leave feedback against a named business unit; staff read it back
/// scoped by the access policy. An employee without a unit assignment cannot
/// list feedback.
///
/// # Endpoints
///
/// - `POST /feedback/create-feeback` - Customer creates feedback
/// - `GET  /feedback/list-feedbacks` - Admin: all, employee: own unit

use crate::{
    app::AppState,
    error::{validation_error, ApiError, ApiResult},
};
use axum::{extract::State, Extension, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use unitops_shared::auth::{
    middleware::AuthenticatedUser,
    policy::{require_customer, unit_scope},
};
use unitops_shared::models::{
    business_unit::BusinessUnit,
    feedback::{CreateFeedback, Feedback, FeedbackDetails},
};
use uuid::Uuid;
use validator::Validate;

/// Feedback creation request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateFeedbackRequest {
    /// Target business unit, by name
    #[validate(length(min = 1, max = 100, message = "Unit name must be 1-100 characters"))]
    pub unit_name: String,

    /// Free-text comment
    #[validate(length(min = 1, max = 500, message = "Comment must be 1-500 characters"))]
    pub comment: String,

    /// Optional rating, 1-5
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: Option<i32>,
}

/// Created feedback with display names
#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    /// Feedback ID
    pub id: Uuid,

    /// Customer who left the feedback
    pub user_id: Uuid,

    /// Target business unit
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

/// Creates feedback (customer only)
///
/// # Errors
///
/// - `403 Forbidden`: Caller is not a customer
/// - `404 Not Found`: Unknown business unit name
/// - `422 Unprocessable Entity`: Validation failed (e.g. rating out of range)
pub async fn create_feedback(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
    Json(req): Json<CreateFeedbackRequest>,
) -> ApiResult<Json<FeedbackResponse>> {
    require_customer(&current_user)?;
    req.validate().map_err(validation_error)?;

    let unit = BusinessUnit::find_by_name(&state.db, &req.unit_name)
        .await?
        .ok_or_else(|| ApiError::NotFound("Business unit not found".to_string()))?;

    let feedback = Feedback::create(
        &state.db,
        CreateFeedback {
            user_id: current_user.id,
            unit_id: unit.id,
            comment: req.comment,
            rating: req.rating,
        },
    )
    .await?;

    Ok(Json(FeedbackResponse {
        id: feedback.id,
        user_id: feedback.user_id,
        unit_id: feedback.unit_id,
        comment: feedback.comment,
        rating: feedback.rating,
        created_at: feedback.created_at,
        customer_name: current_user.name,
        unit_name: unit.name,
    }))
}

/// Lists feedback scoped by role
///
/// # Errors
///
/// - `400 Bad Request`: Employee without a unit assignment
/// - `403 Forbidden`: Caller is a customer
pub async fn list_feedbacks(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
) -> ApiResult<Json<Vec<FeedbackDetails>>> {
    let scope = unit_scope(&current_user)?;

    let feedbacks = Feedback::list_details(&state.db, scope.filter()).await?;

    Ok(Json(feedbacks))
}
