//! # REST API for Budgets
//!
//! Budgets are set (created or updated) with `PUT /api/budgets`, keyed by
//! category and month. Listing and alerts recompute spending on every call.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json},
    routing::{delete, get},
    Router,
};
use tracing::info;

use crate::io::rest::mappers::budget_mapper::BudgetMapper;
use crate::io::rest::{ApiError, AuthenticatedUser};
use crate::AppState;
use shared::{BudgetAlert, BudgetListRequest, BudgetWithStatus, CreatedResponse, SetBudgetRequest, SuccessResponse};

/// Create a router for budget related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_budgets).put(set_budget))
        .route("/alerts", get(get_budget_alerts))
        .route("/:id", delete(delete_budget))
}

pub async fn list_budgets(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Query(request): Query<BudgetListRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/budgets - month_year: {:?}", request.month_year);

    let budgets = state
        .budget_service
        .get_user_budgets(&identity, request.month_year.as_deref())
        .await?;
    let response: Vec<BudgetWithStatus> = budgets.into_iter().map(BudgetMapper::to_with_status).collect();
    Ok(Json(response))
}

/// Create or update the budget for a category and month; answers with its id
pub async fn set_budget(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Json(request): Json<SetBudgetRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("PUT /api/budgets - request: {:?}", request);

    let id = state
        .budget_service
        .set_budget(&identity, BudgetMapper::to_set_command(request))
        .await?;
    Ok(Json(CreatedResponse { id }))
}

pub async fn delete_budget(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(budget_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("DELETE /api/budgets/{}", budget_id);

    state.budget_service.delete_budget(&identity, &budget_id).await?;
    Ok(Json(SuccessResponse { success: true }))
}

pub async fn get_budget_alerts(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/budgets/alerts - user: {}", identity.user_id());

    let alerts = state.budget_service.get_budget_alerts(&identity).await?;
    let response: Vec<BudgetAlert> = alerts.into_iter().map(BudgetMapper::to_alert).collect();
    Ok(Json(response))
}
