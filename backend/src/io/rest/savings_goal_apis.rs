//! # REST API for Savings Goals

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post, put},
    Router,
};
use tracing::info;

use crate::domain::commands::savings_goals::{UpdateSavingsGoalCommand, UpdateSavingsProgressCommand};
use crate::io::rest::mappers::savings_goal_mapper::SavingsGoalMapper;
use crate::io::rest::{ApiError, AuthenticatedUser};
use crate::AppState;
use shared::{
    CreateSavingsGoalRequest, CreatedResponse, SavingsGoalWithProgress, SuccessResponse, UpdateSavingsGoalRequest,
    UpdateSavingsProgressRequest,
};

/// Create a router for savings goal related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_savings_goals).post(create_savings_goal))
        .route("/:id", put(update_savings_goal).delete(delete_savings_goal))
        .route("/:id/progress", post(update_savings_progress))
}

pub async fn list_savings_goals(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/savings-goals - user: {}", identity.user_id());

    let goals = state.savings_goal_service.get_user_savings_goals(&identity).await?;
    let response: Vec<SavingsGoalWithProgress> =
        goals.into_iter().map(SavingsGoalMapper::to_with_progress).collect();
    Ok(Json(response))
}

pub async fn create_savings_goal(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Json(request): Json<CreateSavingsGoalRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /api/savings-goals - request: {:?}", request);

    let id = state
        .savings_goal_service
        .add_savings_goal(&identity, SavingsGoalMapper::to_add_command(request))
        .await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

pub async fn update_savings_goal(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(goal_id): Path<String>,
    Json(request): Json<UpdateSavingsGoalRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("PUT /api/savings-goals/{} - request: {:?}", goal_id, request);

    let command = UpdateSavingsGoalCommand {
        goal_id,
        patch: SavingsGoalMapper::to_patch(request),
    };
    state.savings_goal_service.update_savings_goal(&identity, command).await?;
    Ok(Json(SuccessResponse { success: true }))
}

/// Add (or with a negative amount, withdraw) saved money
pub async fn update_savings_progress(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(goal_id): Path<String>,
    Json(request): Json<UpdateSavingsProgressRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /api/savings-goals/{}/progress - amount: {}", goal_id, request.amount);

    let command = UpdateSavingsProgressCommand {
        goal_id,
        amount: request.amount,
    };
    state.savings_goal_service.update_savings_progress(&identity, command).await?;
    Ok(Json(SuccessResponse { success: true }))
}

pub async fn delete_savings_goal(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(goal_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("DELETE /api/savings-goals/{}", goal_id);

    state.savings_goal_service.delete_savings_goal(&identity, &goal_id).await?;
    Ok(Json(SuccessResponse { success: true }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::rest::test_support::{read_json, register_user, request, setup_test_state};
    use axum::http::Method;
    use serde_json::json;
    use shared::SavingsGoalStatus;
    use tower::util::ServiceExt;

    #[tokio::test]
    async fn test_goal_progress_flow() {
        let state = setup_test_state().await;
        let user = register_user(&state, "ana@example.com").await;
        let app = router().with_state(state);
        let me = Some(user.user_id.as_str());

        let response = app
            .clone()
            .oneshot(request(
                Method::POST,
                "/",
                me,
                Some(json!({"name": "Trip", "target_amount": 1000.0, "target_date": "2024-02-01", "description": null})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: CreatedResponse = read_json(response).await;
        let progress_uri = format!("/{}/progress", created.id);

        for amount in [400.0, -600.0, 250.0] {
            let response = app
                .clone()
                .oneshot(request(Method::POST, &progress_uri, me, Some(json!({"amount": amount}))))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = app.clone().oneshot(request(Method::GET, "/", me, None)).await.unwrap();
        let goals: Vec<SavingsGoalWithProgress> = read_json(response).await;
        assert_eq!(goals[0].goal.current_amount, 250.0);
        assert_eq!(goals[0].percentage, 25.0);
        assert_eq!(goals[0].remaining, 750.0);
        assert_eq!(goals[0].days_remaining, 17);
        assert_eq!(goals[0].status, SavingsGoalStatus::Urgent);

        let response = app
            .oneshot(request(Method::DELETE, &format!("/{}", created.id), me, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_foreign_goal_is_not_found() {
        let state = setup_test_state().await;
        let alice = register_user(&state, "alice@example.com").await;
        let bob = register_user(&state, "bob@example.com").await;
        let app = router().with_state(state);

        let response = app
            .clone()
            .oneshot(request(
                Method::POST,
                "/",
                Some(alice.user_id.as_str()),
                Some(json!({"name": "Car", "target_amount": 5000.0, "target_date": "2025-01-01", "description": null})),
            ))
            .await
            .unwrap();
        let created: CreatedResponse = read_json(response).await;

        let response = app
            .oneshot(request(
                Method::POST,
                &format!("/{}/progress", created.id),
                Some(bob.user_id.as_str()),
                Some(json!({"amount": 10.0})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
