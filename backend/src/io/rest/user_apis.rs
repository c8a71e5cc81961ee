//! # REST API for Users
//!
//! Registration is the only unauthenticated route in the API. Everything
//! under `/me` acts on the caller named by `x-user-id`.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{delete, get, post, put},
    Router,
};
use tracing::info;

use crate::io::rest::mappers::user_mapper::UserMapper;
use crate::io::rest::{ApiError, AuthenticatedUser};
use crate::AppState;
use shared::{RegisterUserRequest, SuccessResponse, UpdateProfileRequest};

/// Create a router for user related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(register_user))
        .route("/me", delete(delete_account))
        .route("/me/profile", put(update_profile))
        .route("/me/preferences", get(get_user_preferences))
        .route("/me/stats", get(get_user_stats))
        .route("/me/export", get(export_user_data))
}

/// Create a user and seed their default categories and payment methods
pub async fn register_user(
    State(state): State<AppState>,
    Json(request): Json<RegisterUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /api/users - email: {}", request.email);

    let result = state
        .lifecycle_service
        .register_user(UserMapper::to_register_command(request))
        .await?;
    Ok((StatusCode::CREATED, Json(UserMapper::to_register_response(result))))
}

pub async fn update_profile(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("PUT /api/users/me/profile - user: {}", identity.user_id());

    state
        .user_service
        .update_profile(&identity, UserMapper::to_update_profile_command(request))
        .await?;
    Ok(Json(SuccessResponse { success: true }))
}

pub async fn get_user_preferences(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/users/me/preferences - user: {}", identity.user_id());

    let preferences = state.user_service.get_user_preferences(&identity).await?;
    Ok(Json(preferences))
}

pub async fn get_user_stats(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/users/me/stats - user: {}", identity.user_id());

    let stats = state.user_service.get_user_stats(&identity).await?;
    Ok(Json(UserMapper::to_user_stats(stats)))
}

pub async fn export_user_data(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/users/me/export - user: {}", identity.user_id());

    let snapshot = state.lifecycle_service.export_user_data(&identity).await?;
    Ok(Json(UserMapper::to_export(snapshot)))
}

/// Remove the caller and everything they own
pub async fn delete_account(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    info!("DELETE /api/users/me - user: {}", identity.user_id());

    state.lifecycle_service.delete_account(&identity).await?;
    Ok(Json(SuccessResponse { success: true }))
}
