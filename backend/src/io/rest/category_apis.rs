//! # REST API for Categories
//!
//! Listing, creation, partial update, deletion and default seeding.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post, put},
    Router,
};
use tracing::info;

use crate::domain::commands::categories::{AddCategoryCommand, UpdateCategoryCommand};
use crate::io::rest::mappers::category_mapper::CategoryMapper;
use crate::io::rest::{ApiError, AuthenticatedUser};
use crate::AppState;
use shared::{CreateCategoryRequest, CreatedIdsResponse, CreatedResponse, SuccessResponse, UpdateCategoryRequest};

/// Create a router for category related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route("/defaults", post(seed_default_categories))
        .route("/:id", put(update_category).delete(delete_category))
}

pub async fn list_categories(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/categories - user: {}", identity.user_id());

    let categories = state.category_service.get_user_categories(&identity).await?;
    Ok(Json(CategoryMapper::to_dto_list(categories)))
}

pub async fn create_category(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /api/categories - request: {:?}", request);

    let command = AddCategoryCommand {
        name: request.name,
        icon: request.icon,
        color: request.color,
    };
    let id = state.category_service.add_category(&identity, command).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// Insert the default catalog; the caller is expected to do this only once
pub async fn seed_default_categories(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /api/categories/defaults - user: {}", identity.user_id());

    let ids = state.lifecycle_service.seed_default_categories(&identity).await?;
    Ok((StatusCode::CREATED, Json(CreatedIdsResponse { ids })))
}

pub async fn update_category(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(category_id): Path<String>,
    Json(request): Json<UpdateCategoryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("PUT /api/categories/{} - request: {:?}", category_id, request);

    let command = UpdateCategoryCommand {
        category_id,
        patch: CategoryMapper::to_patch(request),
    };
    state.category_service.update_category(&identity, command).await?;
    Ok(Json(SuccessResponse { success: true }))
}

pub async fn delete_category(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(category_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("DELETE /api/categories/{}", category_id);

    state.category_service.delete_category(&identity, &category_id).await?;
    Ok(Json(SuccessResponse { success: true }))
}
