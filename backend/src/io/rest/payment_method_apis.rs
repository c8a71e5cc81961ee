//! # REST API for Payment Methods

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use tracing::info;

use crate::domain::commands::payment_methods::AddPaymentMethodCommand;
use crate::io::rest::mappers::payment_method_mapper::PaymentMethodMapper;
use crate::io::rest::{ApiError, AuthenticatedUser};
use crate::AppState;
use shared::{CreatePaymentMethodRequest, CreatedIdsResponse, CreatedResponse};

/// Create a router for payment method related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_payment_methods).post(create_payment_method))
        .route("/defaults", post(seed_default_payment_methods))
}

pub async fn list_payment_methods(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/payment-methods - user: {}", identity.user_id());

    let methods = state.payment_method_service.get_user_payment_methods(&identity).await?;
    Ok(Json(PaymentMethodMapper::to_dto_list(methods)))
}

pub async fn create_payment_method(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Json(request): Json<CreatePaymentMethodRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /api/payment-methods - request: {:?}", request);

    let command = AddPaymentMethodCommand {
        name: request.name,
        icon: request.icon,
    };
    let id = state.payment_method_service.add_payment_method(&identity, command).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

pub async fn seed_default_payment_methods(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /api/payment-methods/defaults - user: {}", identity.user_id());

    let ids = state.lifecycle_service.seed_default_payment_methods(&identity).await?;
    Ok((StatusCode::CREATED, Json(CreatedIdsResponse { ids })))
}
