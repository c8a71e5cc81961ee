//! # REST API Interface Layer
//!
//! One router per API group, nested under `/api` by [`crate::create_router`]:
//!
//! | Prefix | Module |
//! |---|---|
//! | `/users` | [`user_apis`] |
//! | `/categories` | [`category_apis`] |
//! | `/payment-methods` | [`payment_method_apis`] |
//! | `/expenses` | [`expense_apis`] |
//! | `/budgets` | [`budget_apis`] |
//! | `/savings-goals` | [`savings_goal_apis`] |
//!
//! Every route except registration requires the `x-user-id` header.
//! Failures answer `{"error": ..., "kind": ...}` with the status from
//! [`error::status_for`].

pub mod auth;
pub mod budget_apis;
pub mod category_apis;
pub mod error;
pub mod expense_apis;
pub mod mappers;
pub mod payment_method_apis;
pub mod savings_goal_apis;
pub mod user_apis;

pub use auth::{AuthenticatedUser, USER_ID_HEADER};
pub use error::ApiError;

#[cfg(test)]
pub(crate) mod test_support {
    use axum::{
        body::Body,
        http::{Method, Request},
        response::Response,
    };
    use chrono::NaiveDate;
    use serde::de::DeserializeOwned;
    use serde_json::Value;
    use std::sync::Arc;

    use crate::config::AppConfig;
    use crate::domain::calendar::FixedClock;
    use crate::domain::commands::users::{RegisterUserCommand, RegistrationResult};
    use crate::storage::DbConnection;
    use crate::AppState;

    /// Services over a fresh in-memory database with the clock on 2024-01-15
    pub async fn setup_test_state() -> AppState {
        let db = Arc::new(DbConnection::init_test().await.expect("Failed to create test database"));
        let clock = Arc::new(FixedClock::on(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()));
        AppState::new(db, clock, AppConfig::default().default_preferences())
    }

    pub async fn register_user(state: &AppState, email: &str) -> RegistrationResult {
        state
            .lifecycle_service
            .register_user(RegisterUserCommand {
                name: "Test User".to_string(),
                email: email.to_string(),
                phone: None,
            })
            .await
            .expect("Failed to register test user")
    }

    pub fn request(method: Method, uri: &str, user_id: Option<&str>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user_id) = user_id {
            builder = builder.header(super::USER_ID_HEADER, user_id);
        }
        match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    pub async fn read_json<T: DeserializeOwned>(response: Response) -> T {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }
}
