//! # Household Finance Backend
//!
//! Expense tracking, monthly budgets and savings goals for individual users,
//! served as a JSON REST API.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (axum routers, identity extractor, mappers)
//!     ↓
//! Domain Layer (services, aggregation engine, budget evaluator)
//!     ↓
//! Storage Layer (storage traits, SQLite repositories)
//! ```
//!
//! [`initialize_backend`] opens the database and builds every service;
//! [`create_router`] mounts the API groups under `/api`.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::AppConfig;
use crate::domain::{
    BudgetService, CategoryService, Clock, ExpenseService, LifecycleService, PaymentMethodService,
    SavingsGoalService, SystemClock, UserService,
};
use crate::io::rest::{
    budget_apis, category_apis, expense_apis, payment_method_apis, savings_goal_apis, user_apis,
};
use crate::storage::DbConnection;
use shared::UserPreferences;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService<DbConnection>,
    pub lifecycle_service: LifecycleService<DbConnection>,
    pub category_service: CategoryService<DbConnection>,
    pub payment_method_service: PaymentMethodService<DbConnection>,
    pub expense_service: ExpenseService<DbConnection>,
    pub budget_service: BudgetService<DbConnection>,
    pub savings_goal_service: SavingsGoalService<DbConnection>,
}

impl AppState {
    pub fn new(db: Arc<DbConnection>, clock: Arc<dyn Clock>, default_preferences: UserPreferences) -> Self {
        Self {
            user_service: UserService::new(db.clone(), default_preferences),
            lifecycle_service: LifecycleService::new(db.clone(), clock.clone()),
            category_service: CategoryService::new(db.clone()),
            payment_method_service: PaymentMethodService::new(db.clone()),
            expense_service: ExpenseService::new(db.clone(), clock.clone()),
            budget_service: BudgetService::new(db.clone(), clock.clone()),
            savings_goal_service: SavingsGoalService::new(db, clock),
        }
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url);
    let db = DbConnection::new(&config.database_url)
        .await
        .context("Failed to open database")?;

    info!("Setting up domain services");
    Ok(AppState::new(
        Arc::new(db),
        Arc::new(SystemClock),
        config.default_preferences(),
    ))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, cors_origin: &str) -> Result<Router> {
    let origin = cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin {:?}", cors_origin))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .nest("/users", user_apis::router())
        .nest("/categories", category_apis::router())
        .nest("/payment-methods", payment_method_apis::router())
        .nest("/expenses", expense_apis::router())
        .nest("/budgets", budget_apis::router())
        .nest("/savings-goals", savings_goal_apis::router());

    Ok(Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::rest::test_support::{read_json, request, setup_test_state};
    use axum::http::StatusCode;
    use serde_json::json;
    use shared::{
        BudgetAlert, BudgetWithStatus, Category, CreatedResponse, DashboardStats, ExpenseWithCategory,
        RegisterUserResponse, UserDataExport,
    };
    use tower::util::ServiceExt;

    async fn setup_test_app() -> Router {
        create_router(setup_test_state().await, "http://localhost:8080").unwrap()
    }

    #[tokio::test]
    async fn test_protected_routes_reject_missing_identity() {
        let app = setup_test_app().await;

        for (method, uri) in [
            (Method::GET, "/api/categories"),
            (Method::POST, "/api/categories/defaults"),
            (Method::GET, "/api/payment-methods"),
            (Method::GET, "/api/expenses"),
            (Method::GET, "/api/expenses/dashboard"),
            (Method::GET, "/api/expenses/report?start_date=2024-01-01&end_date=2024-01-31"),
            (Method::GET, "/api/budgets"),
            (Method::GET, "/api/budgets/alerts"),
            (Method::GET, "/api/savings-goals"),
            (Method::GET, "/api/users/me/stats"),
            (Method::DELETE, "/api/users/me"),
        ] {
            let response = app.clone().oneshot(request(method, uri, None, None)).await.unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_full_household_flow() {
        let app = setup_test_app().await;

        let response = app
            .clone()
            .oneshot(request(
                Method::POST,
                "/api/users",
                None,
                Some(json!({"name": "Ana", "email": "ana@example.com", "phone": null})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let registered: RegisterUserResponse = read_json(response).await;
        let me = Some(registered.user_id.as_str());

        let response = app
            .clone()
            .oneshot(request(Method::GET, "/api/categories", me, None))
            .await
            .unwrap();
        let categories: Vec<Category> = read_json(response).await;
        let food = categories.iter().find(|c| c.name == "Food").unwrap().id.clone();

        for (amount, date) in [(300.0, "2024-01-03"), (150.0, "2024-01-12")] {
            let response = app
                .clone()
                .oneshot(request(
                    Method::POST,
                    "/api/expenses",
                    me,
                    Some(json!({
                        "name": "Market",
                        "amount": amount,
                        "category_id": food,
                        "date": date,
                        "payment_method": "PIX",
                        "description": null,
                        "tags": ["groceries"],
                        "receipt_ref": null
                    })),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response = app
            .clone()
            .oneshot(request(
                Method::PUT,
                "/api/budgets",
                me,
                Some(json!({"category_id": food, "month_year": "2024-01", "limit": 500.0})),
            ))
            .await
            .unwrap();
        let budget: CreatedResponse = read_json(response).await;

        let response = app
            .clone()
            .oneshot(request(Method::GET, "/api/budgets", me, None))
            .await
            .unwrap();
        let budgets: Vec<BudgetWithStatus> = read_json(response).await;
        assert_eq!(budgets[0].budget.id, budget.id);
        assert_eq!(budgets[0].spent, 450.0);
        assert_eq!(budgets[0].status, shared::BudgetStatus::Warning);

        let response = app
            .clone()
            .oneshot(request(Method::GET, "/api/budgets/alerts", me, None))
            .await
            .unwrap();
        let alerts: Vec<BudgetAlert> = read_json(response).await;
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].alert_type, shared::AlertType::Warning);

        let response = app
            .clone()
            .oneshot(request(Method::GET, "/api/expenses/dashboard?month=2024-01", me, None))
            .await
            .unwrap();
        let stats: DashboardStats = read_json(response).await;
        assert_eq!(stats.total_month, 450.0);
        assert_eq!(stats.expense_count, 2);
        assert_eq!(stats.recent_expenses[0].date, "2024-01-12");

        // Seeded categories cannot be removed
        let response = app
            .clone()
            .oneshot(request(Method::DELETE, &format!("/api/categories/{}", food), me, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = app
            .clone()
            .oneshot(request(Method::GET, "/api/expenses", me, None))
            .await
            .unwrap();
        let expenses: Vec<ExpenseWithCategory> = read_json(response).await;
        assert_eq!(expenses[0].expense.tags, vec!["groceries".to_string()]);

        let response = app
            .clone()
            .oneshot(request(Method::GET, "/api/users/me/export", me, None))
            .await
            .unwrap();
        let export: UserDataExport = read_json(response).await;
        assert_eq!(export.expenses.len(), 2);
        assert_eq!(export.budgets.len(), 1);

        let response = app
            .clone()
            .oneshot(request(Method::DELETE, "/api/users/me", me, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(request(Method::GET, "/api/expenses", me, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_invalid_cors_origin() {
        let state = setup_test_state().await;
        assert!(create_router(state, "bad\norigin").is_err());
    }
}
