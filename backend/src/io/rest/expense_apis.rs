//! # REST API for Expenses
//!
//! CRUD plus the read-side views: monthly dashboard, date-range report and
//! the same report as a CSV download.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, put},
    Router,
};
use tracing::info;

use crate::domain::commands::expenses::UpdateExpenseCommand;
use crate::io::rest::mappers::expense_mapper::ExpenseMapper;
use crate::io::rest::{ApiError, AuthenticatedUser};
use crate::AppState;
use shared::{
    CreateExpenseRequest, CreatedResponse, DashboardStatsRequest, ExpenseListRequest, ExpenseWithCategory,
    ReportRequest, SuccessResponse, UpdateExpenseRequest,
};

/// Create a router for expense related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_expenses).post(create_expense))
        .route("/dashboard", get(get_dashboard_stats))
        .route("/report", get(generate_report))
        .route("/report/csv", get(export_report_csv))
        .route("/:id", put(update_expense).delete(delete_expense))
}

pub async fn list_expenses(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Query(request): Query<ExpenseListRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/expenses - request: {:?}", request);

    let expenses = state
        .expense_service
        .get_user_expenses(&identity, ExpenseMapper::to_list_query(request))
        .await?;
    let response: Vec<ExpenseWithCategory> = expenses
        .into_iter()
        .map(ExpenseMapper::to_with_category_dto)
        .collect();
    Ok(Json(response))
}

pub async fn create_expense(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Json(request): Json<CreateExpenseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /api/expenses - request: {:?}", request);

    let id = state
        .expense_service
        .add_expense(&identity, ExpenseMapper::to_add_command(request))
        .await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

pub async fn update_expense(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(expense_id): Path<String>,
    Json(request): Json<UpdateExpenseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("PUT /api/expenses/{} - request: {:?}", expense_id, request);

    let command = UpdateExpenseCommand {
        expense_id,
        patch: ExpenseMapper::to_patch(request),
    };
    state.expense_service.update_expense(&identity, command).await?;
    Ok(Json(SuccessResponse { success: true }))
}

pub async fn delete_expense(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(expense_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("DELETE /api/expenses/{}", expense_id);

    state.expense_service.delete_expense(&identity, &expense_id).await?;
    Ok(Json(SuccessResponse { success: true }))
}

pub async fn get_dashboard_stats(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Query(request): Query<DashboardStatsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/expenses/dashboard - month: {:?}", request.month);

    let summary = state
        .expense_service
        .get_dashboard_stats(&identity, request.month.as_deref())
        .await?;
    Ok(Json(ExpenseMapper::to_dashboard_stats(summary)))
}

pub async fn generate_report(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Query(request): Query<ReportRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/expenses/report - request: {:?}", request);

    let summary = state
        .expense_service
        .generate_report(&identity, ExpenseMapper::to_report_query(request))
        .await?;
    Ok(Json(ExpenseMapper::to_expense_report(summary)))
}

/// The report's expenses as a `text/csv` attachment
pub async fn export_report_csv(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Query(request): Query<ReportRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/expenses/report/csv - request: {:?}", request);

    let report = state
        .expense_service
        .export_report_csv(&identity, ExpenseMapper::to_report_query(request))
        .await?;
    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", report.filename),
        ),
    ];
    Ok((headers, report.content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::rest::test_support::{read_json, register_user, request, setup_test_state};
    use axum::http::Method;
    use serde_json::json;
    use shared::{DashboardStats, ErrorResponse, ExpenseReport};
    use tower::util::ServiceExt;

    fn expense_body(category_id: &str, amount: f64, date: &str, payment_method: &str) -> serde_json::Value {
        json!({
            "name": "Purchase",
            "amount": amount,
            "category_id": category_id,
            "date": date,
            "payment_method": payment_method,
            "description": null,
            "receipt_ref": null
        })
    }

    #[tokio::test]
    async fn test_create_list_update_delete() {
        let state = setup_test_state().await;
        let user = register_user(&state, "ana@example.com").await;
        let food = user.category_ids[0].clone();
        let transport = user.category_ids[1].clone();
        let app = router().with_state(state);
        let me = Some(user.user_id.as_str());

        let response = app
            .clone()
            .oneshot(request(Method::POST, "/", me, Some(expense_body(&food, 30.0, "2024-01-10", "Cash"))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: CreatedResponse = read_json(response).await;

        let response = app
            .clone()
            .oneshot(request(
                Method::PUT,
                &format!("/{}", created.id),
                me,
                Some(json!({"amount": 45.5, "category_id": transport})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(request(Method::GET, "/?start_date=2024-01-01&end_date=2024-01-31", me, None))
            .await
            .unwrap();
        let listed: Vec<ExpenseWithCategory> = read_json(response).await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].expense.amount, 45.5);
        assert_eq!(listed[0].category.as_ref().unwrap().name, "Transport");

        let response = app
            .clone()
            .oneshot(request(Method::DELETE, &format!("/{}", created.id), me, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.oneshot(request(Method::GET, "/", me, None)).await.unwrap();
        let listed: Vec<ExpenseWithCategory> = read_json(response).await;
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_expense_is_bad_request() {
        let state = setup_test_state().await;
        let user = register_user(&state, "ana@example.com").await;
        let food = user.category_ids[0].clone();
        let app = router().with_state(state);
        let me = Some(user.user_id.as_str());

        for body in [
            expense_body(&food, 0.0, "2024-01-10", "Cash"),
            expense_body(&food, 10.0, "10/01/2024", "Cash"),
        ] {
            let response = app.clone().oneshot(request(Method::POST, "/", me, Some(body))).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let error: ErrorResponse = read_json(response).await;
            assert_eq!(error.kind, "validation");
        }
    }

    #[tokio::test]
    async fn test_foreign_category_is_not_found() {
        let state = setup_test_state().await;
        let alice = register_user(&state, "alice@example.com").await;
        let bob = register_user(&state, "bob@example.com").await;
        let app = router().with_state(state);

        let response = app
            .oneshot(request(
                Method::POST,
                "/",
                Some(bob.user_id.as_str()),
                Some(expense_body(&alice.category_ids[0], 10.0, "2024-01-10", "Cash")),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_dashboard_and_report() {
        let state = setup_test_state().await;
        let user = register_user(&state, "ana@example.com").await;
        let food = user.category_ids[0].clone();
        let app = router().with_state(state);
        let me = Some(user.user_id.as_str());

        for (amount, date, method) in [(110.0, "2024-01-05", "Cash"), (60.0, "2024-01-06", "PIX"), (40.0, "2023-12-28", "PIX")] {
            let response = app
                .clone()
                .oneshot(request(Method::POST, "/", me, Some(expense_body(&food, amount, date, method))))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response = app
            .clone()
            .oneshot(request(Method::GET, "/dashboard", me, None))
            .await
            .unwrap();
        let stats: DashboardStats = read_json(response).await;
        assert_eq!(stats.month, "2024-01");
        assert_eq!(stats.total_month, 170.0);
        assert_eq!(stats.total_prev_month, 40.0);
        assert_eq!(stats.expense_count, 2);
        assert_eq!(stats.category_breakdown[0].name, "Food");

        let response = app
            .clone()
            .oneshot(request(Method::GET, "/report?start_date=2023-12-01&end_date=2024-01-31", me, None))
            .await
            .unwrap();
        let report: ExpenseReport = read_json(response).await;
        assert_eq!(report.total, 210.0);
        assert_eq!(report.count, 3);
        assert_eq!(report.payment_method_breakdown[0].name, "Cash");
        assert_eq!(report.payment_method_breakdown[0].amount, 110.0);
        assert_eq!(report.payment_method_breakdown[1].amount, 100.0);
        assert_eq!(report.daily_breakdown[0].date, "2023-12-28");

        let response = app
            .oneshot(request(Method::GET, "/dashboard?month=2024-13", me, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_csv_export_headers() {
        let state = setup_test_state().await;
        let user = register_user(&state, "ana@example.com").await;
        let food = user.category_ids[0].clone();
        let app = router().with_state(state);
        let me = Some(user.user_id.as_str());

        app.clone()
            .oneshot(request(Method::POST, "/", me, Some(expense_body(&food, 12.5, "2024-01-05", "Cash"))))
            .await
            .unwrap();

        let response = app
            .oneshot(request(
                Method::GET,
                "/report/csv?start_date=2024-01-01&end_date=2024-01-31",
                me,
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/csv; charset=utf-8"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"expenses-2024-01-01-2024-01-31.csv\""
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("date,name,category,amount,payment_method,description"));
        assert_eq!(lines.next(), Some("2024-01-05,Purchase,Food,12.50,Cash,"));
    }
}
