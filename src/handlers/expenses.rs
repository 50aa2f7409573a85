use crate::entities::PaymentMethod;
use crate::errors::ServiceError;
use crate::handlers::common::{
    created_response, parse_iso_date, success_response, validate_input, validate_month,
};
use crate::services::expenses::CreateExpenseInput;
use crate::AppState;
use axum::{
    extract::{Json, Path, State},
    response::IntoResponse,
    routing::{delete, get, post},
    Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateExpenseRequest {
    pub date: String,
    #[validate(length(min = 1, max = 160, message = "Expense type must be 1-160 characters"))]
    pub expense_type: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    pub amount: Decimal,
    pub payment_type: PaymentMethod,
}

async fn create_expense(
    State(state): State<AppState>,
    Json(payload): Json<CreateExpenseRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;
    let date = parse_iso_date(&payload.date)?;

    let created = state
        .services
        .expenses
        .create_expense(CreateExpenseInput {
            date,
            expense_type: payload.expense_type,
            description: payload.description,
            amount: payload.amount,
            payment_type: payload.payment_type,
        })
        .await?;

    Ok(created_response(created))
}

async fn daily_expenses(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    let date = parse_iso_date(&date)?;
    let expenses = state.services.expenses.list_daily(&date).await?;
    Ok(success_response(expenses))
}

async fn monthly_expenses(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_month(year, month)?;
    let expenses = state.services.expenses.list_monthly(year, month).await?;
    Ok(success_response(expenses))
}

async fn delete_expense(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    let expense = state.services.expenses.delete_expense(id).await?;
    Ok(success_response(json!({
        "message": "Expense deleted",
        "expense": expense,
    })))
}

pub fn expense_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_expense))
        .route("/daily/:date", get(daily_expenses))
        .route("/monthly/:year/:month", get(monthly_expenses))
        .route("/:id", delete(delete_expense))
}
