use crate::entities::PaymentMethod;
use crate::errors::ServiceError;
use crate::handlers::common::{
    created_response, parse_iso_date, success_response, validate_input, validate_month,
};
use crate::services::records::CreateRecordInput;
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
use validator::{Validate, ValidationError};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRecordRequest {
    pub date: String,
    #[validate(length(min = 1, max = 160, message = "Customer name must be 1-160 characters"))]
    pub customer_name: String,
    #[validate(length(min = 1, max = 160))]
    pub service: Option<String>,
    #[validate(length(min = 1, max = 160))]
    pub staff: Option<String>,
    #[validate(custom = "validate_price_positive")]
    pub price: Decimal,
    pub payment_type: PaymentMethod,
}

fn validate_price_positive(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        let mut err = ValidationError::new("price");
        err.message = Some("Price must be positive".into());
        return Err(err);
    }
    Ok(())
}

async fn create_record(
    State(state): State<AppState>,
    Json(payload): Json<CreateRecordRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;
    let date = parse_iso_date(&payload.date)?;

    let created = state
        .services
        .records
        .create_record(CreateRecordInput {
            date,
            customer_name: payload.customer_name,
            service: payload.service,
            staff: payload.staff,
            price: payload.price,
            payment_type: payload.payment_type,
        })
        .await?;

    Ok(created_response(created))
}

async fn daily_records(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    let date = parse_iso_date(&date)?;
    let records = state.services.records.list_daily(&date).await?;
    Ok(success_response(records))
}

async fn monthly_records(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_month(year, month)?;
    let records = state.services.records.list_monthly(year, month).await?;
    Ok(success_response(records))
}

async fn delete_record(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    let record = state.services.records.delete_record(id).await?;
    Ok(success_response(json!({
        "message": "Record deleted",
        "record": record,
    })))
}

pub fn record_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_record))
        .route("/daily/:date", get(daily_records))
        .route("/monthly/:year/:month", get(monthly_records))
        .route("/:id", delete(delete_record))
}
