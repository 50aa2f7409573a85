use crate::errors::ServiceError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::Serialize;
use validator::Validate;

/// Standard success response
pub fn success_response<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

/// Standard created response
pub fn created_response<T: Serialize>(data: T) -> Response {
    (StatusCode::CREATED, Json(data)).into_response()
}

/// Validate request input
pub fn validate_input<T: Validate>(input: &T) -> Result<(), ServiceError> {
    input
        .validate()
        .map_err(|e| ServiceError::ValidationError(format!("Validation failed: {e}")))
}

/// Parses an ISO `YYYY-MM-DD` path segment and returns it zero-padded, so
/// stored dates always compare lexicographically.
pub fn parse_iso_date(raw: &str) -> Result<String, ServiceError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.format("%Y-%m-%d").to_string())
        .map_err(|_| ServiceError::InvalidInput(format!("Invalid date '{raw}', expected YYYY-MM-DD")))
}

/// Bounds-checks the year/month path segments of monthly listings.
pub fn validate_month(year: i32, month: u32) -> Result<(), ServiceError> {
    if !(1..=9999).contains(&year) {
        return Err(ServiceError::InvalidInput(format!("Invalid year '{year}'")));
    }
    if !(1..=12).contains(&month) {
        return Err(ServiceError::InvalidInput(format!("Invalid month '{month}'")));
    }
    Ok(())
}
