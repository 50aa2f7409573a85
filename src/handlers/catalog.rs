//! Routes for the reference tables: services, staff and expense types.

use crate::errors::ServiceError;
use crate::handlers::common::{created_response, success_response, validate_input};
use crate::AppState;
use axum::{
    extract::{Json, Path, Query, State},
    response::IntoResponse,
    routing::{delete, get},
    Router,
};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogListParams {
    /// Soft-deleted rows stay hidden unless explicitly requested.
    #[serde(default)]
    pub include_inactive: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateNamedItemRequest {
    #[validate(length(min = 1, max = 160, message = "Name must be 1-160 characters"))]
    pub name: String,
}

// ---- services ----

async fn list_services(
    State(state): State<AppState>,
    Query(params): Query<CatalogListParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let services = state
        .services
        .catalog
        .list_services(params.include_inactive)
        .await?;
    Ok(success_response(services))
}

async fn create_service(
    State(state): State<AppState>,
    Json(payload): Json<CreateNamedItemRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;
    let created = state.services.catalog.create_service(payload.name).await?;
    Ok(created_response(created))
}

async fn deactivate_service(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    let updated = state.services.catalog.deactivate_service(id).await?;
    Ok(success_response(updated))
}

pub fn service_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_services).post(create_service))
        .route("/:id", delete(deactivate_service))
}

// ---- staff ----

async fn list_staff(
    State(state): State<AppState>,
    Query(params): Query<CatalogListParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let staff = state
        .services
        .catalog
        .list_staff(params.include_inactive)
        .await?;
    Ok(success_response(staff))
}

async fn create_staff(
    State(state): State<AppState>,
    Json(payload): Json<CreateNamedItemRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;
    let created = state.services.catalog.create_staff(payload.name).await?;
    Ok(created_response(created))
}

async fn deactivate_staff(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    let updated = state.services.catalog.deactivate_staff(id).await?;
    Ok(success_response(updated))
}

pub fn staff_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_staff).post(create_staff))
        .route("/:id", delete(deactivate_staff))
}

// ---- expense types ----

async fn list_expense_types(
    State(state): State<AppState>,
    Query(params): Query<CatalogListParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let expense_types = state
        .services
        .catalog
        .list_expense_types(params.include_inactive)
        .await?;
    Ok(success_response(expense_types))
}

pub fn expense_type_routes() -> Router<AppState> {
    Router::new().route("/", get(list_expense_types))
}
