use crate::errors::ServiceError;
use crate::handlers::common::{parse_iso_date, success_response};
use crate::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
    Router,
};

async fn daily_summary(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    let date = parse_iso_date(&date)?;
    let summary = state.services.reports.daily_summary(&date).await?;
    Ok(success_response(summary))
}

async fn staff_performance(
    State(state): State<AppState>,
    Path((start_date, end_date)): Path<(String, String)>,
) -> Result<impl IntoResponse, ServiceError> {
    let start_date = parse_iso_date(&start_date)?;
    let end_date = parse_iso_date(&end_date)?;
    let report = state
        .services
        .reports
        .staff_performance(&start_date, &end_date)
        .await?;
    Ok(success_response(report))
}

async fn service_analysis(
    State(state): State<AppState>,
    Path((start_date, end_date)): Path<(String, String)>,
) -> Result<impl IntoResponse, ServiceError> {
    let start_date = parse_iso_date(&start_date)?;
    let end_date = parse_iso_date(&end_date)?;
    let report = state
        .services
        .reports
        .service_analysis(&start_date, &end_date)
        .await?;
    Ok(success_response(report))
}

pub fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/daily-summary/:date", get(daily_summary))
        .route("/staff-performance/:start_date/:end_date", get(staff_performance))
        .route("/service-analysis/:start_date/:end_date", get(service_analysis))
}
