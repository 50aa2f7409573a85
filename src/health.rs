//! Process-level health probe: liveness, environment and database
//! reachability.

use crate::{db, AppState};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use tracing::error;

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let db_status = match db::check_connection(&state.db).await {
        Ok(()) => "healthy",
        Err(e) => {
            error!("Database health check failed: {}", e);
            "unhealthy"
        }
    };

    (
        StatusCode::OK,
        Json(json!({
            "status": if db_status == "healthy" { "up" } else { "degraded" },
            "version": env!("CARGO_PKG_VERSION"),
            "environment": state.config.environment,
            "checks": {
                "database": db_status,
            },
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}
