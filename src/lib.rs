//! Salon back-office API
//!
//! Records daily transactions and expenses, maintains reference data
//! (customers, staff, services, expense types) and produces aggregate
//! reports.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]

pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod health;
pub mod services;
pub mod tracing_ext;

use axum::http::{HeaderValue, Method, StatusCode, Uri};
use axum::{response::IntoResponse, routing::get, Json, Router};
use sea_orm::DatabaseConnection;
use serde_json::json;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub services: services::AppServices,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>, config: config::AppConfig) -> Self {
        let services = services::AppServices::new(db::DatabaseAccess::new(db.clone()));
        Self {
            db,
            config,
            services,
        }
    }
}

/// All resource routes, mounted at the root.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/records", handlers::records::record_routes())
        .nest("/expenses", handlers::expenses::expense_routes())
        .nest("/customers", handlers::customers::customer_routes())
        .nest("/services", handlers::catalog::service_routes())
        .nest("/staff", handlers::catalog::staff_routes())
        .nest("/expense-types", handlers::catalog::expense_type_routes())
        .nest("/reports", handlers::reports::report_routes())
}

/// Builds the complete application router with middleware stack applied.
pub fn app_router(state: AppState) -> Router {
    let cors_layer = build_cors_layer(&state.config);

    Router::new()
        .route("/health", get(health::health_check))
        .merge(api_routes())
        .fallback(not_found)
        .layer(tracing_ext::configure_http_tracing())
        .layer(CompressionLayer::new())
        .layer(cors_layer)
        .layer(axum::middleware::from_fn(
            tracing_ext::request_id_middleware,
        ))
        .with_state(state)
}

fn build_cors_layer(cfg: &config::AppConfig) -> CorsLayer {
    let configured_origins: Option<Vec<HeaderValue>> = cfg
        .cors_allowed_origins
        .as_ref()
        .map(|raw| {
            raw.split(',')
                .filter_map(|origin| {
                    let trimmed = origin.trim();
                    if trimmed.is_empty() {
                        None
                    } else {
                        HeaderValue::from_str(trimmed).ok()
                    }
                })
                .collect::<Vec<_>>()
        })
        .filter(|origins| !origins.is_empty());

    if let Some(origins) = configured_origins {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        info!("No CORS origins configured; using permissive CORS");
        CorsLayer::permissive()
    }
}

/// Uniform JSON body for unmatched routes.
async fn not_found(method: Method, uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "error": "Route not found",
            "path": uri.path(),
            "method": method.as_str(),
        })),
    )
}
