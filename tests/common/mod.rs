//! Test harness: the real router and migrations over in-memory SQLite.

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header::CONTENT_TYPE, Method, Request, StatusCode};
use axum::Router;
use salon_api::config::AppConfig;
use salon_api::db::{self, DbConfig};
use salon_api::AppState;
use serde_json::Value;
use tower::ServiceExt;

pub struct TestApp {
    router: Router,
}

impl TestApp {
    /// Fresh application backed by its own in-memory database with the full
    /// schema and seed data applied.
    pub async fn new() -> Self {
        // A single pooled connection keeps every statement on the same
        // in-memory database.
        let db_cfg = DbConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(300),
            acquire_timeout: Duration::from_secs(5),
        };
        let pool = db::establish_connection_with_config(&db_cfg)
            .await
            .expect("failed to open in-memory database");
        db::run_migrations(&pool).await.expect("migrations failed");

        let cfg = AppConfig::new("sqlite::memory:", "127.0.0.1", 0, "test");
        let state = AppState::new(Arc::new(pool), cfg);

        Self {
            router: salon_api::app_router(state),
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }
}

/// Parses a JSON money field (serialized as a decimal string) for
/// scale-insensitive comparison.
#[allow(dead_code)]
pub fn money(value: &Value) -> rust_decimal::Decimal {
    value
        .as_str()
        .unwrap_or_else(|| panic!("expected decimal string, got {value}"))
        .parse()
        .expect("invalid decimal")
}
