//! Health check handlers
//!
//! - `GET /health`: liveness, always 200 while the process serves requests
//! - `GET /ready`: readiness, 200 when the product store answers, 503 otherwise

use std::collections::HashMap;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::repository::ProductRepository;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service name
    pub service: String,

    /// Version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Readiness check response with dependency status
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// Overall readiness status
    pub ready: bool,

    /// Service name
    pub service: String,

    /// Dependency statuses
    pub dependencies: HashMap<String, DependencyStatus>,
}

/// Individual dependency status
#[derive(Debug, Serialize, Deserialize)]
pub struct DependencyStatus {
    /// Dependency is healthy
    pub healthy: bool,

    /// Optional message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// State shared by the health routes
#[derive(Debug, Clone)]
pub struct HealthState<R> {
    service_name: String,
    repository: R,
}

impl<R: ProductRepository> HealthState<R> {
    pub fn new(service_name: impl Into<String>, repository: R) -> Self {
        Self {
            service_name: service_name.into(),
            repository,
        }
    }

    /// Build the `/health` and `/ready` routes
    pub fn router(self) -> Router {
        Router::new()
            .route("/health", get(health::<R>))
            .route("/ready", get(readiness::<R>))
            .with_state(self)
    }
}

/// Liveness probe
pub async fn health<R: ProductRepository>(State(state): State<HealthState<R>>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "healthy".to_string(),
        service: state.service_name,
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    };

    (StatusCode::OK, Json(response))
}

/// Readiness probe
pub async fn readiness<R: ProductRepository>(
    State(state): State<HealthState<R>>,
) -> impl IntoResponse {
    let database = match state.repository.ping().await {
        Ok(()) => DependencyStatus {
            healthy: true,
            message: None,
        },
        Err(e) => {
            tracing::warn!("Readiness check failed: {}", e);
            DependencyStatus {
                healthy: false,
                message: Some(e.message),
            }
        }
    };

    let ready = database.healthy;
    let mut dependencies = HashMap::new();
    dependencies.insert("database".to_string(), database);

    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(ReadinessResponse {
            ready,
            service: state.service_name,
            dependencies,
        }),
    )
}
