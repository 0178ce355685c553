//! Health check endpoints.
//!
//! - `/health/live` - Liveness probe (restart if fails)
//! - `/health/ready` - Readiness probe (remove from LB if fails)

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::AppState;

/// Health status response.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    /// Overall status: "healthy" or "unhealthy"
    pub status: &'static str,
    /// Server version
    pub version: &'static str,
    /// Individual component checks
    pub checks: HealthChecks,
}

/// Individual health checks.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    /// Artifact directory accessible
    pub artifact_store: bool,
}

/// Liveness probe - is the server running?
#[tracing::instrument(name = "liveness_probe")]
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// Readiness probe - is the server ready to accept traffic?
///
/// Verifies the artifact directory is still present and is a directory.
#[tracing::instrument(name = "readiness_probe", skip(state))]
pub async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    let store_ok = tokio::fs::metadata(state.artifacts.dir())
        .await
        .map(|metadata| metadata.is_dir())
        .unwrap_or(false);

    let status = HealthStatus {
        status: if store_ok { "healthy" } else { "unhealthy" },
        version: env!("CARGO_PKG_VERSION"),
        checks: HealthChecks {
            artifact_store: store_ok,
        },
    };

    let code = if store_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (code, Json(status))
}
