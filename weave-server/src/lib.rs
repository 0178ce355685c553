//! # Figweave Server Library
//!
//! Shared types and functionality for the figweave server.
//! This library is used by both the binary and integration tests.

use axum::{
    routing::{get, post},
    Router,
};

pub mod artifacts;
pub mod figma;
pub mod health;
pub mod pages;
pub mod routes;

pub use artifacts::{ArtifactPair, ArtifactStore};
pub use figma::{FigmaClient, FigmaError};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Upstream Figma API client.
    pub figma: FigmaClient,
    /// On-disk store for generated exports.
    pub artifacts: ArtifactStore,
}

/// The application router, without middleware layers.
///
/// The binary wraps this with tracing, request-id, and CORS layers;
/// integration tests drive it directly.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/convert", post(routes::convert))
        .route("/download/{filename}", get(routes::download))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(state)
}
