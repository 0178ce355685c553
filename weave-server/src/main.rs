//! # Figweave Server
//!
//! Local web server for converting Figma files into HTML/CSS exports.
//! Binds to localhost only.

use std::net::SocketAddr;

use axum::http::{header, HeaderValue, Method};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use weave_server::{AppState, ArtifactStore, FigmaClient};

/// Default port for the figweave server.
const DEFAULT_PORT: u16 = 9427;

/// Default directory for generated artifacts, relative to the working
/// directory.
const DEFAULT_TEMP_DIR: &str = "temp";

/// Build a CORS layer that only allows localhost origins.
///
/// The server is designed to run on localhost only; requests from other
/// origins are rejected.
fn build_cors_layer(port: u16) -> CorsLayer {
    let localhost_origins = [
        format!("http://localhost:{port}"),
        format!("http://127.0.0.1:{port}"),
    ];

    let origins: Vec<HeaderValue> = localhost_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}

/// Initialize structured tracing with optional JSON format.
///
/// Set `RUST_LOG` to control log levels (default:
/// info,weave_server=debug,tower_http=debug). Set `RUST_LOG_FORMAT=json`
/// for JSON output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,weave_server=debug,tower_http=debug"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let port = std::env::var("WEAVE_PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let temp_dir =
        std::env::var("WEAVE_TEMP_DIR").unwrap_or_else(|_| DEFAULT_TEMP_DIR.to_string());

    let artifacts = ArtifactStore::new(&temp_dir)?;
    tracing::info!("Storing exports in {:?}", artifacts.dir());

    let state = AppState {
        figma: FigmaClient::new()?,
        artifacts,
    };

    let app = weave_server::router(state)
        // Request ID for tracing correlation
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        // CORS restricted to localhost only
        .layer(build_cors_layer(port))
        // Structured request tracing with timing
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("figweave server starting on http://{}", addr);
    tracing::info!("Open http://localhost:{} in your browser", port);

    axum::serve(listener, app).await?;

    Ok(())
}
