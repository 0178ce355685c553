//! HTTP route handlers.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use serde::Deserialize;

use weave_core::{render_document, render_page, render_stylesheet, CssGenerator};

use crate::artifacts::ArtifactPair;
use crate::{pages, AppState};

/// Form payload of the convert route.
#[derive(Debug, Deserialize)]
pub struct ConvertForm {
    /// Figma personal access token.
    #[serde(default)]
    pub token: String,
    /// Figma file key.
    #[serde(default)]
    pub file_key: String,
}

/// A finished conversion: artifact names plus both generated sources.
#[derive(Debug)]
pub struct ConversionOutcome {
    /// Filenames the pair was stored under.
    pub pair: ArtifactPair,
    /// Full HTML page text.
    pub html: String,
    /// Full style sheet text.
    pub css: String,
}

/// `GET /` — the input form.
pub async fn index() -> Html<String> {
    Html(pages::index_page())
}

/// `POST /convert` — fetch, convert, persist, and show the results.
///
/// Stale artifacts are swept before the new pair is written. Any upstream
/// error renders the error page with the failure message verbatim; no
/// artifacts are produced in that case.
#[tracing::instrument(name = "convert", skip(state, form), fields(file_key = %form.file_key))]
pub async fn convert(State(state): State<AppState>, Form(form): Form<ConvertForm>) -> Html<String> {
    state.artifacts.sweep().await;

    match run_conversion(&state, &form).await {
        Ok(outcome) => {
            tracing::info!("Converted file {} into {}", form.file_key, outcome.pair.base);
            Html(pages::results_page(&outcome))
        }
        Err(error) => {
            tracing::error!("Conversion failed: {error}");
            Html(pages::error_page(&error.to_string()))
        }
    }
}

async fn run_conversion(
    state: &AppState,
    form: &ConvertForm,
) -> anyhow::Result<ConversionOutcome> {
    let file = state.figma.get_file(&form.token, &form.file_key).await?;

    // One generator per conversion; concurrent requests never share one.
    let mut generator = CssGenerator::new();
    let markup = render_document(&file.document, &mut generator)?;

    let pair = ArtifactPair::generate();
    let html = render_page(&markup.to_html(1), &pair.css_filename);
    let css = render_stylesheet(&generator);

    state.artifacts.write_pair(&pair, &html, &css).await?;

    Ok(ConversionOutcome { pair, html, css })
}

/// `GET /download/{filename}` — serve a generated artifact exactly once.
pub async fn download(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Response {
    match state.artifacts.take(&filename).await {
        Some(content) => {
            let content_type = if filename.ends_with(".css") {
                "text/css; charset=utf-8"
            } else {
                "text/html; charset=utf-8"
            };
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, content_type.to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{filename}\""),
                    ),
                ],
                content,
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, "File not found").into_response(),
    }
}
