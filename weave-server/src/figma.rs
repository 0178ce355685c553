//! Figma REST API client.
//!
//! The only upstream call the server makes: fetch a full file by key with
//! a personal access token. All failure modes surface through
//! [`FigmaError`] before any conversion starts; the conversion core never
//! sees a failed fetch.

use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

use weave_core::FileResponse;

/// Production Figma API base.
pub const DEFAULT_API_BASE: &str = "https://api.figma.com/";

/// Errors raised while fetching a file from Figma.
#[derive(Debug, Error)]
pub enum FigmaError {
    /// No access token was supplied.
    #[error("Missing access token")]
    MissingToken,

    /// No file key was supplied.
    #[error("Missing file key")]
    MissingFileKey,

    /// The API base or request URL could not be built.
    #[error("Invalid API URL: {0}")]
    Url(#[from] url::ParseError),

    /// The API answered with a non-success status.
    #[error("Figma API error: {status} - {body}")]
    Api {
        /// HTTP status of the response.
        status: StatusCode,
        /// Verbatim response body.
        body: String,
    },

    /// The request itself failed (connection, TLS, timeout).
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The response body did not parse as a file payload.
    #[error("Malformed Figma response: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// HTTP client for the Figma file endpoint.
#[derive(Debug, Clone)]
pub struct FigmaClient {
    http: reqwest::Client,
    base: Url,
}

impl FigmaClient {
    /// Client against the production API.
    ///
    /// # Errors
    ///
    /// Returns an error if the default base URL fails to parse, which
    /// would indicate a build defect.
    pub fn new() -> Result<Self, FigmaError> {
        Self::with_base(DEFAULT_API_BASE)
    }

    /// Client against an alternate API base (used by tests).
    ///
    /// # Errors
    ///
    /// Returns an error if `base` is not a valid URL.
    pub fn with_base(base: &str) -> Result<Self, FigmaError> {
        // A trailing slash keeps Url::join from eating the last segment.
        let normalized = if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{base}/")
        };
        Ok(Self {
            http: reqwest::Client::new(),
            base: Url::parse(&normalized)?,
        })
    }

    /// Fetch a full file by key.
    ///
    /// Fails fast on an empty token or key, before any network traffic.
    ///
    /// # Errors
    ///
    /// Returns a [`FigmaError`] for every failure mode: missing
    /// credentials, transport errors, non-success responses (with the
    /// verbatim body), and malformed payloads.
    pub async fn get_file(&self, token: &str, file_key: &str) -> Result<FileResponse, FigmaError> {
        if token.is_empty() {
            return Err(FigmaError::MissingToken);
        }
        if file_key.is_empty() {
            return Err(FigmaError::MissingFileKey);
        }

        let url = self.base.join(&format!("v1/files/{file_key}"))?;
        tracing::debug!("Fetching Figma file {file_key}");

        let response = self
            .http
            .get(url)
            .header("X-Figma-Token", token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Figma API error response: {body}");
            return Err(FigmaError::Api { status, body });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const FILE_JSON: &str = r#"{
        "name": "Mock File",
        "document": {
            "children": [{ "name": "Page 1", "children": [] }]
        }
    }"#;

    #[tokio::test]
    async fn test_missing_token_fails_fast() {
        let client = FigmaClient::new().expect("should build");
        let result = client.get_file("", "abc123").await;
        assert!(matches!(result, Err(FigmaError::MissingToken)));
    }

    #[tokio::test]
    async fn test_missing_file_key_fails_fast() {
        let client = FigmaClient::new().expect("should build");
        let result = client.get_file("token", "").await;
        assert!(matches!(result, Err(FigmaError::MissingFileKey)));
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/files/abc123"))
            .and(header("X-Figma-Token", "secret"))
            .respond_with(ResponseTemplate::new(200).set_body_string(FILE_JSON))
            .mount(&server)
            .await;

        let client = FigmaClient::with_base(&server.uri()).expect("should build");
        let file = client.get_file("secret", "abc123").await.expect("should fetch");

        assert_eq!(file.name, "Mock File");
        assert_eq!(file.document.children.len(), 1);
    }

    #[tokio::test]
    async fn test_non_success_surfaces_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/files/abc123"))
            .respond_with(ResponseTemplate::new(403).set_body_string("Invalid token"))
            .mount(&server)
            .await;

        let client = FigmaClient::with_base(&server.uri()).expect("should build");
        let error = client.get_file("bad", "abc123").await.expect_err("should fail");

        match error {
            FigmaError::Api { status, body } => {
                assert_eq!(status, StatusCode::FORBIDDEN);
                assert_eq!(body, "Invalid token");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/files/abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = FigmaClient::with_base(&server.uri()).expect("should build");
        let error = client.get_file("token", "abc123").await.expect_err("should fail");
        assert!(matches!(error, FigmaError::Malformed(_)));
    }
}
