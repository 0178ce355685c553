//! Full request-path tests: form submission in, downloadable artifacts
//! out, against a mocked Figma API.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use weave_server::{AppState, ArtifactStore, FigmaClient};

const FILE_JSON: &str = r#"{
    "name": "Mock File",
    "document": {
        "children": [{
            "name": "Page 1",
            "backgroundColor": { "r": 1, "g": 1, "b": 1, "a": 1 },
            "children": [{
                "type": "FRAME",
                "name": "Red Frame",
                "fills": [{ "type": "SOLID", "color": { "r": 1, "g": 0, "b": 0, "a": 1 } }],
                "children": []
            }]
        }]
    }
}"#;

async fn mock_figma(response: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/files/abc123"))
        .respond_with(response)
        .mount(&server)
        .await;
    server
}

fn state(figma_base: &str, dir: &std::path::Path) -> AppState {
    AppState {
        figma: FigmaClient::with_base(figma_base).expect("should build client"),
        artifacts: ArtifactStore::new(dir).expect("should open store"),
    }
}

fn convert_request(token: &str, file_key: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/convert")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!("token={token}&file_key={file_key}")))
        .expect("should build request")
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("should read body");
    String::from_utf8(bytes.to_vec()).expect("should be utf-8")
}

#[tokio::test]
async fn test_convert_writes_pair_and_serves_once() {
    let figma = mock_figma(ResponseTemplate::new(200).set_body_string(FILE_JSON)).await;
    let dir = tempfile::tempdir().expect("should create temp dir");
    let state = state(&figma.uri(), dir.path());

    // Convert.
    let response = weave_server::router(state.clone())
        .oneshot(convert_request("secret", "abc123"))
        .await
        .expect("should respond");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("Export ready"));

    // Both artifacts exist on disk under a shared base.
    let mut files: Vec<_> = std::fs::read_dir(dir.path())
        .expect("should list dir")
        .filter_map(Result::ok)
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    files.sort();
    assert_eq!(files.len(), 2);
    assert!(files[0].ends_with(".css"));
    assert!(files[1].ends_with(".html"));
    assert_eq!(
        files[0].trim_end_matches(".css"),
        files[1].trim_end_matches(".html")
    );

    // The generated CSS holds the interned red background rule.
    let css = std::fs::read_to_string(dir.path().join(&files[0])).expect("should read css");
    assert!(css.contains("background: rgb(255, 0, 0);"));

    // First download succeeds as an attachment.
    let response = weave_server::router(state.clone())
        .oneshot(
            Request::builder()
                .uri(format!("/download/{}", files[1]))
                .body(Body::empty())
                .expect("should build request"),
        )
        .await
        .expect("should respond");
    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .expect("should have disposition")
        .to_str()
        .expect("should be ascii");
    assert!(disposition.starts_with("attachment"));

    // The second download of the same artifact finds nothing.
    let response = weave_server::router(state)
        .oneshot(
            Request::builder()
                .uri(format!("/download/{}", files[1]))
                .body(Body::empty())
                .expect("should build request"),
        )
        .await
        .expect("should respond");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_token_shows_error_page() {
    let figma = mock_figma(ResponseTemplate::new(200).set_body_string(FILE_JSON)).await;
    let dir = tempfile::tempdir().expect("should create temp dir");
    let state = state(&figma.uri(), dir.path());

    let response = weave_server::router(state)
        .oneshot(convert_request("", "abc123"))
        .await
        .expect("should respond");

    let body = body_text(response).await;
    assert!(body.contains("Missing access token"));
    // No artifacts are produced on failure.
    assert_eq!(std::fs::read_dir(dir.path()).expect("should list").count(), 0);
}

#[tokio::test]
async fn test_upstream_error_is_shown_verbatim() {
    let figma = mock_figma(ResponseTemplate::new(403).set_body_string("Invalid token")).await;
    let dir = tempfile::tempdir().expect("should create temp dir");
    let state = state(&figma.uri(), dir.path());

    let response = weave_server::router(state)
        .oneshot(convert_request("bad", "abc123"))
        .await
        .expect("should respond");

    let body = body_text(response).await;
    assert!(body.contains("403"));
    assert!(body.contains("Invalid token"));
}

#[tokio::test]
async fn test_index_serves_the_form() {
    let figma = mock_figma(ResponseTemplate::new(200)).await;
    let dir = tempfile::tempdir().expect("should create temp dir");
    let state = state(&figma.uri(), dir.path());

    let response = weave_server::router(state)
        .oneshot(
            Request::builder()
                .uri("/")
                .body(Body::empty())
                .expect("should build request"),
        )
        .await
        .expect("should respond");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("name=\"file_key\""));
}

#[tokio::test]
async fn test_health_endpoints() {
    let figma = mock_figma(ResponseTemplate::new(200)).await;
    let dir = tempfile::tempdir().expect("should create temp dir");
    let state = state(&figma.uri(), dir.path());

    let response = weave_server::router(state.clone())
        .oneshot(
            Request::builder()
                .uri("/health/live")
                .body(Body::empty())
                .expect("should build request"),
        )
        .await
        .expect("should respond");
    assert_eq!(response.status(), StatusCode::OK);

    let response = weave_server::router(state)
        .oneshot(
            Request::builder()
                .uri("/health/ready")
                .body(Body::empty())
                .expect("should build request"),
        )
        .await
        .expect("should respond");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("\"healthy\""));
}
