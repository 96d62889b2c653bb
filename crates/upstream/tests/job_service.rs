//! Tests for `JobServiceClient` against a mocked deployment endpoint.

use std::time::Duration;

use assert_matches::assert_matches;
use media_engine_core::jobs::{JobSubmission, WorkflowKind};
use media_engine_upstream::{JobServiceClient, UpstreamError};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn submission() -> JobSubmission {
    serde_json::from_value(serde_json::json!({
        "callback": "https://relay.example.com/webhook",
        "workflow_input": { "prompt": "a lighthouse at dusk", "steps": 20 },
    }))
    .unwrap()
}

fn client_for(server: &MockServer) -> JobServiceClient {
    JobServiceClient::new(
        format!("{}/image/executions/", server.uri()),
        format!("{}/video/executions/", server.uri()),
        Duration::from_secs(5),
    )
    .unwrap()
}

// ---------------------------------------------------------------------------
// Test: the exact submission is forwarded and the 2xx reply passed back
// ---------------------------------------------------------------------------

#[tokio::test]
async fn submit_forwards_body_and_returns_remote_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/image/executions/"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({
            "callback": "https://relay.example.com/webhook",
            "workflow_input": { "prompt": "a lighthouse at dusk", "steps": 20 },
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(serde_json::json!({ "execution_id": "exec-1" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .submit(WorkflowKind::Image, &submission())
        .await
        .unwrap();

    assert_eq!(response.status, 201);
    assert_eq!(response.body, serde_json::json!({ "execution_id": "exec-1" }));
}

// ---------------------------------------------------------------------------
// Test: the workflow kind selects the deployment endpoint
// ---------------------------------------------------------------------------

#[tokio::test]
async fn video_jobs_go_to_video_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/video/executions/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/image/executions/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .submit(WorkflowKind::Video, &submission())
        .await
        .unwrap();

    assert_eq!(response.body["ok"], true);
}

// ---------------------------------------------------------------------------
// Test: non-2xx replies surface the remote status and body verbatim
// ---------------------------------------------------------------------------

#[tokio::test]
async fn remote_error_status_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(422).set_body_string("workflow_input.steps: too large"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .submit(WorkflowKind::Image, &submission())
        .await
        .unwrap_err();

    assert_matches!(
        err,
        UpstreamError::Api { status: 422, ref body } if body == "workflow_input.steps: too large"
    );
}

// ---------------------------------------------------------------------------
// Test: connection failures are transport errors, not status errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unreachable_endpoint_is_transport_error() {
    let uri = unused_local_uri();

    let client = JobServiceClient::new(
        format!("{uri}/image/executions/"),
        format!("{uri}/video/executions/"),
        Duration::from_secs(2),
    )
    .unwrap();

    let err = client
        .submit(WorkflowKind::Image, &submission())
        .await
        .unwrap_err();

    assert_matches!(err, UpstreamError::Request(_));
}

// ---------------------------------------------------------------------------
// Test: slow deployments hit the client timeout
// ---------------------------------------------------------------------------

#[tokio::test]
async fn slow_endpoint_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let client = JobServiceClient::new(
        format!("{}/image/executions/", server.uri()),
        format!("{}/video/executions/", server.uri()),
        Duration::from_millis(100),
    )
    .unwrap();

    let err = client
        .submit(WorkflowKind::Image, &submission())
        .await
        .unwrap_err();

    assert_matches!(err, UpstreamError::Request(ref e) if e.is_timeout());
}

// ---------------------------------------------------------------------------
// Test: a 2xx reply that is not JSON is a decode error
// ---------------------------------------------------------------------------

#[tokio::test]
async fn non_json_success_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .submit(WorkflowKind::Image, &submission())
        .await
        .unwrap_err();

    assert_matches!(err, UpstreamError::Decode(_));
}

/// A local URL nothing is listening on.
fn unused_local_uri() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}
