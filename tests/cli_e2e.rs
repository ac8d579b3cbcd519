//! CLI end-to-end tests running the compiled binary against mock servers.

use assert_cmd::Command;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use predicates::prelude::*;
use wiremock::matchers::{body_json, method, path, path_regex};
use wiremock::{Mock, ResponseTemplate};

mod support;

use support::{AssistanceResponder, start_mock_server_or_skip, test_blob};

#[test]
fn test_help_describes_the_relay() {
    Command::cargo_bin("agnss-relay")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Relay assisted-GNSS data"));
}

#[test]
fn test_missing_service_key_is_a_config_error() {
    Command::cargo_bin("agnss-relay")
        .unwrap()
        .env_remove("AGNSS_SERVICE_KEY")
        .args([
            "--endpoint",
            "https://cloud.example/v1/location/agnss",
            "--publish-url",
            "https://data.example",
            "--quiet",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no service key"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_full_relay_run_prints_encoded_result() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };

    let blob = test_blob(3300);
    Mock::given(method("POST"))
        .and(path("/v1/location/agnss"))
        .respond_with(AssistanceResponder::new(blob.clone()))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path_regex("^/topics/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let endpoint = format!("{}/v1/location/agnss", mock_server.uri());
    let publish_url = mock_server.uri();
    let expected = format!("{{\"result\":\"{}\"}}\n", BASE64.encode(&blob));

    // The binary blocks its thread; the mock server keeps answering on the
    // other worker.
    tokio::task::spawn_blocking(move || {
        Command::cargo_bin("agnss-relay")
            .unwrap()
            .args([
                "--endpoint",
                &endpoint,
                "--publish-url",
                &publish_url,
                "--service-key",
                "test-key",
                "--quiet",
            ])
            .assert()
            .success()
            .stdout(predicate::str::diff(expected));
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_rejected_session_prints_error_and_exits_nonzero() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("POST"))
        .and(path("/v1/location/agnss"))
        .respond_with(ResponseTemplate::new(403).set_body_string("quota exceeded"))
        .mount(&mock_server)
        .await;

    let endpoint = format!("{}/v1/location/agnss", mock_server.uri());
    let publish_url = mock_server.uri();

    tokio::task::spawn_blocking(move || {
        Command::cargo_bin("agnss-relay")
            .unwrap()
            .args([
                "--endpoint",
                &endpoint,
                "--publish-url",
                &publish_url,
                "--service-key",
                "test-key",
                "--quiet",
            ])
            .assert()
            .code(1)
            .stdout(predicate::str::diff("{\"error\":\"quota exceeded\"}\n"));
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_caller_categories_forwarded_from_flags() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };

    let blob = test_blob(500);
    Mock::given(method("POST"))
        .and(path("/v1/location/agnss"))
        .and(body_json(serde_json::json!({"types": [2, 6]})))
        .respond_with(AssistanceResponder::new(blob))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path_regex("^/topics/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let endpoint = format!("{}/v1/location/agnss", mock_server.uri());
    let publish_url = mock_server.uri();

    tokio::task::spawn_blocking(move || {
        Command::cargo_bin("agnss-relay")
            .unwrap()
            .args([
                "--endpoint",
                &endpoint,
                "--publish-url",
                &publish_url,
                "--service-key",
                "test-key",
                "--type",
                "2",
                "--type",
                "6",
                "--quiet",
            ])
            .assert()
            .success();
    })
    .await
    .unwrap();

    mock_server.verify().await;
}
