//! Shared helpers for the mock portal tests.

#![allow(dead_code)]

use netzooe_eservice::{ClientConfig, Credentials, EServiceClient};
use serde_json::json;
use wiremock::matchers::{body_json, header, headers, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "mocked-token-value";

/// Install a log subscriber once; honours RUST_LOG.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn config(server: &MockServer) -> ClientConfig {
    ClientConfig::with_portal_url(&server.uri())
}

pub fn client_with_config(config: ClientConfig) -> EServiceClient {
    let http = config.http_client().unwrap();
    EServiceClient::with_config(Credentials::new("test", "test"), http, config)
}

pub fn client(server: &MockServer) -> EServiceClient {
    init_tracing();
    client_with_config(config(server))
}

/// Mount `j_security_check` and the session endpoint, each expected
/// exactly `logins` times.
pub async fn mount_login(server: &MockServer, logins: u64) {
    mount_security_check(server, 200, logins).await;
    mount_session(server, TOKEN, logins).await;
}

/// Mount `j_security_check` answering `status`, expected `times` times.
pub async fn mount_security_check(server: &MockServer, status: u16, times: u64) {
    Mock::given(method("POST"))
        .and(path("/service/j_security_check"))
        .and(body_json(json!({
            "j_username": "test",
            "j_password": "test"
        })))
        .and(header("content-type", "application/json"))
        .and(header("user-agent", "Mozilla/5.0"))
        .and(headers("accept", vec!["application/json", "text/plain", "*/*"]))
        .and(header("client-id", "netzonline"))
        .respond_with(ResponseTemplate::new(status))
        .up_to_n_times(times)
        .expect(times)
        .mount(server)
        .await;
}

/// Mount the session endpoint handing out `token`, `times` times.
/// Mounted in order, later mocks take over once earlier ones are used up.
pub async fn mount_session(server: &MockServer, token: &str, times: u64) {
    let referer = format!("{}/app/login", server.uri());
    Mock::given(method("GET"))
        .and(path("/service/v1.0/session"))
        .and(header("referer", referer.as_str()))
        .and(header("client-id", "netzonline"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Set-Cookie", format!("XSRF-TOKEN={}; Path=/", token).as_str()),
        )
        .up_to_n_times(times)
        .expect(times)
        .mount(server)
        .await;
}

pub async fn mount_logout(server: &MockServer, times: u64) {
    Mock::given(method("GET"))
        .and(path("/service/logout"))
        .respond_with(ResponseTemplate::new(200))
        .expect(times)
        .mount(server)
        .await;
}

/// Requests the server received for `request_path`.
pub async fn requests_to(server: &MockServer, request_path: &str) -> Vec<wiremock::Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.url.path() == request_path)
        .collect()
}
