//! Wire shape of the data endpoints.

mod common;

use chrono::NaiveDate;
use netzooe_eservice::{ConsentStatus, ConsumptionBranch, Pod};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{client, mount_login, requests_to, TOKEN};

async fn mount_get(server: &MockServer, request_path: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(request_path))
        .and(header("x-xsrf-token", TOKEN))
        .and(header("content-type", "application/json"))
        .and(header("client-id", "netzonline"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_dashboard() {
    let server = MockServer::start().await;
    mount_login(&server, 1).await;
    mount_get(&server, "/service/v1.0/dashboard", json!({"contractAccounts": 2})).await;

    let mut client = client(&server);
    let result = client.dashboard().await.unwrap();
    assert_eq!(result["contractAccounts"], 2);
}

#[tokio::test]
async fn test_consents_with_multiple_statuses() {
    let server = MockServer::start().await;
    mount_login(&server, 1).await;
    Mock::given(method("GET"))
        .and(path("/service/v1.0/consents"))
        .and(query_param("status", "ACTIVE,ACTIVE_UNCHANGEABLE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client(&server);
    let result = client
        .consents(&[ConsentStatus::Active, ConsentStatus::ActiveUnchangeable])
        .await
        .unwrap();
    assert!(result.is_empty());

    let requests = requests_to(&server, "/service/v1.0/consents").await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.query(), Some("status=ACTIVE,ACTIVE_UNCHANGEABLE"));
}

#[tokio::test]
async fn test_consents_with_single_status() {
    let server = MockServer::start().await;
    mount_login(&server, 1).await;
    Mock::given(method("GET"))
        .and(path("/service/v1.0/consents"))
        .and(query_param("status", "ACTIVE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client(&server);
    let result = client.consents(&[ConsentStatus::Active]).await.unwrap();
    assert_eq!(result, vec![json!({"id": 1})]);
}

#[tokio::test]
async fn test_consents_without_filter() {
    let server = MockServer::start().await;
    mount_login(&server, 1).await;
    mount_get(&server, "/service/v1.0/consents", json!([])).await;

    let mut client = client(&server);
    client.consents(&[]).await.unwrap();

    let requests = requests_to(&server, "/service/v1.0/consents").await;
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn test_consumption_profiles() {
    let server = MockServer::start().await;
    mount_login(&server, 1).await;
    Mock::given(method("GET"))
        .and(path("/service/v1.0/consumptions/profiles"))
        .and(query_param("branch", "STROM"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client(&server);
    let result = client
        .consumption_profiles(&[ConsumptionBranch::Electricity])
        .await
        .unwrap();
    assert!(result.is_empty());
}

#[tokio::test]
async fn test_consumption_profiles_without_filter() {
    let server = MockServer::start().await;
    mount_login(&server, 1).await;
    mount_get(&server, "/service/v1.0/consumptions/profiles", json!([])).await;

    let mut client = client(&server);
    client.consumption_profiles(&[]).await.unwrap();

    let requests = requests_to(&server, "/service/v1.0/consumptions/profiles").await;
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn test_contract_account() {
    let server = MockServer::start().await;
    mount_login(&server, 1).await;
    mount_get(&server, "/service/v1.0/contract-accounts/123/345", json!({"accountNumber": "345"})).await;

    let mut client = client(&server);
    let result = client.contract_account("123", "345").await.unwrap();
    assert_eq!(result["accountNumber"], "345");
}

#[tokio::test]
async fn test_consumption_profile() {
    let server = MockServer::start().await;
    mount_login(&server, 1).await;
    Mock::given(method("POST"))
        .and(path("/service/v1.0/consumptions/profile/active"))
        .and(header("x-xsrf-token", TOKEN))
        .and(body_json(json!({
            "pods": [
                {
                    "contractAccountNumber": "123",
                    "energyCommunityId": "345",
                    "type": "mocked-profile",
                    "bestAvailableGranularity": "mocked-granularity",
                    "meterPointAdministrationNumber": "AT123",
                    "timerange": {"from": "2026-01-01", "to": "2026-01-30"}
                },
                {
                    "contractAccountNumber": "124",
                    "energyCommunityId": "346",
                    "type": "QUARTER_HOUR",
                    "bestAvailableGranularity": "DAY",
                    "meterPointAdministrationNumber": "AT124",
                    "timerange": {"from": "2026-02-01", "to": "2026-02-28"}
                }
            ],
            "dimension": "ENERGY"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let pods = vec![
        Pod::new(
            "123",
            "345",
            "mocked-profile",
            "mocked-granularity",
            "AT123",
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 30).unwrap(),
        ),
        Pod::new(
            "124",
            "346",
            "QUARTER_HOUR",
            "DAY",
            "AT124",
            NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 2, 28).unwrap(),
        ),
    ];

    let mut client = client(&server);
    let result = client.consumption_profile(&pods).await.unwrap();
    assert!(result.is_empty());
}
