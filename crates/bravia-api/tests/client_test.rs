#![allow(clippy::unwrap_used)]
// Integration tests for `BraviaClient` using wiremock.

use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bravia_api::{BraviaClient, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, BraviaClient, String) {
    let server = MockServer::start().await;
    let address = server
        .uri()
        .strip_prefix("http://")
        .map(String::from)
        .unwrap();
    (server, BraviaClient::with_client(reqwest::Client::new()), address)
}

fn psk(value: &str) -> SecretString {
    SecretString::from(value.to_string())
}

// ── Discovery tests ─────────────────────────────────────────────────

#[tokio::test]
async fn test_discovery_sends_rpc_body_and_parses_entries() {
    let (server, client, address) = setup().await;

    let expected_body = json!({
        "method": "getRemoteControllerInfo",
        "params": [],
        "id": 54,
        "version": "1.0",
    });

    let response = json!({
        "result": [
            { "bundled": true, "type": "RM-J1100" },
            [
                { "name": "VolumeUp", "value": "AAAAAQAAAAEAAAASAw==" },
                { "name": "VolumeDown", "value": "AAAAAQAAAAEAAAATAw==" },
            ],
        ],
        "id": 54,
    });

    Mock::given(method("POST"))
        .and(path("/sony/system"))
        .and(body_json(&expected_body))
        .respond_with(ResponseTemplate::new(200).set_body_json(&response))
        .expect(1)
        .mount(&server)
        .await;

    let entries = client.remote_controller_info(&address).await.unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].name, "VolumeUp");
    assert_eq!(entries[0].value, "AAAAAQAAAAEAAAASAw==");
    assert_eq!(entries[1].name, "VolumeDown");
}

#[tokio::test]
async fn test_discovery_missing_result_is_malformed() {
    let (server, client, address) = setup().await;

    Mock::given(method("POST"))
        .and(path("/sony/system"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 54 })))
        .mount(&server)
        .await;

    let result = client.remote_controller_info(&address).await;
    assert!(
        matches!(result, Err(Error::MalformedResponse { .. })),
        "expected MalformedResponse, got: {result:?}"
    );
}

#[tokio::test]
async fn test_discovery_short_result_is_malformed() {
    let (server, client, address) = setup().await;

    // `result` present, but the command-list element is missing.
    let response = json!({ "result": [ { "type": "RM-J1100" } ], "id": 54 });

    Mock::given(method("POST"))
        .and(path("/sony/system"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&response))
        .mount(&server)
        .await;

    let result = client.remote_controller_info(&address).await;
    assert!(matches!(result, Err(Error::MalformedResponse { .. })));
}

#[tokio::test]
async fn test_discovery_rpc_error_is_malformed() {
    let (server, client, address) = setup().await;

    let response = json!({ "error": [7, "Illegal State"], "id": 54 });

    Mock::given(method("POST"))
        .and(path("/sony/system"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&response))
        .mount(&server)
        .await;

    let result = client.remote_controller_info(&address).await;
    assert!(matches!(result, Err(Error::MalformedResponse { .. })));
}

#[tokio::test]
async fn test_discovery_http_error_status() {
    let (server, client, address) = setup().await;

    Mock::given(method("POST"))
        .and(path("/sony/system"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = client.remote_controller_info(&address).await;
    assert!(matches!(result, Err(Error::Status { status: 500 })));
}

// ── IRCC tests ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_send_ircc_headers_and_envelope() {
    let (server, client, address) = setup().await;

    Mock::given(method("POST"))
        .and(path("/sony/IRCC"))
        .and(header("Content-Type", "text/xml; charset=UTF-8"))
        .and(header("X-Auth-PSK", "0000"))
        .and(header(
            "SOAPACTION",
            "\"urn:schemas-sony-com:service:IRCC:1#X_SendIRCC\"",
        ))
        .and(body_string_contains("<IRCCCode>AAAA</IRCCCode>"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client.send_ircc(&address, &psk("0000"), "AAAA").await.unwrap();
}

#[tokio::test]
async fn test_send_ircc_auth_rejected() {
    let (server, client, address) = setup().await;

    Mock::given(method("POST"))
        .and(path("/sony/IRCC"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let result = client.send_ircc(&address, &psk("wrong"), "AAAA").await;
    match result {
        Err(err @ Error::Status { status: 403 }) => assert!(err.is_auth_rejected()),
        other => panic!("expected Status 403, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_address_fails_before_network() {
    let (_server, client, _address) = setup().await;

    let result = client.remote_controller_info("not a host").await;
    assert!(matches!(result, Err(Error::InvalidUrl(_))));
}
