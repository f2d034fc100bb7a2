//! Shared helpers for the infra integration suites.

#![allow(dead_code)]

use hyperstore_domain::ClientConfig;
use hyperstore_infra::HyperStoreClient;
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;
use wiremock::MockServer;

pub const AUTH_HEADER: &str = "Basic YWRtaW46cHVibGlj";

/// Route client logs to the test output. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A client pointed at `server` with the given page size.
pub fn client_for(server: &MockServer, list_limit: i64) -> HyperStoreClient {
    init_tracing();
    let config =
        ClientConfig::new(server.uri()).with_auth_header(AUTH_HEADER).with_list_limit(list_limit);
    HyperStoreClient::new(&config).expect("client should build")
}

/// Wire form of a user, as the API lists it.
pub fn user_json(group_id: &str, user_id: &str) -> Value {
    json!({
        "userId": user_id,
        "groupId": group_id,
        "userType": "User",
        "active": "true",
    })
}

/// Wire form of an access/secret key pair.
pub fn key_pair(access_key: &str, secret_key: &str) -> Value {
    json!({"accessKey": access_key, "secretKey": secret_key})
}

/// Value of a query parameter on a recorded request.
pub fn query_value(request: &wiremock::Request, key: &str) -> Option<String> {
    request.url.query_pairs().find(|(k, _)| k == key).map(|(_, v)| v.into_owned())
}
