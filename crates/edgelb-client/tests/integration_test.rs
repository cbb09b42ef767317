//! Integration tests for the Edge-LB client
//!
//! These tests require a reachable Edge-LB API.
//! Set EDGELB_URL (and EDGELB_TOKEN on secured clusters) to run.

use edgelb_client::{EdgeLbClient, EdgeLbError};

fn client_from_env() -> EdgeLbClient {
    let url = std::env::var("EDGELB_URL")
        .unwrap_or_else(|_| "http://localhost:8080/service/edgelb".to_string());
    let token = std::env::var("EDGELB_TOKEN").ok();

    EdgeLbClient::new(url, token).expect("Failed to create client")
}

#[tokio::test]
#[ignore] // Requires running Edge-LB instance
async fn test_ping() {
    let client = client_from_env();
    client.ping().await.expect("Edge-LB API should be reachable");
}

#[tokio::test]
#[ignore]
async fn test_unknown_pool_is_not_found() {
    let client = client_from_env();

    let result = client.get_pool("zz-integration-test-nonexistent-pool").await;
    assert!(
        matches!(result, Err(EdgeLbError::NotFound(_))),
        "Expected NotFound, got {:?}",
        result
    );
}
