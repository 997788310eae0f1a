//! Integration tests for the WebSocket handshake origin check.

mod common;

use common::{ServerOptions, TestClient, TestServer};
use tokio_tungstenite::tungstenite::Error as WsError;

async fn restricted_server() -> TestServer {
    TestServer::spawn_with(ServerOptions {
        allow_origins: vec!["https://play.example.com"],
        ..Default::default()
    })
    .await
    .expect("Failed to spawn test server")
}

#[tokio::test]
async fn test_listed_origin_is_accepted() {
    let server = restricted_server().await;
    let mut client = TestClient::connect_with_origin(&server.address(), "https://play.example.com")
        .await
        .expect("handshake should succeed");
    let snapshot = client.recv_json().await.unwrap();
    assert_eq!(snapshot["type"], "players");
}

#[tokio::test]
async fn test_unlisted_origin_gets_403() {
    let server = restricted_server().await;
    let result = TestClient::connect_with_origin(&server.address(), "https://evil.example.net").await;
    match result {
        Err(WsError::Http(response)) => assert_eq!(response.status(), 403),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("handshake should have been rejected"),
    }
}

#[tokio::test]
async fn test_open_server_accepts_any_origin() {
    let server = TestServer::spawn().await.unwrap();
    let mut client = TestClient::connect_with_origin(&server.address(), "https://anywhere.test")
        .await
        .unwrap();
    assert_eq!(client.recv_json().await.unwrap()["type"], "players");
}
