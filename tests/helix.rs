//! Integration tests for the Helix client over real HTTP.

mod common;

use common::MockHttpServer;
use serde::Deserialize;
use serde_json::Value;
use tmichat::config::Config;
use tmichat::HelixError;
use tmichat::helix::{
    ApiRequest, HelixClient, RequestSender, StreamQuery, UserQuery, VideoQuery,
};

#[derive(Debug, Deserialize)]
struct Stream {
    id: String,
    user_login: String,
}

fn config_for(server: &MockHttpServer) -> Config {
    let text = format!(
        r#"
        channel = "mychannel"

        [account]
        token = "oauth:abc123"

        [helix]
        api_host = "{}"
        client_id = "my-client"
        "#,
        server.url()
    );
    Config::from_toml(&text, |_| None).expect("valid config")
}

#[tokio::test]
async fn test_streams_request_and_next_page() {
    let server = MockHttpServer::start(vec![
        (
            200,
            r#"{"data":[{"id":"1","user_login":"alice"}],"pagination":{"cursor":"c1"}}"#,
        ),
        (200, r#"{"data":[{"id":"2","user_login":"bob"}],"pagination":{}}"#),
    ])
    .await
    .expect("Failed to start mock http server");
    let client = config_for(&server).helix_client();

    let query = StreamQuery::new()
        .user_login("alice")
        .user_login("bob")
        .first(2);
    let page = client.get_streams::<Stream>(&query).await.unwrap();
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].id, "1");
    assert_eq!(page.data[0].user_login, "alice");
    assert_eq!(page.cursor.as_deref(), Some("c1"));

    let next = page.next(&client).await.unwrap().expect("second page");
    assert_eq!(next.data[0].user_login, "bob");
    assert!(next.cursor.is_none());
    assert!(next.next(&client).await.unwrap().is_none());

    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(
        requests[0].request_line,
        "GET /helix/streams?user_login=alice&user_login=bob&first=2 HTTP/1.1"
    );
    assert_eq!(
        requests[1].request_line,
        "GET /helix/streams?user_login=alice&user_login=bob&first=2&after=c1 HTTP/1.1"
    );
    for request in &requests {
        assert_eq!(request.header("authorization"), Some("Bearer abc123"));
        assert_eq!(request.header("client-id"), Some("my-client"));
    }
}

#[tokio::test]
async fn test_unauthenticated_client_sends_no_authorization() {
    let server = MockHttpServer::start(vec![(200, r#"{"data":[]}"#)])
        .await
        .expect("Failed to start mock http server");
    let client = HelixClient::new(server.url(), "/helix");

    let response = client
        .do_request(
            ApiRequest::get("/games").with_query(vec![("name".into(), "Just Chatting".into())]),
        )
        .await
        .unwrap();
    assert!(response.is_success());

    let request = &server.requests()[0];
    assert_eq!(
        request.request_line,
        "GET /helix/games?name=Just+Chatting HTTP/1.1"
    );
    assert_eq!(request.header("authorization"), None);
    assert_eq!(request.header("client-id"), None);
    assert!(request.header("user-agent").unwrap().starts_with("tmichat/"));
}

#[tokio::test]
async fn test_users_and_api_errors() {
    let server = MockHttpServer::start(vec![
        (200, r#"{"data":[{"id":"42","login":"alice"}]}"#),
        (
            401,
            r#"{"error":"Unauthorized","status":401,"message":"Invalid OAuth token"}"#,
        ),
    ])
    .await
    .expect("Failed to start mock http server");
    let client = config_for(&server).helix_client();

    let users: Vec<Value> = client
        .get_users(&UserQuery::new().login("alice"))
        .await
        .unwrap();
    assert_eq!(users[0]["id"], "42");
    assert_eq!(
        server.requests()[0].request_line,
        "GET /helix/users?login=alice HTTP/1.1"
    );

    let err = client
        .get_videos::<Value>(&VideoQuery::new().user_id("42"))
        .await
        .unwrap_err();
    match err {
        HelixError::Api { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid OAuth token");
        }
        other => panic!("Expected api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_filter_is_rejected_locally() {
    let server = MockHttpServer::start(Vec::new())
        .await
        .expect("Failed to start mock http server");
    let client = config_for(&server).helix_client();

    let err = client
        .get_users::<Value>(&UserQuery::new())
        .await
        .unwrap_err();
    assert!(matches!(err, HelixError::MissingFilter(_)), "got {err:?}");
    assert!(server.requests().is_empty());
}
