//! Integration tests for the forum HTTP client

use forum_core::{MemoryTokenStore, TokenStore};
use forum_http::client::error::UNEXPECTED_SERVER_ERROR;
use forum_http::types::{
    CommentData, LoginRequest, PostData, ProfileUpdate, ThreadQuery, VoteDirection,
};
use forum_http::{ClientError, ForumClient};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn thread_json(id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "username": "frog",
        "title": format!("Thread {id}"),
        "content": "ribbit",
        "category": "General",
        "created_at": "2024-12-01T10:00:00Z"
    })
}

/// Base URL of a local port with nothing listening on it
fn closed_port_uri() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

#[tokio::test]
async fn test_client_builder() {
    let client = ForumClient::builder()
        .base_url("http://localhost:8080/")
        .build();

    assert!(client.is_ok());
    let client = client.unwrap();
    assert_eq!(client.base_url(), "http://localhost:8080");
}

#[tokio::test]
async fn test_client_builder_requires_base_url() {
    let result = ForumClient::builder().build();
    assert!(matches!(result, Err(ClientError::Configuration(_))));
}

#[tokio::test]
async fn test_login_posts_credentials() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({"username": "frog", "password": "ribbit123"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"message": "login successful", "token": "a.b.c"})),
        )
        .mount(&mock_server)
        .await;

    let client = ForumClient::new(mock_server.uri()).unwrap();
    let response = client
        .login(&LoginRequest {
            username: "frog".into(),
            password: "ribbit123".into(),
        })
        .await
        .unwrap();
    assert_eq!(response.token, "a.b.c");
}

#[tokio::test]
async fn test_error_body_message_is_surfaced() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "invalid credentials"})))
        .mount(&mock_server)
        .await;

    let client = ForumClient::new(mock_server.uri()).unwrap();
    let result = client
        .login(&LoginRequest {
            username: "frog".into(),
            password: "wrong1234".into(),
        })
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err, ClientError::AuthenticationFailed(_)));
    assert_eq!(err.server_message(), Some("invalid credentials"));
}

#[tokio::test]
async fn test_error_without_body_uses_fallback() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/threads/4"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = ForumClient::new(mock_server.uri()).unwrap();
    let err = client.delete_thread(4).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.server_message(), Some(UNEXPECTED_SERVER_ERROR));
}

#[tokio::test]
async fn test_unreachable_server_is_a_connection_failure() {
    let client = ForumClient::new(closed_port_uri()).unwrap();
    let err = client.list_threads(&ThreadQuery::default()).await.unwrap_err();
    assert!(err.is_connection_failure());
    assert_eq!(err.server_message(), None);
}

#[tokio::test]
async fn test_bearer_token_read_from_store() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/threads/post"))
        .and(header("authorization", "Bearer stored-token"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"message": "thread created successfully"})))
        .mount(&mock_server)
        .await;

    let store = Arc::new(MemoryTokenStore::with_token("stored-token"));
    let client = ForumClient::builder()
        .base_url(mock_server.uri())
        .token_store(store.clone())
        .build()
        .unwrap();

    let post = PostData {
        username: "frog".into(),
        title: "Hello".into(),
        content: "World".into(),
        category: "General".into(),
    };
    assert!(client.post_thread(&post).await.is_ok());

    // After clearing, no header is sent and the mock no longer matches
    store.clear().unwrap();
    assert!(client.post_thread(&post).await.is_err());
}

#[tokio::test]
async fn test_list_threads_sends_filters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/threads"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "5"))
        .and(query_param("category", "Frogs"))
        .and(query_param("search", "lily pad"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"threads": [thread_json(1), thread_json(2)]})))
        .mount(&mock_server)
        .await;

    let client = ForumClient::new(mock_server.uri()).unwrap();
    let query = ThreadQuery {
        page: 2,
        limit: 5,
        category: Some("Frogs".into()),
        search: Some("lily pad".into()),
        ..ThreadQuery::default()
    };
    let threads = client.list_threads(&query).await.unwrap();
    assert_eq!(threads.len(), 2);
    assert_eq!(threads[1].title, "Thread 2");
}

#[tokio::test]
async fn test_empty_thread_list_is_null() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/threads"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"threads": null})))
        .mount(&mock_server)
        .await;

    let client = ForumClient::new(mock_server.uri()).unwrap();
    assert!(client.list_threads(&ThreadQuery::default()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_comment_endpoints_use_thread_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/threads/7/comments"))
        .and(body_json(json!({"content": "nice"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "message": "comment created successfully",
            "comment": {
                "id": 11,
                "thread_id": 7,
                "username": "frog",
                "content": "nice",
                "created_at": "2024-12-01T10:00:00Z"
            }
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/threads/7/comments/11"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "comment updated successfully"})))
        .mount(&mock_server)
        .await;

    let client = ForumClient::new(mock_server.uri()).unwrap();
    let comment = client
        .post_comment(7, &CommentData { content: "nice".into() })
        .await
        .unwrap();
    assert_eq!(comment.id, 11);

    let edited = client
        .edit_comment(7, 11, &CommentData { content: "nicer".into() })
        .await
        .unwrap();
    assert_eq!(edited.message.as_deref(), Some("comment updated successfully"));
}

#[tokio::test]
async fn test_votes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/threads/3/votes"))
        .and(body_json(json!({"vote": 1})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"message": "vote casted successfully"})))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/frog/3/vote_state"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"vote": 1})))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/threads/3/votes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"votes": 12})))
        .mount(&mock_server)
        .await;

    let client = ForumClient::new(mock_server.uri()).unwrap();
    client.cast_vote(3, VoteDirection::Up).await.unwrap();
    let state = client.vote_state("frog", 3).await.unwrap();
    assert_eq!(state.direction(), Some(VoteDirection::Up));
    assert_eq!(client.count_votes(3).await.unwrap().votes, 12);
}

#[tokio::test]
async fn test_profile_update() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/user/frog"))
        .and(body_json(json!({"username": "toad", "bio": "hops"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "user updated successfully"})))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/user/ghost"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "sql: no rows in result set"})))
        .mount(&mock_server)
        .await;

    let client = ForumClient::new(mock_server.uri()).unwrap();
    client
        .update_profile(
            "frog",
            &ProfileUpdate {
                username: "toad".into(),
                bio: "hops".into(),
            },
        )
        .await
        .unwrap();

    let err = client.get_profile("ghost").await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
}

#[tokio::test]
async fn test_saved_state() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/threads/9/saves"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"saved": true})))
        .mount(&mock_server)
        .await;

    let client = ForumClient::new(mock_server.uri()).unwrap();
    assert!(client.is_saved(9).await.unwrap().saved);
}
