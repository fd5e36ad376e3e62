//! Auth client integration tests against a stand-in GoTrue server.

use serde_json::json;
use siteforge::services::AuthService;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn user_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "email": "dev@example.com",
        "user_metadata": { "full_name": "Dev One", "avatar_url": null },
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z"
    })
}

#[tokio::test]
async fn sign_up_sends_api_key_and_parses_bare_user() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .and(header("apikey", "anon-key"))
        .and(body_partial_json(json!({
            "email": "dev@example.com",
            "data": { "full_name": "Dev One" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json("user-1")))
        .expect(1)
        .mount(&server)
        .await;

    let auth = AuthService::new(&server.uri(), "anon-key");
    let user = auth
        .sign_up("dev@example.com", "hunter22", Some("Dev One"))
        .await
        .expect("sign-up should succeed");

    assert_eq!(user.id, "user-1");
    assert_eq!(user.display(), "Dev One");
}

#[tokio::test]
async fn sign_up_unwraps_session_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "token-abc",
            "token_type": "bearer",
            "user": user_json("user-2")
        })))
        .mount(&server)
        .await;

    let auth = AuthService::new(&server.uri(), "anon-key");
    let user = auth
        .sign_up("dev@example.com", "hunter22", None)
        .await
        .expect("sign-up should succeed");

    assert_eq!(user.id, "user-2");
}

#[tokio::test]
async fn sign_in_returns_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "token-abc",
            "token_type": "bearer",
            "user": user_json("user-1")
        })))
        .mount(&server)
        .await;

    let auth = AuthService::new(&server.uri(), "anon-key");
    let session = auth
        .sign_in("dev@example.com", "hunter22")
        .await
        .expect("sign-in should succeed");

    assert_eq!(session.access_token, "token-abc");
    assert_eq!(session.user.id, "user-1");
}

#[tokio::test]
async fn sign_in_maps_rejection_to_invalid_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant"
        })))
        .mount(&server)
        .await;

    let auth = AuthService::new(&server.uri(), "anon-key");
    let result = auth.sign_in("dev@example.com", "wrong").await;

    assert!(matches!(result, Err(siteforge::Error::InvalidCredentials)));
}

#[tokio::test]
async fn sign_out_posts_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .and(header("Authorization", "Bearer token-abc"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let auth = AuthService::new(&server.uri(), "anon-key");
    auth.sign_out("token-abc").await.expect("sign-out should succeed");
}

#[tokio::test]
async fn get_user_maps_unauthorized_to_unauthenticated() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .respond_with(ResponseTemplate::new(401).set_body_string("expired"))
        .mount(&server)
        .await;

    let auth = AuthService::new(&server.uri(), "anon-key");
    let result = auth.get_user("stale-token").await;

    assert!(matches!(result, Err(siteforge::Error::Unauthenticated)));
}

#[tokio::test]
async fn reset_password_posts_email() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/recover"))
        .and(body_partial_json(json!({ "email": "dev@example.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let auth = AuthService::new(&server.uri(), "anon-key");
    auth.reset_password("dev@example.com")
        .await
        .expect("recovery should succeed");
}

#[tokio::test]
async fn update_password_and_profile_put_user() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/auth/v1/user"))
        .and(body_partial_json(json!({ "password": "new-secret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json("user-1")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/auth/v1/user"))
        .and(body_partial_json(json!({ "data": { "full_name": "Dev Renamed" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json("user-1")))
        .expect(1)
        .mount(&server)
        .await;

    let auth = AuthService::new(&server.uri(), "anon-key");

    auth.update_password("token-abc", "new-secret")
        .await
        .expect("password update should succeed");

    auth.update_profile("token-abc", Some("Dev Renamed"), None)
        .await
        .expect("profile update should succeed");
}
