//! Route-level contract tests.
//!
//! Pins the gateway's HTTP contract: 405 for unsupported methods, 400 for
//! missing required fields, 401/403 for auth failures, 404 for missing
//! resources, 502 when a vendor call fails, and the fixed default object
//! when a model reply carries no JSON. Vendor servers are wiremock
//! stand-ins; `expect(0)` mocks prove no vendor call was made.

mod common;

use axum::http::{header, HeaderValue};
use axum_test::TestServer;
use common::{project_json, test_app, test_config, user_json};
use serde_json::{json, Value};
use wiremock::matchers::{any, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DUMMY: &str = "http://127.0.0.1:9";

fn bearer() -> HeaderValue {
    HeaderValue::from_static("Bearer user-token")
}

/// Mount the auth backend's user lookup for a valid token.
async fn mount_user(server: &MockServer, user_id: &str) {
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(user_json(user_id, "dev@example.com")),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn health_is_public() {
    let config = test_config(DUMMY, DUMMY, DUMMY, DUMMY);
    let server = TestServer::new(test_app(&config)).unwrap();

    let response = server.get("/health").await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>()["status"], "healthy");
}

#[tokio::test]
async fn unsupported_method_yields_405_without_vendor_call() {
    let github = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&github)
        .await;

    let config = test_config(DUMMY, &github.uri(), DUMMY, DUMMY);
    let server = TestServer::new(test_app(&config)).unwrap();

    // Registered paths, wrong methods.
    assert_eq!(server.get("/github/setup").await.status_code(), 405);
    assert_eq!(server.put("/auth/login").await.status_code(), 405);
    assert_eq!(server.delete("/code/analyze").await.status_code(), 405);
}

#[tokio::test]
async fn missing_required_fields_yield_400_without_vendor_call() {
    let supabase = MockServer::start().await;
    let github = MockServer::start().await;
    let llm = MockServer::start().await;
    for server in [&supabase, &github, &llm] {
        Mock::given(any())
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(server)
            .await;
    }

    let config = test_config(&supabase.uri(), &github.uri(), DUMMY, &llm.uri());
    let server = TestServer::new(test_app(&config)).unwrap();

    let response = server.post("/auth/login").json(&json!({})).await;
    assert_eq!(response.status_code(), 400);

    let response = server
        .post("/auth/register")
        .json(&json!({ "email": "dev@example.com" }))
        .await;
    assert_eq!(response.status_code(), 400);

    let response = server.post("/github/setup").json(&json!({})).await;
    assert_eq!(response.status_code(), 400);

    let response = server
        .post("/github/commit")
        .json(&json!({ "owner": "octo", "repo": "demo", "files": [] }))
        .await;
    assert_eq!(response.status_code(), 400);

    let response = server
        .post("/code/analyze")
        .json(&json!({ "language": "rust" }))
        .await;
    assert_eq!(response.status_code(), 400);

    let response = server
        .post("/code/fix")
        .json(&json!({ "code": "x", "language": "rust" }))
        .await;
    assert_eq!(response.status_code(), 400);

    let response = server.post("/assistant/analyze").json(&json!({})).await;
    assert_eq!(response.status_code(), 400);

    let response = server
        .post("/netlify/deploy")
        .json(&json!({ "siteId": "site-1" }))
        .await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn project_routes_require_authentication() {
    let supabase = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&supabase)
        .await;

    let config = test_config(&supabase.uri(), DUMMY, DUMMY, DUMMY);
    let server = TestServer::new(test_app(&config)).unwrap();

    let response = server.get("/projects").await;
    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn rejected_token_yields_401() {
    let supabase = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad token"))
        .mount(&supabase)
        .await;

    let config = test_config(&supabase.uri(), DUMMY, DUMMY, DUMMY);
    let server = TestServer::new(test_app(&config)).unwrap();

    let response = server
        .get("/projects")
        .add_header(header::AUTHORIZATION, bearer())
        .await;
    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn ownership_mismatch_yields_403() {
    let supabase = MockServer::start().await;
    mount_user(&supabase, "user-b").await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/projects"))
        .and(query_param("id", "eq.p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([project_json("p1", "user-a")])))
        .mount(&supabase)
        .await;

    let config = test_config(&supabase.uri(), DUMMY, DUMMY, DUMMY);
    let server = TestServer::new(test_app(&config)).unwrap();

    let response = server
        .get("/projects/p1")
        .add_header(header::AUTHORIZATION, bearer())
        .await;
    assert_eq!(response.status_code(), 403);
}

#[tokio::test]
async fn nonexistent_project_yields_404() {
    let supabase = MockServer::start().await;
    mount_user(&supabase, "user-a").await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/projects"))
        .and(query_param("id", "eq.missing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&supabase)
        .await;

    let config = test_config(&supabase.uri(), DUMMY, DUMMY, DUMMY);
    let server = TestServer::new(test_app(&config)).unwrap();

    let response = server
        .get("/projects/missing")
        .add_header(header::AUTHORIZATION, bearer())
        .await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn vendor_failure_yields_502() {
    let supabase = MockServer::start().await;
    mount_user(&supabase, "user-a").await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/projects"))
        .respond_with(ResponseTemplate::new(500).set_body_string("db down"))
        .mount(&supabase)
        .await;

    let config = test_config(&supabase.uri(), DUMMY, DUMMY, DUMMY);
    let server = TestServer::new(test_app(&config)).unwrap();

    let response = server
        .get("/projects")
        .add_header(header::AUTHORIZATION, bearer())
        .await;
    assert_eq!(response.status_code(), 502);
}

#[tokio::test]
async fn create_and_list_projects() {
    let supabase = MockServer::start().await;
    mount_user(&supabase, "user-a").await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/projects"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([project_json("p1", "user-a")])))
        .expect(1)
        .mount(&supabase)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/projects"))
        .and(query_param("user_id", "eq.user-a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([project_json("p1", "user-a")])))
        .expect(1)
        .mount(&supabase)
        .await;

    let config = test_config(&supabase.uri(), DUMMY, DUMMY, DUMMY);
    let server = TestServer::new(test_app(&config)).unwrap();

    let response = server
        .post("/projects")
        .add_header(header::AUTHORIZATION, bearer())
        .json(&json!({ "name": "demo-site", "description": "A demo project" }))
        .await;
    assert_eq!(response.status_code(), 201);
    assert_eq!(response.json::<Value>()["project"]["id"], "p1");

    let response = server
        .get("/projects")
        .add_header(header::AUTHORIZATION, bearer())
        .await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>()["projects"][0]["user_id"], "user-a");
}

#[tokio::test]
async fn login_with_invalid_credentials_yields_401() {
    let supabase = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid login credentials"
        })))
        .mount(&supabase)
        .await;

    let config = test_config(&supabase.uri(), DUMMY, DUMMY, DUMMY);
    let server = TestServer::new(test_app(&config)).unwrap();

    let response = server
        .post("/auth/login")
        .json(&json!({ "email": "dev@example.com", "password": "wrong" }))
        .await;
    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn register_returns_created_user() {
    let supabase = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(user_json("user-new", "new@example.com")),
        )
        .mount(&supabase)
        .await;

    let config = test_config(&supabase.uri(), DUMMY, DUMMY, DUMMY);
    let server = TestServer::new(test_app(&config)).unwrap();

    let response = server
        .post("/auth/register")
        .json(&json!({
            "email": "new@example.com",
            "password": "hunter22",
            "fullName": "New User"
        }))
        .await;
    assert_eq!(response.status_code(), 201);
    assert_eq!(response.json::<Value>()["user"]["id"], "user-new");
}

#[tokio::test]
async fn github_route_without_any_token_yields_401() {
    let github = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&github)
        .await;

    let mut config = test_config(DUMMY, &github.uri(), DUMMY, DUMMY);
    config.github.token = None;
    let server = TestServer::new(test_app(&config)).unwrap();

    let response = server
        .post("/github/setup")
        .json(&json!({ "projectName": "demo-site" }))
        .await;
    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn assistant_analyze_returns_placeholder_plan() {
    let config = test_config(DUMMY, DUMMY, DUMMY, DUMMY);
    let server = TestServer::new(test_app(&config)).unwrap();

    let response = server
        .post("/assistant/analyze")
        .json(&json!({
            "projectDescription": "A recipe sharing site",
            "features": ["auth", "analytics"]
        }))
        .await;
    assert_eq!(response.status_code(), 200);

    let body = response.json::<Value>();
    assert!(body["projectId"].as_str().unwrap().starts_with("proj_"));
    assert_eq!(body["analysis"]["estimatedComplexity"], "Low");
    let components = body["analysis"]["suggestedComponents"].as_array().unwrap();
    assert!(components.contains(&json!("Analytics Dashboard")));
}

#[tokio::test]
async fn code_analyze_returns_default_object_when_reply_has_no_json() {
    let llm = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                { "message": { "content": "I could not produce structured output, sorry." } }
            ]
        })))
        .expect(1)
        .mount(&llm)
        .await;

    let config = test_config(DUMMY, DUMMY, DUMMY, &llm.uri());
    let server = TestServer::new(test_app(&config)).unwrap();

    let response = server
        .post("/code/analyze")
        .json(&json!({ "code": "let x = 1;", "language": "javascript" }))
        .await;
    assert_eq!(response.status_code(), 200);

    assert_eq!(
        response.json::<Value>(),
        json!({
            "issues": [],
            "suggestions": [],
            "complexity": {
                "cyclomaticComplexity": 0,
                "maintainabilityIndex": 0,
                "linesOfCode": 0,
                "commentPercentage": 0
            },
            "summary": "Failed to parse analysis response"
        })
    );
}

#[tokio::test]
async fn code_analyze_returns_parsed_object_from_fenced_block() {
    let llm = MockServer::start().await;
    let reply = "Here is the analysis:\n```json\n{\"issues\": [{\"type\": \"warning\", \"message\": \"Unused variable\"}], \"suggestions\": [], \"complexity\": {\"cyclomaticComplexity\": 2, \"maintainabilityIndex\": 85, \"linesOfCode\": 12, \"commentPercentage\": 0}, \"summary\": \"Small and tidy\"}\n```";
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [ { "message": { "content": reply } } ]
        })))
        .mount(&llm)
        .await;

    let config = test_config(DUMMY, DUMMY, DUMMY, &llm.uri());
    let server = TestServer::new(test_app(&config)).unwrap();

    let response = server
        .post("/code/analyze")
        .json(&json!({ "code": "let x = 1;", "language": "javascript" }))
        .await;
    assert_eq!(response.status_code(), 200);

    let body = response.json::<Value>();
    assert_eq!(body["summary"], "Small and tidy");
    assert_eq!(body["complexity"]["cyclomaticComplexity"], 2);
    assert_eq!(body["issues"][0]["message"], "Unused variable");
}

#[tokio::test]
async fn code_fix_failure_of_model_api_yields_502() {
    let llm = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&llm)
        .await;

    let config = test_config(DUMMY, DUMMY, DUMMY, &llm.uri());
    let server = TestServer::new(test_app(&config)).unwrap();

    let response = server
        .post("/code/fix")
        .json(&json!({
            "code": "let x = ;",
            "language": "javascript",
            "error": "SyntaxError: Unexpected token ';'"
        }))
        .await;
    assert_eq!(response.status_code(), 502);
}
