//! GitHub client tests for single-file commits, branch listing, repository
//! setup, and workflow installation.

use base64::Engine;
use serde_json::json;
use siteforge::services::GitHubService;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn repo_json(default_branch: &str) -> serde_json::Value {
    json!({
        "node_id": "R_abc123",
        "name": "demo-site",
        "full_name": "octo/demo-site",
        "description": "demo",
        "private": true,
        "html_url": "https://github.com/octo/demo-site",
        "clone_url": "https://github.com/octo/demo-site.git",
        "default_branch": default_branch,
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z"
    })
}

#[tokio::test]
async fn create_file_encodes_content_as_base64() {
    let server = MockServer::start().await;
    let encoded = base64::engine::general_purpose::STANDARD.encode("<html></html>");

    Mock::given(method("PUT"))
        .and(path("/repos/octo/demo-site/contents/index.html"))
        .and(body_partial_json(json!({
            "message": "Add index page",
            "content": encoded,
            "branch": "main"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "content": { "path": "index.html" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let github = GitHubService::new(&server.uri());
    github
        .create_file(
            "octo",
            "demo-site",
            "index.html",
            "<html></html>",
            "Add index page",
            Some("main"),
            "test-token",
        )
        .await
        .expect("file creation should succeed");
}

#[tokio::test]
async fn update_file_reads_current_sha_first() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/demo-site/contents/index.html"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sha": "old-file-sha",
            "path": "index.html"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/repos/octo/demo-site/contents/index.html"))
        .and(body_partial_json(json!({ "sha": "old-file-sha" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": { "path": "index.html" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let github = GitHubService::new(&server.uri());
    github
        .update_file(
            "octo",
            "demo-site",
            "index.html",
            "<html>v2</html>",
            "Update index page",
            Some("main"),
            "test-token",
        )
        .await
        .expect("file update should succeed");
}

#[tokio::test]
async fn list_branches_maps_commit_and_protection() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/demo-site/branches"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "name": "main",
                "commit": { "sha": "abc", "url": "https://api.github.com/c/abc" },
                "protected": true
            },
            {
                "name": "feature/login",
                "commit": { "sha": "def", "url": "https://api.github.com/c/def" }
            }
        ])))
        .mount(&server)
        .await;

    let github = GitHubService::new(&server.uri());
    let branches = github
        .list_branches("octo", "demo-site", "test-token")
        .await
        .expect("listing should succeed");

    assert_eq!(branches.len(), 2);
    assert!(branches[0].protected);
    assert_eq!(branches[1].commit.sha, "def");
    assert!(!branches[1].protected);
}

#[tokio::test]
async fn setup_repository_returns_html_url() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user/repos"))
        .and(body_partial_json(json!({
            "name": "demo-site",
            "private": true,
            "auto_init": true
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(repo_json("main")))
        .expect(1)
        .mount(&server)
        .await;

    let github = GitHubService::new(&server.uri());
    let url = github
        .setup_repository("demo-site", Some("demo"), true, "test-token")
        .await
        .expect("repository setup should succeed");

    assert_eq!(url, "https://github.com/octo/demo-site");
}

#[tokio::test]
async fn setup_cicd_commits_workflow_file() {
    let server = MockServer::start().await;

    // create_file resolves the default branch first.
    Mock::given(method("GET"))
        .and(path("/repos/octo/demo-site"))
        .respond_with(ResponseTemplate::new(200).set_body_json(repo_json("main")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/repos/octo/demo-site/contents/.github/workflows/ci-cd.yml"))
        .and(body_partial_json(json!({
            "message": "Add GitHub Actions workflow: ci-cd.yml",
            "branch": "main"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "content": { "path": ".github/workflows/ci-cd.yml" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let github = GitHubService::new(&server.uri());
    let url = github
        .setup_cicd(
            "octo",
            "demo-site",
            "npm run build",
            "npm test",
            Default::default(),
            "test-token",
        )
        .await
        .expect("workflow setup should succeed");

    assert_eq!(
        url,
        "https://github.com/octo/demo-site/actions/workflows/ci-cd.yml"
    );
}
