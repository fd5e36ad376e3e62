//! Netlify client integration tests against a stand-in API server.

use serde_json::json;
use siteforge::services::{NetlifyService, RepoSettings};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn site_json(id: &str, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "url": format!("https://{}.netlify.app", name),
        "admin_url": format!("https://app.netlify.com/sites/{}", name),
        "screenshot_url": null,
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z",
        "build_settings": { "cmd": "npm run build", "dir": "out", "env": null }
    })
}

#[tokio::test]
async fn create_site_for_project_maps_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sites"))
        .and(body_partial_json(json!({
            "name": "demo-site",
            "repo": {
                "provider": "github",
                "repo": "octo/demo-site"
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(site_json("site-1", "demo-site")))
        .expect(1)
        .mount(&server)
        .await;

    let netlify = NetlifyService::new(&server.uri());
    let site = netlify
        .create_site_for_project(
            "demo-site",
            Some("npm run build"),
            Some("out"),
            Some(RepoSettings {
                provider: "github".to_string(),
                repo: "octo/demo-site".to_string(),
                private: Some(true),
                branch: Some("main".to_string()),
            }),
            "test-token",
        )
        .await
        .expect("site creation should succeed");

    assert_eq!(site.id, "site-1");
    assert_eq!(site.url, "https://demo-site.netlify.app");
    assert_eq!(
        site.build_settings.and_then(|b| b.cmd),
        Some("npm run build".to_string())
    );
}

#[tokio::test]
async fn deploy_site_marks_draft_for_previews() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sites/site-1/deploys"))
        .and(body_partial_json(json!({
            "draft": true,
            "deploy_dir": "./out",
            "message": "Preview deployment"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "deploy-1",
            "site_id": "site-1",
            "state": "uploading",
            "deploy_url": "https://deploy-1--demo-site.netlify.app",
            "created_at": "2024-01-01T00:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let netlify = NetlifyService::new(&server.uri());
    let url = netlify
        .deploy_site("site-1", "./out", "Preview deployment", true, "test-token")
        .await
        .expect("deploy should succeed");

    assert_eq!(url, "https://deploy-1--demo-site.netlify.app");
}

#[tokio::test]
async fn deploy_falls_back_to_plain_url_field() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sites/site-1/deploys"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "deploy-2",
            "site_id": "site-1",
            "state": "ready",
            "url": "https://demo-site.netlify.app"
        })))
        .mount(&server)
        .await;

    let netlify = NetlifyService::new(&server.uri());
    let url = netlify
        .deploy_site("site-1", "./out", "Production deployment", false, "test-token")
        .await
        .expect("deploy should succeed");

    assert_eq!(url, "https://demo-site.netlify.app");
}

#[tokio::test]
async fn continuous_deployment_updates_site_then_creates_hook() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/sites/site-1"))
        .and(body_partial_json(json!({
            "repo": {
                "provider": "github",
                "repo": "octo/demo-site",
                "branch": "main"
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(site_json("site-1", "demo-site")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/sites/site-1/build_hooks"))
        .and(body_partial_json(json!({ "branch": "main" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "hook-1",
            "site_id": "site-1",
            "title": "Continuous deployment",
            "url": "https://api.netlify.com/build_hooks/hook-1",
            "branch": "main"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let netlify = NetlifyService::new(&server.uri());
    let hook = netlify
        .setup_continuous_deployment(
            "site-1",
            RepoSettings {
                provider: "github".to_string(),
                repo: "octo/demo-site".to_string(),
                private: Some(true),
                branch: Some("main".to_string()),
            },
            Some("npm run build"),
            Some("out"),
            "test-token",
        )
        .await
        .expect("continuous deployment setup should succeed");

    assert_eq!(hook.id, "hook-1");
    assert_eq!(hook.branch.as_deref(), Some("main"));
}

#[tokio::test]
async fn vendor_error_surfaces_as_netlify_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sites/missing"))
        .respond_with(ResponseTemplate::new(500).set_body_string("server error"))
        .mount(&server)
        .await;

    let netlify = NetlifyService::new(&server.uri());
    let result = netlify.get_site("missing", "test-token").await;

    assert!(matches!(result, Err(siteforge::Error::Netlify(_))));
}

#[tokio::test]
async fn missing_site_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sites/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let netlify = NetlifyService::new(&server.uri());
    let result = netlify.get_site("missing", "test-token").await;

    assert!(matches!(result, Err(siteforge::Error::NotFound(_))));
}

#[tokio::test]
async fn list_sites_and_delete_site() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sites"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            site_json("site-1", "demo-site"),
            site_json("site-2", "other-site")
        ])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/sites/site-2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let netlify = NetlifyService::new(&server.uri());

    let sites = netlify
        .list_sites("test-token")
        .await
        .expect("listing should succeed");
    assert_eq!(sites.len(), 2);
    assert_eq!(sites[1].name, "other-site");

    netlify
        .delete_site("site-2", "test-token")
        .await
        .expect("deletion should succeed");
}

#[tokio::test]
async fn get_deploy_and_cancel_deploy() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sites/site-1/deploys/deploy-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "deploy-1",
            "site_id": "site-1",
            "state": "building",
            "deploy_url": "https://deploy-1--demo-site.netlify.app"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/sites/site-1/deploys/deploy-1/cancel"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "deploy-1" })))
        .expect(1)
        .mount(&server)
        .await;

    let netlify = NetlifyService::new(&server.uri());

    let deploy = netlify
        .get_deploy("site-1", "deploy-1", "test-token")
        .await
        .expect("lookup should succeed");
    assert_eq!(deploy.status.as_deref(), Some("building"));

    netlify
        .cancel_deploy("site-1", "deploy-1", "test-token")
        .await
        .expect("cancel should succeed");
}

#[tokio::test]
async fn deploy_key_hooks_and_form_submissions() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/deploy_keys"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "key-1",
            "public_key": "ssh-rsa AAAA..."
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/sites/site-1/build_hooks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "hook-1",
            "site_id": "site-1",
            "title": "Continuous deployment",
            "url": "https://api.netlify.com/build_hooks/hook-1",
            "branch": "main"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/hooks/hook-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/sites/site-1/forms/form-1/submissions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "sub-1",
            "site_id": "site-1",
            "form_id": "form-1",
            "created_at": "2024-01-01T00:00:00Z",
            "data": { "email": "visitor@example.com" }
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let netlify = NetlifyService::new(&server.uri());

    let key = netlify
        .create_deploy_key("test-token")
        .await
        .expect("key creation should succeed");
    assert_eq!(key.id, "key-1");

    let hooks = netlify
        .list_build_hooks("site-1", "test-token")
        .await
        .expect("hook listing should succeed");
    assert_eq!(hooks.len(), 1);

    netlify
        .trigger_build_hook("hook-1", "test-token")
        .await
        .expect("trigger should succeed");

    let submissions = netlify
        .list_form_submissions("site-1", "form-1", "test-token")
        .await
        .expect("submission listing should succeed");
    assert_eq!(submissions[0].data.as_ref().unwrap()["email"], "visitor@example.com");
}

#[tokio::test]
async fn list_deploys_maps_state_to_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sites/site-1/deploys"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "deploy-1",
                "site_id": "site-1",
                "state": "ready",
                "deploy_url": "https://deploy-1--demo-site.netlify.app",
                "branch": "main",
                "commit_ref": "abc123"
            }
        ])))
        .mount(&server)
        .await;

    let netlify = NetlifyService::new(&server.uri());
    let deploys = netlify
        .list_deploys("site-1", "test-token")
        .await
        .expect("listing should succeed");

    assert_eq!(deploys.len(), 1);
    assert_eq!(deploys[0].status.as_deref(), Some("ready"));
    assert_eq!(deploys[0].commit_ref.as_deref(), Some("abc123"));
}
