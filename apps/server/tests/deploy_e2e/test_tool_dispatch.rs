//! E2E tests: tool dispatch, credentials and parameter validation.

use actix_web::test;
use serde_json::{Value, json};

use super::mock_platform::MockPlatform;
use super::test_helpers::*;

/// Unknown tool → 404, checked before credentials.
#[actix_rt::test]
async fn test_unknown_tool_returns_404() {
    let mock = MockPlatform::start().await;
    let app = create_test_app(&mock).await;

    let (status, body) = call_tool(&app, "deleteRepo", &[], json!({})).await;

    assert_eq!(status, 404);
    assert_eq!(body["success"], false);
    assert_eq!(body["statusCode"], 404);
    assert!(body["message"].as_str().unwrap().contains("deleteRepo"));
}

#[actix_rt::test]
async fn test_missing_credentials_returns_401() {
    let mock = MockPlatform::start().await;
    let app = create_test_app(&mock).await;

    let (status, body) = call_tool(
        &app,
        "deployRepo",
        &[],
        json!({ "repoUrl": "https://github.com/acme/site" }),
    )
    .await;

    assert_eq!(status, 401);
    assert_eq!(body["context"], "authentication");
    assert!(mock.calls().is_empty(), "No upstream call without credentials");
}

#[actix_rt::test]
async fn test_single_token_header_returns_401() {
    let mock = MockPlatform::start().await;
    let app = create_test_app(&mock).await;

    let headers = vec![("X-GitHub-Token", "gh-good".to_string())];
    let (status, _) = call_tool(
        &app,
        "getDeploymentStatus",
        &headers,
        json!({ "deploymentId": "dpl_1" }),
    )
    .await;

    assert_eq!(status, 401);
}

#[actix_rt::test]
async fn test_malformed_bearer_token_returns_401() {
    let mock = MockPlatform::start().await;
    let app = create_test_app(&mock).await;

    for token in ["Bearer gh-good", "Bearer a:b:c", "Bearer :vc-good"] {
        let headers = vec![("Authorization", token.to_string())];
        let (status, _) = call_tool(
            &app,
            "getDeploymentStatus",
            &headers,
            json!({ "deploymentId": "dpl_1" }),
        )
        .await;
        assert_eq!(status, 401, "{} should be rejected", token);
    }
}

/// Combined bearer token carries both credentials.
#[actix_rt::test]
async fn test_combined_bearer_token_accepted() {
    let mock = MockPlatform::start().await;
    mock.set_deployment_state("dpl_1", "READY");
    let app = create_test_app(&mock).await;

    let headers = vec![("Authorization", "Bearer gh-good:vc-good".to_string())];
    let (status, body) = call_tool(
        &app,
        "getDeploymentStatus",
        &headers,
        json!({ "deploymentId": "dpl_1" }),
    )
    .await;

    assert_eq!(status, 200, "Combined token should work: {}", body);
    assert_eq!(body["data"]["isLive"], true);
}

#[actix_rt::test]
async fn test_missing_repo_url_returns_400() {
    let mock = MockPlatform::start().await;
    let app = create_test_app(&mock).await;

    let (status, body) = deploy(&app, json!({ "projectName": "site" })).await;

    assert_eq!(status, 400);
    assert_eq!(body["context"], "parameter validation");
    assert!(body["message"].as_str().unwrap().contains("repoUrl"));
    assert!(mock.calls().is_empty());
}

/// `repoUrl` must mention the GitHub host, so bare `owner/repo` is refused here.
#[actix_rt::test]
async fn test_repo_url_without_github_host_returns_400() {
    let mock = MockPlatform::start().await;
    let app = create_test_app(&mock).await;

    for repo_url in ["https://gitlab.com/acme/site", "acme/site"] {
        let (status, body) = deploy(&app, json!({ "repoUrl": repo_url })).await;
        assert_eq!(status, 400, "{} should be rejected", repo_url);
        assert!(body["message"].as_str().unwrap().contains("github.com"));
    }
    assert!(mock.calls().is_empty());
}

#[actix_rt::test]
async fn test_missing_deployment_id_returns_400() {
    let mock = MockPlatform::start().await;
    let app = create_test_app(&mock).await;

    let (status, body) = call_tool(&app, "getDeploymentStatus", &valid_headers(), json!({})).await;

    assert_eq!(status, 400);
    assert!(body["message"].as_str().unwrap().contains("deploymentId"));
}

#[actix_rt::test]
async fn test_non_object_parameters_return_400() {
    let mock = MockPlatform::start().await;
    let app = create_test_app(&mock).await;

    let (status, body) = call_tool(&app, "deployRepo", &valid_headers(), json!(["x"])).await;

    assert_eq!(status, 400);
    assert_eq!(body["success"], false);
}

#[actix_rt::test]
async fn test_tool_catalog_lists_tools() {
    let mock = MockPlatform::start().await;
    let app = create_test_app(&mock).await;

    let req = test::TestRequest::get().uri("/api/v1/tools").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body: Value = test::read_body_json(resp).await;
    let names: Vec<&str> = body["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["deployRepo", "getDeploymentStatus"]);
}

#[actix_rt::test]
async fn test_health_endpoint() {
    let mock = MockPlatform::start().await;
    let app = create_test_app(&mock).await;

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
}

/// Oversized bodies get the same error envelope as other parameter errors.
#[actix_rt::test]
async fn test_oversized_body_returns_error_envelope() {
    let mock = MockPlatform::start().await;
    let app = create_test_app(&mock).await;

    let padding = "x".repeat(300 * 1024);
    let payload = json!({ "deploymentId": "dpl_1", "padding": padding }).to_string();
    let mut req = test::TestRequest::post()
        .uri("/api/v1/tools/getDeploymentStatus")
        .insert_header(("Content-Type", "application/json"))
        .set_payload(payload);
    for (name, value) in valid_headers() {
        req = req.insert_header((name, value));
    }

    let resp = test::call_service(&app, req.to_request()).await;
    assert_eq!(resp.status().as_u16(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["statusCode"], 400);
    assert_eq!(body["context"], "parameter validation");
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid request body"),
        "{}",
        body
    );
    assert!(mock.calls().is_empty());
}
