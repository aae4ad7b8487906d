//! Shared test helpers for deploy E2E tests.

use actix_web::{App, dev::ServiceResponse, test, web};
use serde_json::Value;
use std::time::Duration;
use vercel_deployer_lib::api;
use vercel_deployer_lib::config::{Config, Environment, UpstreamSettings};
use vercel_deployer_lib::services::Deployer;

use super::mock_platform::{GITHUB_TOKEN, MockPlatform, VERCEL_TOKEN};

/// Credential headers accepted by the mock.
pub fn valid_headers() -> Vec<(&'static str, String)> {
    vec![
        ("X-GitHub-Token", GITHUB_TOKEN.to_string()),
        ("X-Vercel-Token", VERCEL_TOKEN.to_string()),
    ]
}

/// Create a test app whose upstream APIs point at `mock`.
pub async fn create_test_app(
    mock: &MockPlatform,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = ServiceResponse,
    Error = actix_web::Error,
> {
    let upstream = UpstreamSettings {
        github_api_url: mock.base_url.clone(),
        github_host: "github.com".to_string(),
        vercel_api_url: mock.base_url.clone(),
        vercel_team_id: None,
        connect_timeout: Duration::from_secs(2),
        request_timeout: Duration::from_secs(5),
    };
    let deployer = Deployer::new(&upstream).expect("Failed to build deployer");
    let config = Config {
        environment: Environment::Development,
        host: "127.0.0.1".to_string(),
        port: 0,
        upstream,
    };

    test::init_service(
        App::new()
            .app_data(web::Data::new(deployer))
            .app_data(web::Data::new(config))
            .service(
                web::scope("/api/v1")
                    .configure(api::configure_health_routes)
                    .configure(api::configure_tool_routes),
            ),
    )
    .await
}

/// Invoke a tool with the given headers and JSON body.
pub async fn call_tool<S>(
    app: &S,
    tool: &str,
    headers: &[(&str, String)],
    body: Value,
) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let mut req = test::TestRequest::post()
        .uri(&format!("/api/v1/tools/{}", tool))
        .set_json(body);
    for (name, value) in headers {
        req = req.insert_header((*name, value.clone()));
    }

    let resp = test::call_service(app, req.to_request()).await;
    let status = resp.status().as_u16();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

/// Invoke `deployRepo` with valid credentials.
pub async fn deploy<S>(app: &S, params: Value) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    call_tool(app, "deployRepo", &valid_headers(), params).await
}

/// Invoke `getDeploymentStatus` with valid credentials.
pub async fn deployment_status<S>(app: &S, deployment_id: &str) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    call_tool(
        app,
        "getDeploymentStatus",
        &valid_headers(),
        serde_json::json!({ "deploymentId": deployment_id }),
    )
    .await
}
