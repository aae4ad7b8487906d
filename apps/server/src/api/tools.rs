//! Tool dispatch endpoints.
//!
//! `POST /api/v1/tools/{tool_name}` runs a tool with a JSON object of
//! parameters. The request is checked in order: tool name (404), credentials
//! (401), body and parameters (400). Orchestrator failures become 400
//! envelopes.

use actix_web::{HttpResponse, get, post, web};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tracing::info;

use crate::auth::ToolCredentials;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{
    DeployRepoParams, DeployRepoResponse, DeploymentStatusParams, DeploymentStatusResponse,
    ToolListResponse, ToolName, ToolSuccess,
};
use crate::services::Deployer;

/// Configure tool routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_tools).service(call_tool);
}

/// List the available tools and their parameter schemas.
#[utoipa::path(
    get,
    path = "/api/v1/tools",
    tag = "Tools",
    responses(
        (status = 200, description = "Tool catalog", body = ToolListResponse)
    )
)]
#[get("/tools")]
pub async fn list_tools() -> HttpResponse {
    let tools = ToolName::all().iter().map(ToolName::definition).collect();
    HttpResponse::Ok().json(ToolListResponse { tools })
}

/// Invoke a tool.
///
/// POST /api/v1/tools/{tool_name}
#[utoipa::path(
    post,
    path = "/api/v1/tools/{tool_name}",
    tag = "Tools",
    params(
        ("tool_name" = String, Path, description = "deployRepo or getDeploymentStatus")
    ),
    request_body(content = serde_json::Value, description = "Tool parameters (DeployRepoParams or DeploymentStatusParams)"),
    responses(
        (status = 200, description = "Tool succeeded; `data` holds DeployRepoResponse or DeploymentStatusResponse"),
        (status = 400, description = "Invalid parameters or failed operation", body = crate::error::ErrorResponse),
        (status = 401, description = "Missing or malformed credentials", body = crate::error::ErrorResponse),
        (status = 404, description = "Unknown tool", body = crate::error::ErrorResponse),
        (status = 500, description = "Unexpected server error", body = crate::error::ErrorResponse)
    ),
    security(("github_token" = [], "vercel_token" = []), ("combined_token" = []))
)]
#[post("/tools/{tool_name}")]
pub async fn call_tool(
    path: web::Path<String>,
    credentials: Result<ToolCredentials, AppError>,
    body: Result<web::Bytes, AppError>,
    deployer: web::Data<Deployer>,
    config: web::Data<Config>,
) -> AppResult<HttpResponse> {
    let tool_name = path.into_inner();
    let tool = ToolName::parse(&tool_name).ok_or(AppError::UnknownTool(tool_name))?;
    let credentials = credentials?.pair;
    let body = body?;

    match tool {
        ToolName::DeployRepo => {
            let request = decode_params::<DeployRepoParams>(&body)?
                .validate(&config.upstream.github_host)
                .map_err(AppError::ParameterValidation)?;

            let result = deployer.deploy(&credentials, &request).await?;
            info!(
                "deployRepo: deployment {} created for project '{}'",
                result.deployment.id, result.project.name
            );

            let response = DeployRepoResponse::new(result, request.framework);
            Ok(HttpResponse::Ok().json(ToolSuccess::new(response)))
        }
        ToolName::GetDeploymentStatus => {
            let deployment_id = decode_params::<DeploymentStatusParams>(&body)?
                .validate()
                .map_err(AppError::ParameterValidation)?;

            let summary = deployer.status(&credentials, &deployment_id).await?;
            info!(
                "getDeploymentStatus: deployment {} is {} (terminal={})",
                deployment_id,
                summary.status,
                summary.deployment.state.is_terminal()
            );

            Ok(HttpResponse::Ok().json(ToolSuccess::new(DeploymentStatusResponse::from(summary))))
        }
    }
}

/// Decode a JSON object body into tool parameters. An empty body is `{}`.
fn decode_params<T: DeserializeOwned>(body: &[u8]) -> AppResult<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_value(JsonValue::Object(Default::default()))?);
    }

    let value: JsonValue = serde_json::from_slice(body)?;
    if !value.is_object() {
        return Err(AppError::ParameterValidation(
            "Tool parameters must be a JSON object".to_string(),
        ));
    }
    Ok(serde_json::from_value(value)?)
}
