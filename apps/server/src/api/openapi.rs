//! OpenAPI documentation configuration.

use utoipa::OpenApi;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, Http, HttpAuthScheme, SecurityScheme};

use crate::config::{GITHUB_TOKEN_HEADER, VERCEL_TOKEN_HEADER};
use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Vercel Deployer",
        version = "0.1.0",
        description = "Tool server that deploys GitHub repositories to Vercel and reports deployment status"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        api::health::health,
        api::tools::list_tools,
        api::tools::call_tool,
    ),
    components(
        schemas(
            error::ErrorResponse,
            api::health::HealthResponse,
            models::ToolDefinition,
            models::ToolListResponse,
            models::DeployRepoParams,
            models::DeployRepoResponse,
            models::DeploymentStatusParams,
            models::DeploymentStatusResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Tools", description = "Tool catalog and invocation")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Register the credential transports as security schemes.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "github_token",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(GITHUB_TOKEN_HEADER))),
            );
            components.add_security_scheme(
                "vercel_token",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(VERCEL_TOKEN_HEADER))),
            );
            components.add_security_scheme(
                "combined_token",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}
