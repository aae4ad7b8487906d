//! Tool invocation payloads and the envelopes returned to callers.

use serde::{Deserialize, Serialize};
use serde_json::{Value as JsonValue, json};
use utoipa::ToSchema;

use super::vercel::{DeploymentResult, StatusSummary};

/// Framework used when the caller does not pick one.
pub const DEFAULT_FRAMEWORK: &str = "static";

/// Framework values advertised in the tool catalog.
///
/// Other strings are passed through to Vercel unchanged.
pub const SUPPORTED_FRAMEWORKS: [&str; 8] = [
    "nextjs", "react", "vue", "nuxtjs", "gatsby", "svelte", "vite", "static",
];

/// Tools exposed through the dispatch endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolName {
    DeployRepo,
    GetDeploymentStatus,
}

impl ToolName {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "deployRepo" => Some(Self::DeployRepo),
            "getDeploymentStatus" => Some(Self::GetDeploymentStatus),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DeployRepo => "deployRepo",
            Self::GetDeploymentStatus => "getDeploymentStatus",
        }
    }

    pub fn all() -> [ToolName; 2] {
        [Self::DeployRepo, Self::GetDeploymentStatus]
    }

    /// Catalog entry with a JSON schema of the tool's parameters.
    pub fn definition(&self) -> ToolDefinition {
        match self {
            Self::DeployRepo => ToolDefinition {
                name: self.as_str().to_string(),
                description: "Deploy a GitHub repository to Vercel. Creates the Vercel project \
                              if it does not exist and deploys the default branch."
                    .to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "repoUrl": {
                            "type": "string",
                            "description": "GitHub repository URL (e.g. https://github.com/owner/repo)"
                        },
                        "projectName": {
                            "type": "string",
                            "description": "Vercel project name (defaults to owner-repo)"
                        },
                        "framework": {
                            "type": "string",
                            "enum": SUPPORTED_FRAMEWORKS,
                            "default": DEFAULT_FRAMEWORK,
                            "description": "Framework preset used by Vercel"
                        }
                    },
                    "required": ["repoUrl"]
                }),
            },
            Self::GetDeploymentStatus => ToolDefinition {
                name: self.as_str().to_string(),
                description: "Check the current status of a Vercel deployment.".to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "deploymentId": {
                            "type": "string",
                            "description": "Vercel deployment ID returned by deployRepo"
                        }
                    },
                    "required": ["deploymentId"]
                }),
            },
        }
    }
}

/// Tool catalog entry.
#[derive(Debug, Serialize, ToSchema)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON schema of the tool parameters.
    #[schema(value_type = Object)]
    pub parameters: JsonValue,
}

/// Response for the tool catalog endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ToolListResponse {
    pub tools: Vec<ToolDefinition>,
}

/// Raw `deployRepo` parameters before validation.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeployRepoParams {
    pub repo_url: Option<String>,
    pub project_name: Option<String>,
    pub framework: Option<String>,
}

/// Validated `deployRepo` request handed to the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployRequest {
    pub repo_url: String,
    /// Non-blank custom project name, if supplied.
    pub project_name: Option<String>,
    pub framework: String,
}

impl DeployRepoParams {
    /// Check required fields. `github_host` is the domain `repoUrl` must mention.
    pub fn validate(self, github_host: &str) -> Result<DeployRequest, String> {
        let repo_url = self
            .repo_url
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| "Missing required parameter: repoUrl".to_string())?;

        if !repo_url.contains(github_host) {
            return Err(format!(
                "Invalid repoUrl: must be a {} repository URL",
                github_host
            ));
        }

        let project_name = self
            .project_name
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let framework = self
            .framework
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_FRAMEWORK.to_string());

        Ok(DeployRequest {
            repo_url,
            project_name,
            framework,
        })
    }
}

/// Raw `getDeploymentStatus` parameters before validation.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentStatusParams {
    pub deployment_id: Option<String>,
}

impl DeploymentStatusParams {
    pub fn validate(self) -> Result<String, String> {
        self.deployment_id
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| "Missing required parameter: deploymentId".to_string())
    }
}

/// Success envelope wrapping a tool result.
#[derive(Debug, Serialize)]
pub struct ToolSuccess<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ToolSuccess<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Result of `deployRepo`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeployRepoResponse {
    pub deployment_id: String,
    pub deployment_url: String,
    pub project_name: String,
    pub status: String,
    pub message: String,
    /// Repository full name, e.g. "acme/site".
    pub repository: String,
    pub framework: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inspector_url: Option<String>,
}

impl DeployRepoResponse {
    pub fn new(result: DeploymentResult, framework: String) -> Self {
        Self {
            deployment_id: result.deployment.id.clone(),
            deployment_url: result.deployment.public_url(),
            project_name: result.project.name,
            status: result.deployment.state.to_string(),
            message: result.message,
            repository: result.repository.full_name,
            framework,
            inspector_url: result.deployment.inspector_url,
        }
    }
}

/// Result of `getDeploymentStatus`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentStatusResponse {
    pub deployment_id: String,
    pub deployment_url: String,
    pub project_name: String,
    pub status: String,
    pub message: String,
    pub is_live: bool,
    pub has_error: bool,
    /// RFC 3339 creation time.
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inspector_url: Option<String>,
}

impl From<StatusSummary> for DeploymentStatusResponse {
    fn from(summary: StatusSummary) -> Self {
        Self {
            deployment_id: summary.deployment.id.clone(),
            deployment_url: summary.deployment.public_url(),
            created_at: summary.deployment.created_at_rfc3339(),
            project_name: summary.deployment.name,
            status: summary.status,
            message: summary.message,
            is_live: summary.is_live,
            has_error: summary.has_error,
            inspector_url: summary.deployment.inspector_url,
        }
    }
}
