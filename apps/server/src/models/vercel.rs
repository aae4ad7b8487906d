//! Vercel project and deployment models.
//!
//! Field names follow the Vercel REST API (camelCase, epoch-millisecond timestamps).

use serde::{Deserialize, Serialize};

use super::repository::RepositoryMetadata;

/// A Vercel project. Only ever read or created, never updated.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// Deployment lifecycle state as reported by Vercel.
///
/// Values outside the known set are kept verbatim in `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum DeploymentState {
    Building,
    Error,
    Initializing,
    Queued,
    Ready,
    Canceled,
    Unknown(String),
}

impl DeploymentState {
    /// Raw state string as Vercel spells it.
    pub fn as_str(&self) -> &str {
        match self {
            DeploymentState::Building => "BUILDING",
            DeploymentState::Error => "ERROR",
            DeploymentState::Initializing => "INITIALIZING",
            DeploymentState::Queued => "QUEUED",
            DeploymentState::Ready => "READY",
            DeploymentState::Canceled => "CANCELED",
            DeploymentState::Unknown(raw) => raw,
        }
    }

    /// No further transitions happen from ERROR, READY or CANCELED.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            DeploymentState::Error | DeploymentState::Ready | DeploymentState::Canceled
        )
    }
}

impl From<String> for DeploymentState {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "BUILDING" => DeploymentState::Building,
            "ERROR" => DeploymentState::Error,
            "INITIALIZING" => DeploymentState::Initializing,
            "QUEUED" => DeploymentState::Queued,
            "READY" => DeploymentState::Ready,
            "CANCELED" => DeploymentState::Canceled,
            _ => DeploymentState::Unknown(raw),
        }
    }
}

impl std::fmt::Display for DeploymentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single build-and-publish attempt.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    pub id: String,
    /// Hostname without scheme, e.g. "acme-site-abc123.vercel.app".
    pub url: String,
    pub name: String,
    #[serde(rename = "readyState")]
    pub state: DeploymentState,
    /// Epoch milliseconds; absent when Vercel omits `createdAt`.
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub inspector_url: Option<String>,
}

impl Deployment {
    /// Public URL with the `https://` scheme prepended.
    pub fn public_url(&self) -> String {
        format!("https://{}", self.url)
    }

    /// Creation time as RFC 3339, if Vercel sent a valid timestamp.
    pub fn created_at_rfc3339(&self) -> Option<String> {
        self.created_at
            .and_then(chrono::DateTime::from_timestamp_millis)
            .map(|dt| dt.to_rfc3339())
    }
}

/// Outcome of a successful deploy flow.
#[derive(Debug, Clone)]
pub struct DeploymentResult {
    pub deployment: Deployment,
    pub project: Project,
    /// Repository the deployment was built from.
    pub repository: RepositoryMetadata,
    pub message: String,
}

/// Normalized view of a deployment's state.
#[derive(Debug, Clone)]
pub struct StatusSummary {
    pub deployment: Deployment,
    /// Raw state string, passed through even when unknown.
    pub status: String,
    pub message: String,
    pub is_live: bool,
    pub has_error: bool,
}

/// `gitRepository` link sent when creating a project.
#[derive(Debug, Serialize)]
pub struct GitRepositoryLink {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub repo: String,
}

/// Body of `POST /v10/projects`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub name: String,
    pub git_repository: GitRepositoryLink,
    /// `None` serializes as `null`, meaning "no framework preset".
    pub framework: Option<String>,
}

/// `gitSource` descriptor sent when creating a deployment.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GitSource {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub repo: String,
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub repo_id: i64,
}

/// Body of `POST /v13/deployments`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeploymentRequest {
    pub name: String,
    pub project: String,
    pub git_source: GitSource,
}

/// Vercel error body: `{"error": {"code": "...", "message": "..."}}`.
#[derive(Debug, Deserialize)]
pub struct VercelErrorResponse {
    pub error: VercelErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct VercelErrorDetail {
    #[serde(default)]
    pub code: Option<String>,
    pub message: String,
}
