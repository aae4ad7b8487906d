//! Deployment orchestration.
//!
//! Deploy flow: reference validated → name resolved → project resolved →
//! deployment created. Steps run strictly in sequence and the first failure
//! aborts the rest. Nothing is rolled back: a project created before a failed
//! trigger stays on Vercel.

use std::time::Duration;

use tracing::info;

use super::github::GitHubClient;
use super::status;
use super::vercel::VercelClient;
use crate::auth::CredentialPair;
use crate::config::UpstreamSettings;
use crate::error::{DeployError, Operation, OperationError};
use crate::models::{DeployRequest, DeploymentResult, RepositoryReference, StatusSummary};

/// Sequences the GitHub and Vercel calls behind the two tools.
#[derive(Debug, Clone)]
pub struct Deployer {
    github: GitHubClient,
    vercel: VercelClient,
}

/// Build the upstream HTTP client with the configured timeouts.
fn build_http_client(
    connect_timeout: Duration,
    request_timeout: Duration,
) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .connect_timeout(connect_timeout)
        .timeout(request_timeout)
        .build()
}

impl Deployer {
    pub fn new(settings: &UpstreamSettings) -> Result<Self, reqwest::Error> {
        let http_client = build_http_client(settings.connect_timeout, settings.request_timeout)?;
        Ok(Self {
            github: GitHubClient::new(settings, http_client.clone()),
            vercel: VercelClient::new(settings, http_client),
        })
    }

    /// Validate the repository, provision its project and trigger a deployment.
    pub async fn deploy(
        &self,
        credentials: &CredentialPair,
        request: &DeployRequest,
    ) -> Result<DeploymentResult, OperationError> {
        self.run_deploy(credentials, request)
            .await
            .map_err(|e| OperationError::new(Operation::Deploy, e))
    }

    async fn run_deploy(
        &self,
        credentials: &CredentialPair,
        request: &DeployRequest,
    ) -> Result<DeploymentResult, DeployError> {
        let repo = self
            .github
            .validate_repository(credentials.github(), &request.repo_url)
            .await?;

        let reference = RepositoryReference {
            owner: repo.owner.clone(),
            name: repo.name.clone(),
        };
        let project_name = resolve_project_name(request.project_name.as_deref(), &reference);
        info!(
            "Deploying {} as project '{}' (framework={})",
            repo.full_name, project_name, request.framework
        );

        let project = self
            .vercel
            .provision_project(credentials.vercel(), &project_name, &repo, &request.framework)
            .await?;

        let deployment = self
            .vercel
            .create_deployment(credentials.vercel(), &project, &repo)
            .await?;

        let message = format!(
            "Deployment of {} started for project '{}'",
            repo.full_name, project.name
        );

        Ok(DeploymentResult {
            deployment,
            project,
            repository: repo,
            message,
        })
    }

    /// Fetch a deployment and translate its state.
    pub async fn status(
        &self,
        credentials: &CredentialPair,
        deployment_id: &str,
    ) -> Result<StatusSummary, OperationError> {
        let deployment = self
            .vercel
            .get_deployment(credentials.vercel(), deployment_id)
            .await
            .map_err(|e| OperationError::new(Operation::Status, e))?;

        Ok(status::summarize(deployment))
    }
}

/// Lowercase, replace anything outside `[a-z0-9-]` with `-`, collapse runs of
/// `-` and trim them from both ends.
pub fn sanitize_project_name(name: &str) -> String {
    let mut sanitized = String::with_capacity(name.len());
    for c in name.to_lowercase().chars() {
        let c = if c.is_ascii_lowercase() || c.is_ascii_digit() {
            c
        } else {
            '-'
        };
        if c == '-' && sanitized.ends_with('-') {
            continue;
        }
        sanitized.push(c);
    }
    sanitized.trim_matches('-').to_string()
}

/// Pick the Vercel project name for a deployment.
///
/// A custom name is sanitized; without one (or when sanitizing leaves
/// nothing) the name is `<owner>-<repo>` lowercased.
pub fn resolve_project_name(custom: Option<&str>, reference: &RepositoryReference) -> String {
    custom
        .map(sanitize_project_name)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| format!("{}-{}", reference.owner, reference.name).to_lowercase())
}
