//! Vercel project provisioning, deployment creation and lookup.

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info, warn};

use crate::config::UpstreamSettings;
use crate::error::DeployError;
use crate::models::vercel::{
    CreateDeploymentRequest, CreateProjectRequest, GitRepositoryLink, GitSource,
    VercelErrorResponse,
};
use crate::models::{DEFAULT_FRAMEWORK, Deployment, Project, RepositoryMetadata};

/// Git provider name used in `gitRepository` and `gitSource`.
const GIT_PROVIDER: &str = "github";

/// Vercel REST client.
#[derive(Debug, Clone)]
pub struct VercelClient {
    api_url: String,
    team_id: Option<String>,
    http_client: reqwest::Client,
}

/// Outcome of looking up a project by name.
#[derive(Debug)]
pub enum ProjectLookup {
    Found(Project),
    NotFound,
    /// Lookup failed for another reason; the message is only logged.
    Failed(String),
}

/// Translate a framework value into a Vercel preset.
///
/// `"static"` has no Vercel preset and maps to `None`.
pub fn framework_preset(framework: &str) -> Option<String> {
    if framework == DEFAULT_FRAMEWORK {
        None
    } else {
        Some(framework.to_string())
    }
}

impl VercelClient {
    pub fn new(settings: &UpstreamSettings, http_client: reqwest::Client) -> Self {
        Self {
            api_url: settings.vercel_api_url.trim_end_matches('/').to_string(),
            team_id: settings.vercel_team_id.clone(),
            http_client,
        }
    }

    /// Build an endpoint URL, scoping it to the configured team.
    fn endpoint(&self, path: &str) -> String {
        match &self.team_id {
            Some(team_id) => format!(
                "{}{}?teamId={}",
                self.api_url,
                path,
                urlencoding::encode(team_id)
            ),
            None => format!("{}{}", self.api_url, path),
        }
    }

    /// Fetch a project by name.
    pub async fn find_project(&self, token: &SecretString, name: &str) -> ProjectLookup {
        let url = self.endpoint(&format!("/v9/projects/{}", urlencoding::encode(name)));
        debug!("Vercel: looking up project '{}'", name);

        let response = match self
            .http_client
            .get(&url)
            .bearer_auth(token.expose_secret())
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => return ProjectLookup::Failed(e.to_string()),
        };

        match response.status() {
            status if status.is_success() => match response.json::<Project>().await {
                Ok(project) => ProjectLookup::Found(project),
                Err(e) => ProjectLookup::Failed(format!("Failed to parse project: {}", e)),
            },
            StatusCode::NOT_FOUND => ProjectLookup::NotFound,
            _ => ProjectLookup::Failed(error_message(response).await),
        }
    }

    /// Create a project linked to the repository.
    pub async fn create_project(
        &self,
        token: &SecretString,
        name: &str,
        repo: &RepositoryMetadata,
        framework: &str,
    ) -> Result<Project, DeployError> {
        let body = CreateProjectRequest {
            name: name.to_string(),
            git_repository: GitRepositoryLink {
                kind: GIT_PROVIDER,
                repo: repo.full_name.clone(),
            },
            framework: framework_preset(framework),
        };

        let response = self
            .http_client
            .post(self.endpoint("/v10/projects"))
            .bearer_auth(token.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| DeployError::Provisioning(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DeployError::Provisioning(error_message(response).await));
        }

        let project: Project = response
            .json()
            .await
            .map_err(|e| DeployError::Provisioning(format!("Failed to parse project: {}", e)))?;

        info!(
            "Vercel: created project '{}' (id={}) linked to {}",
            project.name, project.id, repo.full_name
        );
        Ok(project)
    }

    /// Return the project named `name`, creating it when it does not exist.
    ///
    /// Existing projects are returned unchanged. Lookup failures other than
    /// 404 are treated as "absent" and fall through to creation.
    pub async fn provision_project(
        &self,
        token: &SecretString,
        name: &str,
        repo: &RepositoryMetadata,
        framework: &str,
    ) -> Result<Project, DeployError> {
        match self.find_project(token, name).await {
            ProjectLookup::Found(project) => {
                info!(
                    "Vercel: reusing existing project '{}' (id={})",
                    project.name, project.id
                );
                return Ok(project);
            }
            ProjectLookup::NotFound => {
                debug!("Vercel: project '{}' does not exist yet", name);
            }
            ProjectLookup::Failed(message) => {
                warn!(
                    "Vercel: project lookup for '{}' failed, creating instead: {}",
                    name, message
                );
            }
        }

        self.create_project(token, name, repo, framework).await
    }

    /// Start a deployment of the repository's default branch.
    pub async fn create_deployment(
        &self,
        token: &SecretString,
        project: &Project,
        repo: &RepositoryMetadata,
    ) -> Result<Deployment, DeployError> {
        if project.id.is_empty() {
            return Err(DeployError::Provisioning(format!(
                "Project '{}' has no id",
                project.name
            )));
        }

        let body = CreateDeploymentRequest {
            name: project.name.clone(),
            project: project.id.clone(),
            git_source: GitSource {
                kind: GIT_PROVIDER,
                repo: repo.full_name.clone(),
                git_ref: repo.default_branch.clone(),
                repo_id: repo.id,
            },
        };

        let response = self
            .http_client
            .post(self.endpoint("/v13/deployments"))
            .bearer_auth(token.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| DeployError::DeploymentTrigger(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DeployError::DeploymentTrigger(error_message(response).await));
        }

        let deployment: Deployment = response.json().await.map_err(|e| {
            DeployError::DeploymentTrigger(format!("Failed to parse deployment: {}", e))
        })?;

        info!(
            "Vercel: created deployment {} for project '{}' from {}@{} (state={})",
            deployment.id, project.name, repo.full_name, repo.default_branch, deployment.state
        );
        Ok(deployment)
    }

    /// Fetch a deployment by id.
    pub async fn get_deployment(
        &self,
        token: &SecretString,
        deployment_id: &str,
    ) -> Result<Deployment, DeployError> {
        let url = self.endpoint(&format!(
            "/v13/deployments/{}",
            urlencoding::encode(deployment_id)
        ));

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(token.expose_secret())
            .send()
            .await
            .map_err(|e| DeployError::StatusFetch(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let message = error_message(response).await;
            warn!(
                "Vercel: fetching deployment {} returned {}: {}",
                deployment_id, status, message
            );
            return Err(DeployError::StatusFetch(message));
        }

        response
            .json()
            .await
            .map_err(|e| DeployError::StatusFetch(format!("Failed to parse deployment: {}", e)))
    }
}

/// Extract Vercel's `error.message`, falling back to the HTTP status.
async fn error_message(response: reqwest::Response) -> String {
    let status = response.status();
    match response.json::<VercelErrorResponse>().await {
        Ok(body) => match body.error.code {
            Some(code) => format!("{} ({})", body.error.message, code),
            None => body.error.message,
        },
        Err(_) => format!("HTTP {}", status),
    }
}
