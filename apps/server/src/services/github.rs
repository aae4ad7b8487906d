//! GitHub repository validation.
//!
//! Resolves a repository reference and fetches its metadata with the caller's
//! token. HTTP failures are mapped to typed [`DeployError`]s:
//! 404 → not found, 401 → bad token, 403 → insufficient permissions,
//! anything else → upstream error carrying GitHub's message.

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info, warn};

use super::locator::RepositoryLocator;
use crate::config::UpstreamSettings;
use crate::error::DeployError;
use crate::models::{GitHubRepoResponse, RepositoryMetadata, RepositoryReference};

/// User-Agent sent to GitHub (required by the API).
const USER_AGENT: &str = "vercel-deployer";

/// GitHub error body: `{"message": "...", "documentation_url": "..."}`.
#[derive(serde::Deserialize)]
struct GitHubErrorResponse {
    message: String,
}

/// GitHub REST client for repository lookups.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    api_url: String,
    locator: RepositoryLocator,
    http_client: reqwest::Client,
}

impl GitHubClient {
    pub fn new(settings: &UpstreamSettings, http_client: reqwest::Client) -> Self {
        Self {
            api_url: settings.github_api_url.trim_end_matches('/').to_string(),
            locator: RepositoryLocator::new(&settings.github_host),
            http_client,
        }
    }

    /// Parse a repository reference without contacting GitHub.
    pub fn parse_reference(&self, input: &str) -> Result<RepositoryReference, DeployError> {
        self.locator.parse(input)
    }

    /// Validate that `reference_input` names a repository visible to `token`.
    pub async fn validate_repository(
        &self,
        token: &SecretString,
        reference_input: &str,
    ) -> Result<RepositoryMetadata, DeployError> {
        let reference = self.parse_reference(reference_input)?;
        let url = format!(
            "{}/repos/{}/{}",
            self.api_url,
            urlencoding::encode(&reference.owner),
            urlencoding::encode(&reference.name)
        );

        debug!("GitHub: fetching repository metadata from {}", url);

        let response = self
            .http_client
            .get(&url)
            .header("Authorization", format!("Bearer {}", token.expose_secret()))
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .map_err(|e| {
                warn!("GitHub: request for {} failed: {}", reference.full_name(), e);
                DeployError::Upstream(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = error_message(response).await;
            warn!(
                "GitHub: repository lookup for {} returned {}: {}",
                reference.full_name(),
                status,
                message
            );
            return Err(match status {
                StatusCode::NOT_FOUND => DeployError::RepositoryNotFound(reference.full_name()),
                StatusCode::UNAUTHORIZED => DeployError::InvalidCredential(message),
                StatusCode::FORBIDDEN => DeployError::InsufficientPermission(message),
                _ => DeployError::Upstream(message),
            });
        }

        let repo: GitHubRepoResponse = response.json().await.map_err(|e| {
            warn!("GitHub: failed to parse repository response: {}", e);
            DeployError::Upstream(format!("Failed to parse repository response: {}", e))
        })?;

        let metadata = RepositoryMetadata::from(repo);
        info!(
            "GitHub: validated repository {} (id={}, default_branch={}, private={})",
            metadata.full_name, metadata.id, metadata.default_branch, metadata.is_private
        );

        Ok(metadata)
    }
}

/// Extract GitHub's `message` field, falling back to the HTTP status.
async fn error_message(response: reqwest::Response) -> String {
    let status = response.status();
    match response.json::<GitHubErrorResponse>().await {
        Ok(body) => body.message,
        Err(_) => format!("HTTP {}", status),
    }
}
