//! GitHub repository models.

use serde::Deserialize;

/// Canonical owner/name pair identifying a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryReference {
    pub owner: String,
    pub name: String,
}

impl RepositoryReference {
    /// `owner/name` form used in log lines and error messages.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// Repository metadata needed to provision and deploy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryMetadata {
    pub owner: String,
    pub name: String,
    /// e.g. "acme/site"
    pub full_name: String,
    pub default_branch: String,
    pub is_private: bool,
    /// GitHub's numeric repository ID. Vercel uses it to tell apart renamed
    /// and forked repositories.
    pub id: i64,
}

/// Subset of `GET /repos/{owner}/{repo}` used by the deployer.
#[derive(Debug, Deserialize)]
pub struct GitHubRepoResponse {
    pub id: i64,
    pub name: String,
    pub full_name: String,
    pub private: bool,
    pub default_branch: String,
    pub owner: GitHubOwner,
}

#[derive(Debug, Deserialize)]
pub struct GitHubOwner {
    pub login: String,
}

impl From<GitHubRepoResponse> for RepositoryMetadata {
    fn from(repo: GitHubRepoResponse) -> Self {
        Self {
            owner: repo.owner.login,
            name: repo.name,
            full_name: repo.full_name,
            default_branch: repo.default_branch,
            is_private: repo.private,
            id: repo.id,
        }
    }
}
