//! Domain models for the deployer.

pub mod repository;
pub mod tool;
pub mod vercel;

// Re-export commonly used types
pub use repository::{GitHubRepoResponse, RepositoryMetadata, RepositoryReference};
pub use tool::{
    DEFAULT_FRAMEWORK, DeployRepoParams, DeployRepoResponse, DeployRequest, DeploymentStatusParams,
    DeploymentStatusResponse, SUPPORTED_FRAMEWORKS, ToolDefinition, ToolListResponse, ToolName,
    ToolSuccess,
};
pub use vercel::{Deployment, DeploymentResult, DeploymentState, Project, StatusSummary};
