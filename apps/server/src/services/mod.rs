//! Business logic services.

pub mod deployer;
pub mod github;
pub mod locator;
pub mod status;
pub mod vercel;

pub use deployer::Deployer;
pub use github::GitHubClient;
pub use locator::RepositoryLocator;
pub use vercel::VercelClient;
