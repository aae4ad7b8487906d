//! Per-request credential handling.
//!
//! Every tool call carries two tokens: one for GitHub and one for Vercel.
//! They are wrapped in `SecretString` as soon as they are read and are never
//! logged or stored.

mod extractor;

use secrecy::SecretString;

pub use extractor::{CombinedToken, CredentialSource, SeparateHeaders, ToolCredentials};

/// Separator between the two tokens in a combined token.
pub const COMBINED_TOKEN_SEPARATOR: char = ':';

/// The GitHub and Vercel tokens supplied with one request.
#[derive(Clone)]
pub struct CredentialPair {
    github: SecretString,
    vercel: SecretString,
}

impl CredentialPair {
    /// Build a pair from raw token values. Both are trimmed and must be non-empty.
    pub fn new(github: &str, vercel: &str) -> Result<Self, CredentialError> {
        let github = github.trim();
        let vercel = vercel.trim();
        if github.is_empty() || vercel.is_empty() {
            return Err(CredentialError::Incomplete);
        }
        Ok(Self {
            github: SecretString::from(github.to_string()),
            vercel: SecretString::from(vercel.to_string()),
        })
    }

    /// Split a combined `<github>:<vercel>` token.
    pub fn from_combined(token: &str) -> Result<Self, CredentialError> {
        let parts: Vec<&str> = token.split(COMBINED_TOKEN_SEPARATOR).collect();
        match parts.as_slice() {
            [github, vercel] => Self::new(github, vercel),
            _ => Err(CredentialError::InvalidFormat),
        }
    }

    pub fn github(&self) -> &SecretString {
        &self.github
    }

    pub fn vercel(&self) -> &SecretString {
        &self.vercel
    }
}

impl std::fmt::Debug for CredentialPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CredentialPair([REDACTED], [REDACTED])")
    }
}

/// Why credentials could not be read from a request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialError {
    #[error(
        "Missing credentials. Provide X-GitHub-Token and X-Vercel-Token headers, \
         or Authorization: Bearer <githubToken>:<vercelToken>"
    )]
    Missing,

    #[error("Invalid token format. Expected 'githubToken:vercelToken'")]
    InvalidFormat,

    #[error("Both GitHub and Vercel tokens are required")]
    Incomplete,
}

impl From<CredentialError> for crate::error::AppError {
    fn from(err: CredentialError) -> Self {
        crate::error::AppError::AuthenticationMissing(err.to_string())
    }
}
