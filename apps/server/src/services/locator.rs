//! Repository reference parsing.
//!
//! Accepted forms, tried in order (first match wins):
//! - `https://<host>/<owner>/<repo>[.git][/any/trailing/path]`
//! - `git@<host>:<owner>/<repo>[.git]`
//! - `<owner>/<repo>[.git]`

use regex::Regex;

use crate::error::DeployError;
use crate::models::RepositoryReference;

/// Parses repository references for a single GitHub web host.
#[derive(Debug, Clone)]
pub struct RepositoryLocator {
    patterns: [Regex; 3],
}

impl RepositoryLocator {
    /// Compile the patterns for `host` (e.g. "github.com").
    pub fn new(host: &str) -> Self {
        let host = regex::escape(host);
        let compile = |pattern: String| Regex::new(&pattern).expect("repository pattern is valid");

        Self {
            patterns: [
                compile(format!(
                    r"^https://{host}/([^/]+)/([^/]+?)(?:\.git)?(?:/.*)?$"
                )),
                compile(format!(r"^git@{host}:([^/]+)/([^/]+?)(?:\.git)?$")),
                compile(r"^([^/]+)/([^/]+?)(?:\.git)?$".to_string()),
            ],
        }
    }

    /// Parse `input` into an owner/name pair.
    pub fn parse(&self, input: &str) -> Result<RepositoryReference, DeployError> {
        self.patterns
            .iter()
            .find_map(|pattern| {
                let caps = pattern.captures(input)?;
                Some(RepositoryReference {
                    owner: caps.get(1)?.as_str().to_string(),
                    name: caps.get(2)?.as_str().to_string(),
                })
            })
            .ok_or_else(|| DeployError::InvalidReference(input.to_string()))
    }
}
