//! Actix-web extractor for tool-call credentials.
//!
//! Two transports are accepted, tried in order:
//! 1. [`SeparateHeaders`]: `X-GitHub-Token` and `X-Vercel-Token`
//! 2. [`CombinedToken`]: `Authorization: Bearer <github>:<vercel>`
//!
//! Header values are never logged.

use actix_web::dev::Payload;
use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{FromRequest, HttpRequest};
use std::future::{Ready, ready};

use super::{CredentialError, CredentialPair};
use crate::config::{GITHUB_TOKEN_HEADER, VERCEL_TOKEN_HEADER};
use crate::error::AppError;

/// A way of carrying the credential pair on a request.
pub trait CredentialSource {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// `None` when this transport is not used by the request at all.
    fn extract(&self, headers: &HeaderMap) -> Option<Result<CredentialPair, CredentialError>>;
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Tokens in two dedicated headers.
pub struct SeparateHeaders;

impl CredentialSource for SeparateHeaders {
    fn name(&self) -> &'static str {
        "separate-headers"
    }

    fn extract(&self, headers: &HeaderMap) -> Option<Result<CredentialPair, CredentialError>> {
        let github = header_str(headers, GITHUB_TOKEN_HEADER);
        let vercel = header_str(headers, VERCEL_TOKEN_HEADER);
        if github.is_none() && vercel.is_none() {
            return None;
        }
        Some(CredentialPair::new(
            github.unwrap_or_default(),
            vercel.unwrap_or_default(),
        ))
    }
}

/// Both tokens in one bearer token, separated by `:`.
pub struct CombinedToken;

impl CredentialSource for CombinedToken {
    fn name(&self) -> &'static str {
        "combined-token"
    }

    fn extract(&self, headers: &HeaderMap) -> Option<Result<CredentialPair, CredentialError>> {
        let value = header_str(headers, AUTHORIZATION.as_str())?;
        let token = value
            .strip_prefix("Bearer ")
            .or_else(|| value.strip_prefix("bearer "))?;
        Some(CredentialPair::from_combined(token))
    }
}

/// Resolve credentials from the first transport present on the request.
pub fn resolve_credentials(
    headers: &HeaderMap,
    sources: &[&dyn CredentialSource],
) -> Result<CredentialPair, CredentialError> {
    for source in sources {
        if let Some(result) = source.extract(headers) {
            if let Err(ref e) = result {
                tracing::debug!("Credentials via {} rejected: {}", source.name(), e);
            }
            return result;
        }
    }
    Err(CredentialError::Missing)
}

/// Extractor yielding the caller's credential pair.
///
/// ```ignore
/// async fn handler(credentials: ToolCredentials) -> impl Responder {
///     // credentials.pair holds the GitHub and Vercel tokens
/// }
/// ```
pub struct ToolCredentials {
    pub pair: CredentialPair,
}

impl FromRequest for ToolCredentials {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let sources: [&dyn CredentialSource; 2] = [&SeparateHeaders, &CombinedToken];
        ready(
            resolve_credentials(req.headers(), &sources)
                .map(|pair| ToolCredentials { pair })
                .map_err(AppError::from),
        )
    }
}
