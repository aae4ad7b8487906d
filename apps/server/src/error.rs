//! Error types for the deployer.
//!
//! Three layers, each a thiserror enum:
//! - [`DeployError`]: failures raised by the GitHub/Vercel components
//! - [`OperationError`]: a component failure wrapped with the operation that hit it
//! - [`AppError`]: what a tool call can fail with, rendered as the error envelope

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;
use utoipa::ToSchema;

/// Failures raised by the repository, project, deployment and status components.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeployError {
    /// Input did not match any recognized repository reference form.
    #[error("Invalid GitHub repository reference: {0}")]
    InvalidReference(String),

    /// GitHub returned 404 for the repository.
    #[error("Repository '{0}' not found or not accessible with the provided token")]
    RepositoryNotFound(String),

    /// GitHub returned 401.
    #[error("Invalid GitHub token: {0}")]
    InvalidCredential(String),

    /// GitHub returned 403.
    #[error("Insufficient permissions to access repository: {0}")]
    InsufficientPermission(String),

    /// Any other upstream failure; carries the upstream message.
    #[error("GitHub API error: {0}")]
    Upstream(String),

    #[error("Failed to create Vercel project: {0}")]
    Provisioning(String),

    #[error("Failed to create deployment: {0}")]
    DeploymentTrigger(String),

    #[error("Failed to fetch deployment: {0}")]
    StatusFetch(String),
}

/// Orchestrated operations, used to prefix failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Deploy,
    Status,
}

impl Operation {
    /// Prefix placed in front of the inner error message.
    pub fn failure_prefix(&self) -> &'static str {
        match self {
            Operation::Deploy => "Deployment failed",
            Operation::Status => "Failed to get deployment status",
        }
    }

    /// Tool name reported as the error context.
    pub fn tool_name(&self) -> &'static str {
        match self {
            Operation::Deploy => "deployRepo",
            Operation::Status => "getDeploymentStatus",
        }
    }
}

/// A component failure seen at the orchestrator boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{prefix}: {source}", prefix = .operation.failure_prefix())]
pub struct OperationError {
    pub operation: Operation,
    pub source: DeployError,
}

impl OperationError {
    pub fn new(operation: Operation, source: DeployError) -> Self {
        Self { operation, source }
    }
}

/// Application-level errors returned by tool handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Tool parameters missing, mistyped or malformed
    #[error("{0}")]
    ParameterValidation(String),

    /// Credentials absent or not in an accepted format
    #[error("{0}")]
    AuthenticationMissing(String),

    /// No tool registered under the requested name
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Orchestrated operation failed
    #[error(transparent)]
    Operation(#[from] OperationError),

    /// Unexpected failure inside the server
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status_code_and_error(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::ParameterValidation(_) => (StatusCode::BAD_REQUEST, "PARAMETER_VALIDATION"),
            AppError::AuthenticationMissing(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            AppError::UnknownTool(_) => (StatusCode::NOT_FOUND, "UNKNOWN_TOOL"),
            AppError::Operation(_) => (StatusCode::BAD_REQUEST, "OPERATION_FAILED"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    /// Short context string included in the error envelope.
    pub fn context(&self) -> &'static str {
        match self {
            AppError::ParameterValidation(_) => "parameter validation",
            AppError::AuthenticationMissing(_) => "authentication",
            AppError::UnknownTool(_) => "tool dispatch",
            AppError::Operation(op) => op.operation.tool_name(),
            AppError::Internal(_) => "internal",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status_code_and_error().0
    }

    fn error_response(&self) -> HttpResponse {
        let (status, error_code) = self.status_code_and_error();

        let message = match self {
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                "An internal server error occurred".to_string()
            }
            _ => self.to_string(),
        };

        HttpResponse::build(status).json(ErrorResponse {
            success: false,
            error: error_code.to_string(),
            message,
            status_code: status.as_u16(),
            context: self.context().to_string(),
        })
    }
}

/// Error envelope returned for every failed call.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
    pub status_code: u16,
    pub context: String,
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::ParameterValidation(format!("Invalid JSON parameters: {}", err))
    }
}

/// Failures raised by actix extractors, such as an oversized or unreadable body.
///
/// Client errors become parameter errors; anything else is internal.
impl From<actix_web::Error> for AppError {
    fn from(err: actix_web::Error) -> Self {
        if err.as_response_error().status_code().is_client_error() {
            AppError::ParameterValidation(format!("Invalid request body: {}", err))
        } else {
            AppError::Internal(err.to_string())
        }
    }
}
