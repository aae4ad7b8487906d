//! Deployment status translation.

use crate::models::{Deployment, DeploymentState, StatusSummary};

/// Message reported for states outside the known set.
pub const UNKNOWN_STATUS_MESSAGE: &str = "Unknown deployment status";

/// Human-readable message for a deployment state.
pub fn status_message(state: &DeploymentState) -> &'static str {
    match state {
        DeploymentState::Building => "Deployment is currently building",
        DeploymentState::Error => "Deployment failed with errors",
        DeploymentState::Initializing => "Deployment is initializing",
        DeploymentState::Queued => "Deployment is queued and waiting to start",
        DeploymentState::Ready => "Deployment is live and ready",
        DeploymentState::Canceled => "Deployment was canceled",
        DeploymentState::Unknown(_) => UNKNOWN_STATUS_MESSAGE,
    }
}

/// Summarize a deployment for callers.
pub fn summarize(deployment: Deployment) -> StatusSummary {
    let state = &deployment.state;
    StatusSummary {
        status: state.to_string(),
        message: status_message(state).to_string(),
        is_live: *state == DeploymentState::Ready,
        has_error: *state == DeploymentState::Error,
        deployment,
    }
}
