//! Vercel deployer library.
//!
//! Tool endpoints that validate a GitHub repository, provision a matching
//! Vercel project and trigger deployments, plus deployment status lookups.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
