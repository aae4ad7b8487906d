//! API endpoint modules.

pub mod health;
pub mod openapi;
pub mod tools;

pub use health::configure_health_routes;
pub use openapi::ApiDoc;
pub use tools::configure_routes as configure_tool_routes;
