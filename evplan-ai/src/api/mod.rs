//! HTTP API handlers for evplan-ai

pub mod functions;
pub mod health;

pub use functions::function_routes;
pub use health::health_routes;
