#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod error;
pub mod errors;
pub mod infra;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod trace_ctx;

// Re-exports for public API
pub use config::db::{db_url, DbProfile};
pub use error::AppError;
pub use infra::state::build_state;
pub use middleware::cors::cors_middleware;
pub use middleware::request_trace::RequestTrace;
pub use state::app_state::AppState;
