//! campline-server: record service for a camp signup domain
//!
//! Exposes campers, activities, and the signups joining them as a
//! small JSON HTTP surface backed by SQLite.

pub mod db;
pub mod http;
pub mod models;

pub use http::error::ApiError;
pub use http::server::{build_router, run_server, ServerConfig, ServerError};
