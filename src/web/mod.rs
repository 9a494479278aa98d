//! Web API module.
//!
//! This module provides the JSON REST API: user registration, token
//! sessions and the per-user file hierarchy.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::create_router;
pub use server::WebServer;
