//! Dottify Server Library
//!
//! Music catalog web service: REST API, human-facing routes, JWT
//! authentication and configuration.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod router;
pub mod services;
pub mod state;
pub mod web;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use router::create_router;
pub use services::{AuthService, CatalogService, Links};
pub use state::AppState;
