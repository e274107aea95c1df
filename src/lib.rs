//! MovieHub - a movie catalog REST API
//!
//! Users keep favorites and ratings over a catalog of movies and genres.
//! Staff manage the catalog through a JSON admin console.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core entities, payloads and the access policy
//! - **services**: Application use cases
//! - **infra**: Database, migrations and repositories
//! - **admin**: Admin console rows, links and export
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared types (pagination, responses)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Bootstrap a staff account
//! cargo run -- create-admin --username root --password change-me-now
//! ```

pub mod admin;
pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Password, User, UserRole};
pub use errors::{AppError, AppResult};
