//! Shelter Admin - administration backend for an animal shelter.
//!
//! Animals, adopters, staff and adoptions behind a JSON API. Adoption
//! writes keep the linked animal's status consistent inside one store
//! transaction, and live projections mirror the animals collection for
//! listing.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and logic
//! - **services**: Application use cases and business logic
//! - **infra**: Database, change feed, object storage
//! - **projection**: Live mirrors fed by the change feed
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared request/response types
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
//! # Create a sign-in account
//! cargo run -- account create --email coordenacao@abrigo.org --password '...' --name Coordenação
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod projection;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use errors::{AppError, AppResult};
