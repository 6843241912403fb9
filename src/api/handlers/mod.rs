//! HTTP request handlers.

pub mod adopter_handler;
pub mod adoption_handler;
pub mod animal_handler;
pub mod auth_handler;
pub mod dashboard_handler;
pub mod staff_handler;

pub use adopter_handler::adopter_routes;
pub use adoption_handler::adoption_routes;
pub use animal_handler::animal_routes;
pub use auth_handler::{auth_routes, session_routes};
pub use dashboard_handler::dashboard_routes;
pub use staff_handler::staff_routes;
