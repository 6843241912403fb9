//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on the `UnitOfWork` abstraction for
//! repository access and transaction management.

mod adopter_service;
mod adoption_service;
mod animal_service;
mod auth_service;
pub mod container;
mod dashboard_service;
mod staff_service;

#[cfg(test)]
pub(crate) mod test_support;

// Service Container
pub use container::{parallel, ServiceContainer, Services};

// Service traits and implementations
pub use adopter_service::{AdopterManager, AdopterService};
pub use adoption_service::{AdoptionManager, AdoptionService};
pub use animal_service::{AnimalManager, AnimalService};
pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use dashboard_service::{DashboardReporter, DashboardService};
pub use staff_service::{StaffManager, StaffService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
