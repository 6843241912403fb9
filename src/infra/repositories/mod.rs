//! Repository layer - Data access abstraction
//!
//! One repository per collection. Stores publish to the change feed after
//! each write so live projections can follow along.

mod account_repository;
pub(crate) mod adopter_repository;
pub(crate) mod adoption_repository;
pub(crate) mod animal_repository;
pub(crate) mod entities;
pub(crate) mod staff_repository;

pub use account_repository::{AccountRepository, AccountStore};
pub use adopter_repository::{AdopterRepository, AdopterStore};
pub use adoption_repository::{AdoptionRepository, AdoptionStore};
pub use animal_repository::{AnimalRepository, AnimalStore};
pub use staff_repository::{StaffRepository, StaffStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use account_repository::MockAccountRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use adopter_repository::MockAdopterRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use adoption_repository::MockAdoptionRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use animal_repository::MockAnimalRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use staff_repository::MockStaffRepository;
