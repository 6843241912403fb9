//! Domain layer - Core business entities and logic
//!
//! Shelter records (animals, adopters, staff, adoptions), the rules that
//! tie adoption status to animal status, and the display formatting
//! shared by the services and the HTTP layer.

pub mod account;
pub mod adopter;
pub mod adoption;
pub mod animal;
pub mod dashboard;
pub mod formatters;
pub mod image;
pub mod password;
pub mod staff;

pub use account::{Account, AccountResponse};
pub use adopter::{Adopter, AdopterChanges, AdopterIdentity, NewAdopter};
pub use adoption::{Adoption, AdoptionRow, AdoptionStatus, AdoptionUpdate, NewAdoption};
pub use animal::{Animal, AnimalChanges, AnimalResponse, AnimalStatus, AnimalStatusChange, NewAnimal};
pub use dashboard::DashboardStats;
pub use image::ImageUpload;
pub use password::Password;
pub use staff::{NewStaff, Staff, StaffChanges, StaffRole};

use validator::ValidationError;

/// Rejects values that are empty once surrounding whitespace is trimmed.
pub(crate) fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Value cannot be blank".into());
        Err(err)
    } else {
        Ok(())
    }
}
