//! Aggregate counts shown on the dashboard.

use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

use super::adoption::{Adoption, AdoptionStatus};
use super::animal::{Animal, AnimalStatus};

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DashboardStats {
    pub animals: u64,
    pub staff: u64,
    pub adopters: u64,
    pub adoptions: u64,
    /// Animal count per status label, every status present
    pub animals_by_status: BTreeMap<String, u64>,
    /// Animal count per species
    pub animals_by_species: BTreeMap<String, u64>,
    /// Adoption count per status label, every status present
    pub adoptions_by_status: BTreeMap<String, u64>,
}

impl DashboardStats {
    pub fn collect(animals: &[Animal], adoptions: &[Adoption], staff: u64, adopters: u64) -> Self {
        let mut animals_by_status: BTreeMap<String, u64> = AnimalStatus::ALL
            .iter()
            .map(|status| (status.as_str().to_string(), 0))
            .collect();
        let mut animals_by_species = BTreeMap::new();
        for animal in animals {
            *animals_by_status
                .entry(animal.status.as_str().to_string())
                .or_default() += 1;
            *animals_by_species.entry(animal.species.clone()).or_default() += 1;
        }

        let mut adoptions_by_status: BTreeMap<String, u64> = AdoptionStatus::ALL
            .iter()
            .map(|status| (status.as_str().to_string(), 0))
            .collect();
        for adoption in adoptions {
            *adoptions_by_status
                .entry(adoption.status.as_str().to_string())
                .or_default() += 1;
        }

        Self {
            animals: animals.len() as u64,
            staff,
            adopters,
            adoptions: adoptions.len() as u64,
            animals_by_status,
            animals_by_species,
            adoptions_by_status,
        }
    }
}
