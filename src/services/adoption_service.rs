//! Adoption service - registers, updates and removes adoptions.
//!
//! Every adoption write also sets the linked animal's status, and both
//! writes share one transaction:
//!
//! | adoption becomes | animal becomes |
//! |------------------|----------------|
//! | Em andamento     | Em andamento   |
//! | Adotado          | Adotado        |
//! | Devolvido        | Disponível     |
//! | (deleted)        | Disponível     |
//!
//! An animal has at most one active (non-returned) adoption. While one is
//! active, edits to the animal's returned adoptions leave its status alone.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;
use validator::Validate;

use super::container::parallel;
use crate::domain::{
    Adoption, AdoptionRow, AdoptionStatus, AdoptionUpdate, Animal, AnimalStatus, NewAdoption,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::with_transaction;

/// Adoption service trait for dependency injection.
#[async_trait]
pub trait AdoptionService: Send + Sync {
    /// Register an adoption for an available animal.
    async fn register_adoption(&self, adoption: NewAdoption) -> AppResult<Adoption>;

    /// Change status (and optionally notes/date) of an adoption.
    async fn update_adoption(&self, id: Uuid, update: AdoptionUpdate) -> AppResult<Adoption>;

    /// Remove an adoption, making its animal available again.
    async fn delete_adoption(&self, id: Uuid) -> AppResult<()>;

    async fn get_adoption(&self, id: Uuid) -> AppResult<Adoption>;

    /// Display rows with resolved names, filtered by an optional search term.
    async fn list_adoptions(&self, query: Option<String>) -> AppResult<Vec<AdoptionRow>>;
}

/// Concrete implementation of AdoptionService using Unit of Work.
pub struct AdoptionManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> AdoptionManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> AdoptionService for AdoptionManager<U> {
    async fn register_adoption(&self, adoption: NewAdoption) -> AppResult<Adoption> {
        adoption.validate()?;
        if !adoption.status.can_open() {
            return Err(AppError::validation(format!(
                "A new adoption must start as '{}' or '{}'",
                AdoptionStatus::InProgress,
                AdoptionStatus::Adopted
            )));
        }

        let created = with_transaction!(self.uow, |ctx| {
            let animal = ctx
                .animals()
                .find_by_id(adoption.animal_id)
                .await?
                .ok_or_not_found("Animal")?;
            ctx.find_adopter(adoption.adopter_id)
                .await?
                .ok_or_not_found("Adopter")?;
            ctx.find_staff(adoption.employee_id)
                .await?
                .ok_or_not_found("Staff member")?;

            if animal.status != AnimalStatus::Available {
                return Err(AppError::validation(format!(
                    "Animal is not available for adoption (status: {})",
                    animal.status
                )));
            }
            if ctx
                .adoptions()
                .find_active_for_animal(animal.id, None)
                .await?
                .is_some()
            {
                return Err(AppError::validation("Animal already has an active adoption"));
            }

            let created = ctx.adoptions().create(adoption).await?;
            ctx.animals()
                .set_status(created.animal_id, created.status.animal_status())
                .await?;
            Ok(created)
        })?;

        tracing::info!(
            adoption_id = %created.id,
            animal_id = %created.animal_id,
            status = %created.status,
            "adoption registered"
        );
        Ok(created)
    }

    async fn update_adoption(&self, id: Uuid, update: AdoptionUpdate) -> AppResult<Adoption> {
        update.validate()?;
        let updated = with_transaction!(self.uow, |ctx| {
            let current = ctx
                .adoptions()
                .find_by_id(id)
                .await?
                .ok_or_not_found("Adoption")?;

            let other_active = ctx
                .adoptions()
                .find_active_for_animal(current.animal_id, Some(id))
                .await?;
            if update.status.is_active() && other_active.is_some() {
                return Err(AppError::validation(
                    "Animal already has another active adoption",
                ));
            }

            let updated = ctx.adoptions().update(id, &update).await?;
            // a returned adoption must not override the status owned by the active one
            if other_active.is_none() {
                ctx.animals()
                    .set_status(updated.animal_id, updated.status.animal_status())
                    .await?;
            }
            Ok(updated)
        })?;

        tracing::info!(
            adoption_id = %updated.id,
            animal_id = %updated.animal_id,
            status = %updated.status,
            "adoption updated"
        );
        Ok(updated)
    }

    async fn delete_adoption(&self, id: Uuid) -> AppResult<()> {
        let animal_id = with_transaction!(self.uow, |ctx| {
            let current = ctx
                .adoptions()
                .find_by_id(id)
                .await?
                .ok_or_not_found("Adoption")?;

            ctx.adoptions().delete(id).await?;

            // orphaned adoptions must stay removable
            if ctx.animals().find_by_id(current.animal_id).await?.is_some() {
                ctx.animals()
                    .set_status(current.animal_id, AnimalStatus::Available)
                    .await?;
            } else {
                tracing::warn!(
                    adoption_id = %id,
                    animal_id = %current.animal_id,
                    "deleted adoption referenced a missing animal"
                );
            }
            Ok(current.animal_id)
        })?;

        tracing::info!(adoption_id = %id, animal_id = %animal_id, "adoption deleted");
        Ok(())
    }

    async fn get_adoption(&self, id: Uuid) -> AppResult<Adoption> {
        self.uow
            .adoptions()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Adoption")
    }

    async fn list_adoptions(&self, query: Option<String>) -> AppResult<Vec<AdoptionRow>> {
        let (adoptions, animals, adopters, staff) = parallel::join4(
            self.uow.adoptions().list(),
            self.uow.animals().list(),
            self.uow.adopters().list(),
            self.uow.staff().list(),
        )
        .await?;

        let animals: HashMap<Uuid, Animal> = animals.into_iter().map(|a| (a.id, a)).collect();
        let adopters: HashMap<Uuid, String> =
            adopters.into_iter().map(|a| (a.id, a.name)).collect();
        let staff: HashMap<Uuid, String> = staff.into_iter().map(|s| (s.id, s.name)).collect();

        let query = query.unwrap_or_default();
        let rows = adoptions
            .iter()
            .map(|adoption| {
                AdoptionRow::resolve(
                    adoption,
                    animals.get(&adoption.animal_id),
                    adopters.get(&adoption.adopter_id).map(String::as_str),
                    staff.get(&adoption.employee_id).map(String::as_str),
                )
            })
            .filter(|row| row.matches_search(&query))
            .collect();

        Ok(rows)
    }
}
