//! Adopter service - Handles adopter registration and updates.
//!
//! CPF, RG, email and phone identify an adopter and must be unique.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{Adopter, AdopterChanges, AdopterIdentity, NewAdopter};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Adopter service trait for dependency injection.
#[async_trait]
pub trait AdopterService: Send + Sync {
    async fn register_adopter(&self, adopter: NewAdopter) -> AppResult<Adopter>;

    async fn get_adopter(&self, id: Uuid) -> AppResult<Adopter>;

    /// List adopters matching an optional name/email/phone/CPF/RG search.
    async fn list_adopters(&self, query: Option<String>) -> AppResult<Vec<Adopter>>;

    async fn update_adopter(&self, id: Uuid, changes: AdopterChanges) -> AppResult<Adopter>;

    async fn delete_adopter(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of AdopterService using Unit of Work.
pub struct AdopterManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> AdopterManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn ensure_unique(&self, identity: &AdopterIdentity, exclude: Option<Uuid>) -> AppResult<()> {
        let taken = self.uow.adopters().find_conflicts(identity, exclude).await?;
        if taken.is_empty() {
            Ok(())
        } else {
            Err(AppError::conflict(taken.join(", ")))
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> AdopterService for AdopterManager<U> {
    async fn register_adopter(&self, adopter: NewAdopter) -> AppResult<Adopter> {
        adopter.validate()?;
        let adopter = adopter.normalized();
        self.ensure_unique(&adopter.identity(), None).await?;

        let created = self.uow.adopters().create(adopter).await?;
        tracing::info!(adopter_id = %created.id, "adopter registered");
        Ok(created)
    }

    async fn get_adopter(&self, id: Uuid) -> AppResult<Adopter> {
        self.uow
            .adopters()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Adopter")
    }

    async fn list_adopters(&self, query: Option<String>) -> AppResult<Vec<Adopter>> {
        let adopters = self.uow.adopters().list().await?;
        Ok(match query {
            Some(query) => adopters
                .into_iter()
                .filter(|adopter| adopter.matches_search(&query))
                .collect(),
            None => adopters,
        })
    }

    async fn update_adopter(&self, id: Uuid, changes: AdopterChanges) -> AppResult<Adopter> {
        changes.validate()?;
        let changes = changes.normalized();
        self.ensure_unique(&changes.identity(), Some(id)).await?;

        self.uow.adopters().update(id, changes).await
    }

    async fn delete_adopter(&self, id: Uuid) -> AppResult<()> {
        self.uow.adopters().delete(id).await?;
        tracing::info!(adopter_id = %id, "adopter deleted");
        Ok(())
    }
}
