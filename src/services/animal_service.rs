//! Animal service - Handles animal registration and care records.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{Animal, AnimalChanges, AnimalStatus, ImageUpload, NewAnimal};
use crate::errors::{AppResult, OptionExt};
use crate::infra::{ImageStore, UnitOfWork};

const IMAGE_FOLDER: &str = "animals";

/// Animal service trait for dependency injection.
#[async_trait]
pub trait AnimalService: Send + Sync {
    /// Register an animal; status defaults to "Disponível".
    async fn register_animal(&self, animal: NewAnimal) -> AppResult<Animal>;

    async fn get_animal(&self, id: Uuid) -> AppResult<Animal>;

    /// List animals matching an optional name/breed search.
    async fn list_animals(&self, query: Option<String>) -> AppResult<Vec<Animal>>;

    async fn update_animal(&self, id: Uuid, changes: AnimalChanges) -> AppResult<Animal>;

    /// Replace the animal's picture.
    async fn set_animal_image(&self, id: Uuid, image: ImageUpload) -> AppResult<Animal>;

    /// Direct status change by staff, outside any adoption.
    async fn change_status(&self, id: Uuid, status: AnimalStatus) -> AppResult<Animal>;

    /// Remove an animal; its adoptions are left in place.
    async fn delete_animal(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of AnimalService using Unit of Work.
pub struct AnimalManager<U: UnitOfWork> {
    uow: Arc<U>,
    images: ImageStore,
}

impl<U: UnitOfWork> AnimalManager<U> {
    pub fn new(uow: Arc<U>, images: ImageStore) -> Self {
        Self { uow, images }
    }
}

#[async_trait]
impl<U: UnitOfWork> AnimalService for AnimalManager<U> {
    async fn register_animal(&self, mut animal: NewAnimal) -> AppResult<Animal> {
        animal.validate()?;

        let image = match animal.image.take() {
            Some(upload) => Some(self.images.store(IMAGE_FOLDER, &upload).await?),
            None => None,
        };

        let created = self.uow.animals().create(animal, image).await?;
        tracing::info!(animal_id = %created.id, name = %created.name, "animal registered");
        Ok(created)
    }

    async fn get_animal(&self, id: Uuid) -> AppResult<Animal> {
        self.uow
            .animals()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Animal")
    }

    async fn list_animals(&self, query: Option<String>) -> AppResult<Vec<Animal>> {
        let animals = self.uow.animals().list().await?;
        Ok(match query {
            Some(query) => animals
                .into_iter()
                .filter(|animal| animal.matches_search(&query))
                .collect(),
            None => animals,
        })
    }

    async fn update_animal(&self, id: Uuid, changes: AnimalChanges) -> AppResult<Animal> {
        changes.validate()?;
        self.uow.animals().update(id, changes).await
    }

    async fn set_animal_image(&self, id: Uuid, image: ImageUpload) -> AppResult<Animal> {
        image.validate()?;
        // fail before storing anything for an unknown animal
        self.get_animal(id).await?;

        let reference = self.images.store(IMAGE_FOLDER, &image).await?;
        let changes = AnimalChanges {
            image: Some(reference),
            ..Default::default()
        };
        self.uow.animals().update(id, changes).await
    }

    async fn change_status(&self, id: Uuid, status: AnimalStatus) -> AppResult<Animal> {
        let animal = self.uow.animals().set_status(id, status).await?;
        tracing::info!(animal_id = %id, status = %status, "animal status changed");
        Ok(animal)
    }

    async fn delete_animal(&self, id: Uuid) -> AppResult<()> {
        self.uow.animals().delete(id).await?;
        tracing::info!(animal_id = %id, "animal deleted");
        Ok(())
    }
}
