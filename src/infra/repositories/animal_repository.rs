//! Animal repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::animal::{self, ActiveModel, Entity as AnimalEntity};
use crate::domain::{Animal, AnimalChanges, AnimalStatus, NewAnimal};
use crate::errors::{AppError, AppResult};
use crate::infra::change_feed::{Change, ChangeFeed, Collection};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Animal repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AnimalRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Animal>>;

    /// All animals, ordered by name
    async fn list(&self) -> AppResult<Vec<Animal>>;

    /// Insert a new animal with an already resolved image reference
    async fn create(&self, animal: NewAnimal, image: Option<String>) -> AppResult<Animal>;

    async fn update(&self, id: Uuid, changes: AnimalChanges) -> AppResult<Animal>;

    async fn set_status(&self, id: Uuid, status: AnimalStatus) -> AppResult<Animal>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;

    async fn count(&self) -> AppResult<u64>;
}

/// SeaORM-backed animal store
pub struct AnimalStore {
    db: DatabaseConnection,
    feed: ChangeFeed,
}

impl AnimalStore {
    pub fn new(db: DatabaseConnection, feed: ChangeFeed) -> Self {
        Self { db, feed }
    }
}

pub(crate) async fn find<C: ConnectionTrait>(conn: &C, id: Uuid) -> AppResult<Option<Animal>> {
    let model = AnimalEntity::find_by_id(id).one(conn).await?;
    Ok(model.map(Animal::from))
}

pub(crate) async fn set_status<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
    status: AnimalStatus,
) -> AppResult<Animal> {
    let model = AnimalEntity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or(AppError::NotFound("Animal"))?;

    let mut active: ActiveModel = model.into();
    active.status = Set(status.as_str().to_string());
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(conn).await?;
    Ok(Animal::from(model))
}

#[async_trait]
impl AnimalRepository for AnimalStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Animal>> {
        find(&self.db, id).await
    }

    async fn list(&self) -> AppResult<Vec<Animal>> {
        let models = AnimalEntity::find()
            .order_by_asc(animal::Column::Name)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Animal::from).collect())
    }

    async fn create(&self, animal: NewAnimal, image: Option<String>) -> AppResult<Animal> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(Some(animal.name)),
            species: Set(Some(animal.species)),
            breed: Set(Some(animal.breed)),
            color: Set(Some(animal.color)),
            size: Set(Some(animal.size)),
            sex: Set(Some(animal.sex)),
            birth_date: Set(Some(animal.birth_date)),
            rescue_date: Set(Some(animal.rescue_date)),
            status: Set(animal.status.unwrap_or_default().as_str().to_string()),
            image: Set(image),
            needs_vaccine: Set(Some(animal.needs_vaccine)),
            needs_checkup: Set(Some(animal.needs_checkup)),
            notes: Set(animal.notes),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await?;
        self.feed.publish(Change::added(Collection::Animals, model.id));
        Ok(Animal::from(model))
    }

    async fn update(&self, id: Uuid, changes: AnimalChanges) -> AppResult<Animal> {
        let model = AnimalEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound("Animal"))?;

        let mut active: ActiveModel = model.into();

        if let Some(name) = changes.name {
            active.name = Set(Some(name));
        }
        if let Some(species) = changes.species {
            active.species = Set(Some(species));
        }
        if let Some(breed) = changes.breed {
            active.breed = Set(Some(breed));
        }
        if let Some(color) = changes.color {
            active.color = Set(Some(color));
        }
        if let Some(size) = changes.size {
            active.size = Set(Some(size));
        }
        if let Some(sex) = changes.sex {
            active.sex = Set(Some(sex));
        }
        if let Some(birth_date) = changes.birth_date {
            active.birth_date = Set(Some(birth_date));
        }
        if let Some(rescue_date) = changes.rescue_date {
            active.rescue_date = Set(Some(rescue_date));
        }
        if let Some(status) = changes.status {
            active.status = Set(status.as_str().to_string());
        }
        if let Some(needs_vaccine) = changes.needs_vaccine {
            active.needs_vaccine = Set(Some(needs_vaccine));
        }
        if let Some(needs_checkup) = changes.needs_checkup {
            active.needs_checkup = Set(Some(needs_checkup));
        }
        if let Some(notes) = changes.notes {
            active.notes = Set(Some(notes));
        }
        if let Some(image) = changes.image {
            active.image = Set(Some(image));
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await?;
        self.feed.publish(Change::modified(Collection::Animals, id));
        Ok(Animal::from(model))
    }

    async fn set_status(&self, id: Uuid, status: AnimalStatus) -> AppResult<Animal> {
        let animal = set_status(&self.db, id, status).await?;
        self.feed.publish(Change::modified(Collection::Animals, id));
        Ok(animal)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = AnimalEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Animal"));
        }

        self.feed.publish(Change::removed(Collection::Animals, id));
        Ok(())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(AnimalEntity::find().count(&self.db).await?)
    }
}
