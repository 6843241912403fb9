//! Adoption repository implementation.
//!
//! Reads go through `AdoptionRepository`. Writes always touch the linked
//! animal as well, so they are only exposed inside a transaction (see
//! `TransactionContext::adoptions`); the helpers below back both paths.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::adoption::{self, ActiveModel, Entity as AdoptionEntity};
use crate::domain::{Adoption, AdoptionStatus, AdoptionUpdate, NewAdoption};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Adoption repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AdoptionRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Adoption>>;

    /// All adoptions, newest first
    async fn list(&self) -> AppResult<Vec<Adoption>>;

    async fn count(&self) -> AppResult<u64>;
}

/// SeaORM-backed adoption store (read side)
pub struct AdoptionStore {
    db: DatabaseConnection,
}

impl AdoptionStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(crate) async fn find<C: ConnectionTrait>(conn: &C, id: Uuid) -> AppResult<Option<Adoption>> {
    let model = AdoptionEntity::find_by_id(id).one(conn).await?;
    Ok(model.map(Adoption::from))
}

/// The animal's non-returned adoption, ignoring `exclude`.
pub(crate) async fn find_active_for_animal<C: ConnectionTrait>(
    conn: &C,
    animal_id: Uuid,
    exclude: Option<Uuid>,
) -> AppResult<Option<Adoption>> {
    let mut query = AdoptionEntity::find()
        .filter(adoption::Column::AnimalId.eq(animal_id))
        .filter(adoption::Column::Status.ne(AdoptionStatus::Returned.as_str()));
    if let Some(exclude) = exclude {
        query = query.filter(adoption::Column::Id.ne(exclude));
    }

    let model = query.one(conn).await?;
    Ok(model.map(Adoption::from))
}

pub(crate) async fn insert<C: ConnectionTrait>(
    conn: &C,
    adoption: NewAdoption,
) -> AppResult<Adoption> {
    let now = chrono::Utc::now();
    let active_model = ActiveModel {
        id: Set(Uuid::new_v4()),
        animal_id: Set(adoption.animal_id),
        adopter_id: Set(adoption.adopter_id),
        employee_id: Set(adoption.employee_id),
        status: Set(adoption.status.as_str().to_string()),
        adoption_date: Set(Some(adoption.adoption_date)),
        notes: Set(adoption.notes),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let model = active_model.insert(conn).await?;
    Ok(Adoption::from(model))
}

pub(crate) async fn update<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
    update: &AdoptionUpdate,
) -> AppResult<Adoption> {
    let model = AdoptionEntity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or(AppError::NotFound("Adoption"))?;

    let mut active: ActiveModel = model.into();
    active.status = Set(update.status.as_str().to_string());
    if let Some(notes) = &update.notes {
        active.notes = Set(Some(notes.clone()));
    }
    if let Some(date) = update.adoption_date {
        active.adoption_date = Set(Some(date));
    }
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(conn).await?;
    Ok(Adoption::from(model))
}

pub(crate) async fn delete<C: ConnectionTrait>(conn: &C, id: Uuid) -> AppResult<()> {
    let result = AdoptionEntity::delete_by_id(id).exec(conn).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Adoption"));
    }
    Ok(())
}

#[async_trait]
impl AdoptionRepository for AdoptionStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Adoption>> {
        find(&self.db, id).await
    }

    async fn list(&self) -> AppResult<Vec<Adoption>> {
        let models = AdoptionEntity::find()
            .order_by_desc(adoption::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Adoption::from).collect())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(AdoptionEntity::find().count(&self.db).await?)
    }
}
