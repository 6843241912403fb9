//! Staff repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::staff::{self, ActiveModel, Entity as StaffEntity};
use crate::domain::{NewStaff, Staff, StaffChanges};
use crate::errors::{AppError, AppResult};
use crate::infra::change_feed::{Change, ChangeFeed, Collection};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Staff repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait StaffRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Staff>>;

    /// All staff members, ordered by name
    async fn list(&self) -> AppResult<Vec<Staff>>;

    async fn create(&self, staff: NewStaff, image: Option<String>) -> AppResult<Staff>;

    async fn update(&self, id: Uuid, changes: StaffChanges) -> AppResult<Staff>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;

    async fn count(&self) -> AppResult<u64>;
}

/// SeaORM-backed staff store
pub struct StaffStore {
    db: DatabaseConnection,
    feed: ChangeFeed,
}

impl StaffStore {
    pub fn new(db: DatabaseConnection, feed: ChangeFeed) -> Self {
        Self { db, feed }
    }
}

pub(crate) async fn find<C: ConnectionTrait>(conn: &C, id: Uuid) -> AppResult<Option<Staff>> {
    let model = StaffEntity::find_by_id(id).one(conn).await?;
    Ok(model.map(Staff::from))
}

#[async_trait]
impl StaffRepository for StaffStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Staff>> {
        find(&self.db, id).await
    }

    async fn list(&self) -> AppResult<Vec<Staff>> {
        let models = StaffEntity::find()
            .order_by_asc(staff::Column::Name)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Staff::from).collect())
    }

    async fn create(&self, staff: NewStaff, image: Option<String>) -> AppResult<Staff> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(Some(staff.name)),
            role: Set(Some(staff.role.as_str().to_string())),
            email: Set(Some(staff.email)),
            phone: Set(Some(staff.phone)),
            sex: Set(Some(staff.sex)),
            image: Set(image),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await?;
        self.feed.publish(Change::added(Collection::Staff, model.id));
        Ok(Staff::from(model))
    }

    async fn update(&self, id: Uuid, changes: StaffChanges) -> AppResult<Staff> {
        let model = StaffEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound("Staff member"))?;

        let mut active: ActiveModel = model.into();

        if let Some(name) = changes.name {
            active.name = Set(Some(name));
        }
        if let Some(role) = changes.role {
            active.role = Set(Some(role.as_str().to_string()));
        }
        if let Some(email) = changes.email {
            active.email = Set(Some(email));
        }
        if let Some(phone) = changes.phone {
            active.phone = Set(Some(phone));
        }
        if let Some(sex) = changes.sex {
            active.sex = Set(Some(sex));
        }
        if let Some(image) = changes.image {
            active.image = Set(Some(image));
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await?;
        self.feed.publish(Change::modified(Collection::Staff, id));
        Ok(Staff::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = StaffEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Staff member"));
        }

        self.feed.publish(Change::removed(Collection::Staff, id));
        Ok(())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(StaffEntity::find().count(&self.db).await?)
    }
}
