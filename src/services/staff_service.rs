//! Staff service - Handles staff member records.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{ImageUpload, NewStaff, Staff, StaffChanges};
use crate::errors::{AppResult, OptionExt};
use crate::infra::{ImageStore, UnitOfWork};

const IMAGE_FOLDER: &str = "staff";

/// Staff service trait for dependency injection.
#[async_trait]
pub trait StaffService: Send + Sync {
    async fn register_staff(&self, staff: NewStaff) -> AppResult<Staff>;

    async fn get_staff(&self, id: Uuid) -> AppResult<Staff>;

    /// List staff matching an optional name/role search.
    async fn list_staff(&self, query: Option<String>) -> AppResult<Vec<Staff>>;

    async fn update_staff(&self, id: Uuid, changes: StaffChanges) -> AppResult<Staff>;

    async fn set_staff_image(&self, id: Uuid, image: ImageUpload) -> AppResult<Staff>;

    async fn delete_staff(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of StaffService using Unit of Work.
pub struct StaffManager<U: UnitOfWork> {
    uow: Arc<U>,
    images: ImageStore,
}

impl<U: UnitOfWork> StaffManager<U> {
    pub fn new(uow: Arc<U>, images: ImageStore) -> Self {
        Self { uow, images }
    }
}

#[async_trait]
impl<U: UnitOfWork> StaffService for StaffManager<U> {
    async fn register_staff(&self, mut staff: NewStaff) -> AppResult<Staff> {
        staff.validate()?;

        let image = match staff.image.take() {
            Some(upload) => Some(self.images.store(IMAGE_FOLDER, &upload).await?),
            None => None,
        };

        let created = self.uow.staff().create(staff, image).await?;
        tracing::info!(staff_id = %created.id, "staff member registered");
        Ok(created)
    }

    async fn get_staff(&self, id: Uuid) -> AppResult<Staff> {
        self.uow
            .staff()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Staff member")
    }

    async fn list_staff(&self, query: Option<String>) -> AppResult<Vec<Staff>> {
        let staff = self.uow.staff().list().await?;
        Ok(match query {
            Some(query) => staff
                .into_iter()
                .filter(|member| member.matches_search(&query))
                .collect(),
            None => staff,
        })
    }

    async fn update_staff(&self, id: Uuid, changes: StaffChanges) -> AppResult<Staff> {
        changes.validate()?;
        self.uow.staff().update(id, changes).await
    }

    async fn set_staff_image(&self, id: Uuid, image: ImageUpload) -> AppResult<Staff> {
        image.validate()?;
        self.get_staff(id).await?;

        let reference = self.images.store(IMAGE_FOLDER, &image).await?;
        let changes = StaffChanges {
            image: Some(reference),
            ..Default::default()
        };
        self.uow.staff().update(id, changes).await
    }

    async fn delete_staff(&self, id: Uuid) -> AppResult<()> {
        self.uow.staff().delete(id).await?;
        tracing::info!(staff_id = %id, "staff member deleted");
        Ok(())
    }
}
