//! Adoption database entity for SeaORM.
//!
//! References to animals, adopters and staff are plain columns without
//! foreign keys; removing an animal leaves its adoptions in place.

use sea_orm::entity::prelude::*;

use crate::domain::{Adoption, AdoptionStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "adoptions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub animal_id: Uuid,
    pub adopter_id: Uuid,
    pub employee_id: Uuid,
    pub status: String,
    pub adoption_date: Option<Date>,
    pub notes: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Adoption {
    fn from(model: Model) -> Self {
        let status = model.status.parse().unwrap_or_else(|_| {
            tracing::warn!(id = %model.id, status = %model.status, "unknown adoption status");
            AdoptionStatus::InProgress
        });
        Adoption {
            id: model.id,
            animal_id: model.animal_id,
            adopter_id: model.adopter_id,
            employee_id: model.employee_id,
            status,
            adoption_date: model.adoption_date,
            notes: model.notes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
