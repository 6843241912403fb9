//! Animal database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::config::UNNAMED;
use crate::domain::{Animal, AnimalStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "animals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: Option<String>,
    pub species: Option<String>,
    pub breed: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub sex: Option<String>,
    pub birth_date: Option<Date>,
    pub rescue_date: Option<Date>,
    pub status: String,
    pub image: Option<String>,
    pub needs_vaccine: Option<bool>,
    pub needs_checkup: Option<bool>,
    pub notes: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity, filling gaps left by older rows
impl From<Model> for Animal {
    fn from(model: Model) -> Self {
        let status = model.status.parse().unwrap_or_else(|_| {
            tracing::warn!(id = %model.id, status = %model.status, "unknown animal status");
            AnimalStatus::default()
        });
        Animal {
            id: model.id,
            name: model.name.unwrap_or_else(|| UNNAMED.to_string()),
            species: model.species.unwrap_or_default(),
            breed: model.breed.unwrap_or_default(),
            color: model.color.unwrap_or_default(),
            size: model.size.unwrap_or_default(),
            sex: model.sex.unwrap_or_default(),
            birth_date: model.birth_date,
            rescue_date: model.rescue_date,
            status,
            image: model.image,
            needs_vaccine: model.needs_vaccine.unwrap_or(false),
            needs_checkup: model.needs_checkup.unwrap_or(false),
            notes: model.notes.unwrap_or_default(),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
