//! Staff database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::config::UNNAMED;
use crate::domain::Staff;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "staff")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: Option<String>,
    pub role: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub sex: Option<String>,
    pub image: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Staff {
    fn from(model: Model) -> Self {
        Staff {
            id: model.id,
            name: model.name.unwrap_or_else(|| UNNAMED.to_string()),
            role: model.role.and_then(|role| role.parse().ok()),
            email: model.email.unwrap_or_default(),
            phone: model.phone.unwrap_or_default(),
            sex: model.sex.unwrap_or_default(),
            image: model.image,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
