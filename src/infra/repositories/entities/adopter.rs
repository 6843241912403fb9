//! Adopter database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::config::UNNAMED;
use crate::domain::Adopter;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "adopters")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub sex: Option<String>,
    pub rg: Option<String>,
    pub cpf: Option<String>,
    pub marital_status: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub cep: Option<String>,
    pub has_pets: Option<bool>,
    pub notes: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Adopter {
    fn from(model: Model) -> Self {
        Adopter {
            id: model.id,
            name: model.name.unwrap_or_else(|| UNNAMED.to_string()),
            email: model.email.unwrap_or_default(),
            phone: model.phone.unwrap_or_default(),
            sex: model.sex.unwrap_or_default(),
            rg: model.rg.unwrap_or_default(),
            cpf: model.cpf.unwrap_or_default(),
            marital_status: model.marital_status.unwrap_or_default(),
            state: model.state.unwrap_or_default(),
            city: model.city.unwrap_or_default(),
            district: model.district.unwrap_or_default(),
            street: model.street.unwrap_or_default(),
            number: model.number.unwrap_or_default(),
            complement: model.complement.unwrap_or_default(),
            cep: model.cep.unwrap_or_default(),
            has_pets: model.has_pets.unwrap_or(false),
            notes: model.notes.unwrap_or_default(),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
