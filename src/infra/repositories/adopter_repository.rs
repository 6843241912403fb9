//! Adopter repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set, SqlErr,
};
use uuid::Uuid;

use super::entities::adopter::{self, ActiveModel, Entity as AdopterEntity};
use crate::domain::{Adopter, AdopterChanges, AdopterIdentity, NewAdopter};
use crate::errors::{AppError, AppResult};
use crate::infra::change_feed::{Change, ChangeFeed, Collection};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Adopter repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AdopterRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Adopter>>;

    /// All adopters, ordered by name
    async fn list(&self) -> AppResult<Vec<Adopter>>;

    async fn create(&self, adopter: NewAdopter) -> AppResult<Adopter>;

    async fn update(&self, id: Uuid, changes: AdopterChanges) -> AppResult<Adopter>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;

    async fn count(&self) -> AppResult<u64>;

    /// Labels of the identity fields already used by another adopter.
    async fn find_conflicts(
        &self,
        identity: &AdopterIdentity,
        exclude: Option<Uuid>,
    ) -> AppResult<Vec<String>>;
}

/// SeaORM-backed adopter store
pub struct AdopterStore {
    db: DatabaseConnection,
    feed: ChangeFeed,
}

impl AdopterStore {
    pub fn new(db: DatabaseConnection, feed: ChangeFeed) -> Self {
        Self { db, feed }
    }
}

pub(crate) async fn find<C: ConnectionTrait>(conn: &C, id: Uuid) -> AppResult<Option<Adopter>> {
    let model = AdopterEntity::find_by_id(id).one(conn).await?;
    Ok(model.map(Adopter::from))
}

/// A unique index rejecting the write means a concurrent registration won
/// the race past `find_conflicts`.
fn identity_taken(err: DbErr) -> AppError {
    let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() else {
        return AppError::from(err);
    };
    // SQLite names the column (adopters.cpf), Postgres the index (idx_adopters_cpf)
    let detail = detail.to_lowercase();
    let field = if detail.contains("adopters.cpf") || detail.contains("adopters_cpf") {
        "CPF"
    } else if detail.contains("adopters.rg") || detail.contains("adopters_rg") {
        "RG"
    } else {
        "Adopter"
    };
    AppError::conflict(field)
}

#[async_trait]
impl AdopterRepository for AdopterStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Adopter>> {
        find(&self.db, id).await
    }

    async fn list(&self) -> AppResult<Vec<Adopter>> {
        let models = AdopterEntity::find()
            .order_by_asc(adopter::Column::Name)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Adopter::from).collect())
    }

    async fn create(&self, adopter: NewAdopter) -> AppResult<Adopter> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(Some(adopter.name)),
            email: Set(Some(adopter.email)),
            phone: Set(Some(adopter.phone)),
            sex: Set(Some(adopter.sex)),
            rg: Set(Some(adopter.rg)),
            cpf: Set(Some(adopter.cpf)),
            marital_status: Set(Some(adopter.marital_status)),
            state: Set(Some(adopter.state)),
            city: Set(Some(adopter.city)),
            district: Set(Some(adopter.district)),
            street: Set(Some(adopter.street)),
            number: Set(Some(adopter.number)),
            complement: Set(Some(adopter.complement)),
            cep: Set(Some(adopter.cep)),
            has_pets: Set(Some(adopter.has_pets)),
            notes: Set(Some(adopter.notes)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(identity_taken)?;
        self.feed.publish(Change::added(Collection::Adopters, model.id));
        Ok(Adopter::from(model))
    }

    async fn update(&self, id: Uuid, changes: AdopterChanges) -> AppResult<Adopter> {
        let model = AdopterEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound("Adopter"))?;

        let mut active: ActiveModel = model.into();

        macro_rules! apply {
            ($($field:ident),+ $(,)?) => {
                $(
                    if let Some(value) = changes.$field {
                        active.$field = Set(Some(value));
                    }
                )+
            };
        }
        apply!(
            name,
            email,
            phone,
            sex,
            rg,
            cpf,
            marital_status,
            state,
            city,
            district,
            street,
            number,
            complement,
            cep,
            has_pets,
            notes,
        );
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(identity_taken)?;
        self.feed.publish(Change::modified(Collection::Adopters, id));
        Ok(Adopter::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = AdopterEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Adopter"));
        }

        self.feed.publish(Change::removed(Collection::Adopters, id));
        Ok(())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(AdopterEntity::find().count(&self.db).await?)
    }

    async fn find_conflicts(
        &self,
        identity: &AdopterIdentity,
        exclude: Option<Uuid>,
    ) -> AppResult<Vec<String>> {
        let checks: Vec<(&str, adopter::Column, &str)> = [
            ("CPF", adopter::Column::Cpf, identity.cpf.as_deref()),
            ("RG", adopter::Column::Rg, identity.rg.as_deref()),
            ("Email", adopter::Column::Email, identity.email.as_deref()),
            ("Phone", adopter::Column::Phone, identity.phone.as_deref()),
        ]
        .into_iter()
        .filter_map(|(label, column, value)| value.map(|value| (label, column, value)))
        .collect();

        if checks.is_empty() {
            return Ok(Vec::new());
        }

        let any_field = checks
            .iter()
            .fold(Condition::any(), |cond, (_, column, value)| {
                cond.add(column.eq(*value))
            });

        let mut query = AdopterEntity::find().filter(any_field);
        if let Some(exclude) = exclude {
            query = query.filter(adopter::Column::Id.ne(exclude));
        }
        let existing = query.all(&self.db).await?;

        let conflicts = checks
            .iter()
            .filter(|(_, column, value)| {
                existing
                    .iter()
                    .any(|model| stored_identity(model, *column) == Some(*value))
            })
            .map(|(label, _, _)| label.to_string())
            .collect();

        Ok(conflicts)
    }
}

fn stored_identity(model: &adopter::Model, column: adopter::Column) -> Option<&str> {
    match column {
        adopter::Column::Cpf => model.cpf.as_deref(),
        adopter::Column::Rg => model.rg.as_deref(),
        adopter::Column::Email => model.email.as_deref(),
        adopter::Column::Phone => model.phone.as_deref(),
        _ => None,
    }
}
