//! Unit of Work pattern implementation.
//!
//! Centralizes repository access and runs multi-record writes in one
//! database transaction. Changes made inside a transaction are journaled
//! and only published to the change feed once the commit succeeds, so
//! subscribers never observe rolled-back writes.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sea_orm::{
    AccessMode, ConnectionTrait, DatabaseBackend, DatabaseConnection, DatabaseTransaction,
    IsolationLevel, TransactionTrait,
};
use uuid::Uuid;

use super::change_feed::{Change, ChangeFeed, Collection};
use super::repositories::{
    adopter_repository, adoption_repository, animal_repository, staff_repository,
    AccountRepository, AccountStore, AdopterRepository, AdopterStore, AdoptionRepository,
    AdoptionStore, AnimalRepository, AnimalStore, StaffRepository, StaffStore,
};
use crate::domain::{
    Adopter, Adoption, AdoptionUpdate, Animal, AnimalStatus, NewAdoption, Staff,
};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Not mockable directly due to the generic transaction method. Unit tests
/// implement it by hand around mocked repositories.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn animals(&self) -> Arc<dyn AnimalRepository>;

    fn adopters(&self) -> Arc<dyn AdopterRepository>;

    fn staff(&self) -> Arc<dyn StaffRepository>;

    fn adoptions(&self) -> Arc<dyn AdoptionRepository>;

    fn accounts(&self) -> Arc<dyn AccountRepository>;

    /// Feed of committed changes
    fn changes(&self) -> ChangeFeed;

    /// Execute a closure within a transaction.
    ///
    /// Committed on success, rolled back on error.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
///
/// Everything done through this context is part of the same database
/// transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
    journal: &'a Mutex<Vec<Change>>,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction, journal: &'a Mutex<Vec<Change>>) -> Self {
        Self { txn, journal }
    }

    pub fn animals(&self) -> TxAnimalRepository<'_> {
        TxAnimalRepository { txn: self.txn, journal: self.journal }
    }

    pub fn adoptions(&self) -> TxAdoptionRepository<'_> {
        TxAdoptionRepository { txn: self.txn, journal: self.journal }
    }

    pub async fn find_adopter(&self, id: Uuid) -> AppResult<Option<Adopter>> {
        adopter_repository::find(self.txn, id).await
    }

    pub async fn find_staff(&self, id: Uuid) -> AppResult<Option<Staff>> {
        staff_repository::find(self.txn, id).await
    }
}

fn record(journal: &Mutex<Vec<Change>>, change: Change) {
    // a poisoned journal only means another writer panicked mid-push
    let mut pending = journal.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    pending.push(change);
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    feed: ChangeFeed,
    animal_repo: Arc<AnimalStore>,
    adopter_repo: Arc<AdopterStore>,
    staff_repo: Arc<StaffStore>,
    adoption_repo: Arc<AdoptionStore>,
    account_repo: Arc<AccountStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self::with_feed(db, ChangeFeed::default())
    }

    pub fn with_feed(db: DatabaseConnection, feed: ChangeFeed) -> Self {
        Self {
            animal_repo: Arc::new(AnimalStore::new(db.clone(), feed.clone())),
            adopter_repo: Arc::new(AdopterStore::new(db.clone(), feed.clone())),
            staff_repo: Arc::new(StaffStore::new(db.clone(), feed.clone())),
            adoption_repo: Arc::new(AdoptionStore::new(db.clone())),
            account_repo: Arc::new(AccountStore::new(db.clone())),
            db,
            feed,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn animals(&self) -> Arc<dyn AnimalRepository> {
        self.animal_repo.clone()
    }

    fn adopters(&self) -> Arc<dyn AdopterRepository> {
        self.adopter_repo.clone()
    }

    fn staff(&self) -> Arc<dyn StaffRepository> {
        self.staff_repo.clone()
    }

    fn adoptions(&self) -> Arc<dyn AdoptionRepository> {
        self.adoption_repo.clone()
    }

    fn accounts(&self) -> Arc<dyn AccountRepository> {
        self.account_repo.clone()
    }

    fn changes(&self) -> ChangeFeed {
        self.feed.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        // SQLite transactions are always serializable and take no options
        let txn = match self.db.get_database_backend() {
            DatabaseBackend::Sqlite => self.db.begin().await,
            _ => {
                self.db
                    .begin_with_config(
                        Some(IsolationLevel::ReadCommitted),
                        Some(AccessMode::ReadWrite),
                    )
                    .await
            }
        }
        .map_err(AppError::from)?;

        let journal = Mutex::new(Vec::new());
        let outcome = f(TransactionContext::new(&txn, &journal)).await;

        match outcome {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                let committed = journal
                    .into_inner()
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
                for change in committed {
                    self.feed.publish(change);
                }
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Transaction-aware animal repository
pub struct TxAnimalRepository<'a> {
    txn: &'a DatabaseTransaction,
    journal: &'a Mutex<Vec<Change>>,
}

impl<'a> TxAnimalRepository<'a> {
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Animal>> {
        animal_repository::find(self.txn, id).await
    }

    pub async fn set_status(&self, id: Uuid, status: AnimalStatus) -> AppResult<Animal> {
        let animal = animal_repository::set_status(self.txn, id, status).await?;
        record(self.journal, Change::modified(Collection::Animals, id));
        Ok(animal)
    }
}

/// Transaction-aware adoption repository
pub struct TxAdoptionRepository<'a> {
    txn: &'a DatabaseTransaction,
    journal: &'a Mutex<Vec<Change>>,
}

impl<'a> TxAdoptionRepository<'a> {
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Adoption>> {
        adoption_repository::find(self.txn, id).await
    }

    /// Active adoption of the animal other than `exclude`
    pub async fn find_active_for_animal(
        &self,
        animal_id: Uuid,
        exclude: Option<Uuid>,
    ) -> AppResult<Option<Adoption>> {
        adoption_repository::find_active_for_animal(self.txn, animal_id, exclude).await
    }

    pub async fn create(&self, adoption: NewAdoption) -> AppResult<Adoption> {
        let created = adoption_repository::insert(self.txn, adoption).await?;
        record(self.journal, Change::added(Collection::Adoptions, created.id));
        Ok(created)
    }

    pub async fn update(&self, id: Uuid, update: &AdoptionUpdate) -> AppResult<Adoption> {
        let updated = adoption_repository::update(self.txn, id, update).await?;
        record(self.journal, Change::modified(Collection::Adoptions, id));
        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        adoption_repository::delete(self.txn, id).await?;
        record(self.journal, Change::removed(Collection::Adoptions, id));
        Ok(())
    }
}

/// Simpler API for executing transactional operations.
///
/// This helper macro reduces boilerplate when using transactions.
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}
