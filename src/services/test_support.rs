//! Hand-written Unit of Work around mocked repositories.

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::{AppError, AppResult};
use crate::infra::repositories::{
    MockAccountRepository, MockAdopterRepository, MockAdoptionRepository, MockAnimalRepository,
    MockStaffRepository,
};
use crate::infra::{
    AccountRepository, AdopterRepository, AdoptionRepository, AnimalRepository, ChangeFeed,
    StaffRepository, TransactionContext, UnitOfWork,
};

/// Repositories default to mocks with no expectations; any call on them fails the test.
pub struct TestUnitOfWork {
    pub animals: Arc<MockAnimalRepository>,
    pub adopters: Arc<MockAdopterRepository>,
    pub staff: Arc<MockStaffRepository>,
    pub adoptions: Arc<MockAdoptionRepository>,
    pub accounts: Arc<MockAccountRepository>,
    pub(crate) feed: ChangeFeed,
}

impl Default for TestUnitOfWork {
    fn default() -> Self {
        Self {
            animals: Arc::new(MockAnimalRepository::new()),
            adopters: Arc::new(MockAdopterRepository::new()),
            staff: Arc::new(MockStaffRepository::new()),
            adoptions: Arc::new(MockAdoptionRepository::new()),
            accounts: Arc::new(MockAccountRepository::new()),
            feed: ChangeFeed::default(),
        }
    }
}

impl TestUnitOfWork {
    pub fn with_animals(animals: MockAnimalRepository) -> Self {
        Self {
            animals: Arc::new(animals),
            ..Default::default()
        }
    }

    pub fn with_staff(staff: MockStaffRepository) -> Self {
        Self {
            staff: Arc::new(staff),
            ..Default::default()
        }
    }

    pub fn with_adopters(adopters: MockAdopterRepository) -> Self {
        Self {
            adopters: Arc::new(adopters),
            ..Default::default()
        }
    }

    pub fn with_accounts(accounts: MockAccountRepository) -> Self {
        Self {
            accounts: Arc::new(accounts),
            ..Default::default()
        }
    }
}

#[async_trait]
impl UnitOfWork for TestUnitOfWork {
    fn animals(&self) -> Arc<dyn AnimalRepository> {
        self.animals.clone()
    }

    fn adopters(&self) -> Arc<dyn AdopterRepository> {
        self.adopters.clone()
    }

    fn staff(&self) -> Arc<dyn StaffRepository> {
        self.staff.clone()
    }

    fn adoptions(&self) -> Arc<dyn AdoptionRepository> {
        self.adoptions.clone()
    }

    fn accounts(&self) -> Arc<dyn AccountRepository> {
        self.accounts.clone()
    }

    fn changes(&self) -> ChangeFeed {
        self.feed.clone()
    }

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        // Transaction not supported in test mock
        Err(AppError::internal("Transactions not supported in test mock"))
    }
}
