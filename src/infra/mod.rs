//! Infrastructure layer - External systems integration
//!
//! - Database connection, migrations and repositories
//! - Change feed of committed writes
//! - Object storage for image attachments
//! - Unit of Work for transaction management

pub mod change_feed;
pub mod db;
pub mod repositories;
pub mod storage;
pub mod unit_of_work;

pub use change_feed::{Change, ChangeFeed, ChangeKind, Collection, FeedEvent, Subscription};
pub use db::{Database, Migrator};
pub use repositories::{
    AccountRepository, AdopterRepository, AdoptionRepository, AnimalRepository, StaffRepository,
};
pub use storage::{ImageStore, LocalObjectStorage, ObjectStorage};
pub use unit_of_work::{Persistence, TransactionContext, UnitOfWork};
