//! Service Container - Centralized service access with parallel execution support.
//!
//! Handlers depend on the `ServiceContainer` trait; `Services` wires the
//! concrete managers around one shared `Persistence` unit of work.

use std::future::Future;
use std::sync::Arc;

use super::{
    AdopterManager, AdopterService, AdoptionManager, AdoptionService, AnimalManager,
    AnimalService, AuthService, Authenticator, DashboardReporter, DashboardService, StaffManager,
    StaffService,
};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{ImageStore, Persistence};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn animals(&self) -> Arc<dyn AnimalService>;

    fn adopters(&self) -> Arc<dyn AdopterService>;

    fn staff(&self) -> Arc<dyn StaffService>;

    fn adoptions(&self) -> Arc<dyn AdoptionService>;

    fn dashboard(&self) -> Arc<dyn DashboardService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    persistence: Arc<Persistence>,
    auth_service: Arc<dyn AuthService>,
    animal_service: Arc<dyn AnimalService>,
    adopter_service: Arc<dyn AdopterService>,
    staff_service: Arc<dyn StaffService>,
    adoption_service: Arc<dyn AdoptionService>,
    dashboard_service: Arc<dyn DashboardService>,
}

impl Services {
    /// Wire every service around a shared unit of work
    pub fn new(persistence: Arc<Persistence>, images: ImageStore, config: Config) -> Self {
        Self {
            auth_service: Arc::new(Authenticator::new(persistence.clone(), config)),
            animal_service: Arc::new(AnimalManager::new(persistence.clone(), images.clone())),
            adopter_service: Arc::new(AdopterManager::new(persistence.clone())),
            staff_service: Arc::new(StaffManager::new(persistence.clone(), images)),
            adoption_service: Arc::new(AdoptionManager::new(persistence.clone())),
            dashboard_service: Arc::new(DashboardReporter::new(persistence.clone())),
            persistence,
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        let persistence = Arc::new(Persistence::new(db));
        let images = ImageStore::from_config(&config);
        Self::new(persistence, images, config)
    }

    /// Unit of work shared by the services; projections read through it
    pub fn persistence(&self) -> Arc<Persistence> {
        self.persistence.clone()
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn animals(&self) -> Arc<dyn AnimalService> {
        self.animal_service.clone()
    }

    fn adopters(&self) -> Arc<dyn AdopterService> {
        self.adopter_service.clone()
    }

    fn staff(&self) -> Arc<dyn StaffService> {
        self.staff_service.clone()
    }

    fn adoptions(&self) -> Arc<dyn AdoptionService> {
        self.adoption_service.clone()
    }

    fn dashboard(&self) -> Arc<dyn DashboardService> {
        self.dashboard_service.clone()
    }
}

/// Parallel execution utilities for running independent operations concurrently.
pub mod parallel {
    use super::*;
    use tokio::try_join;

    /// Execute four independent async operations in parallel.
    ///
    /// If any operation fails, the error is returned immediately.
    pub async fn join4<F1, F2, F3, F4, T1, T2, T3, T4>(
        f1: F1,
        f2: F2,
        f3: F3,
        f4: F4,
    ) -> AppResult<(T1, T2, T3, T4)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
        F3: Future<Output = AppResult<T3>>,
        F4: Future<Output = AppResult<T4>>,
    {
        try_join!(f1, f2, f3, f4)
    }
}
