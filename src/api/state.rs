//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services, the live
//! projections and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{Database, UnitOfWork};
use crate::projection::{AdoptionBoard, AnimalMirror};
use crate::services::{
    AdopterService, AdoptionService, AnimalService, AuthService, DashboardService,
    ServiceContainer, Services, StaffService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub animal_service: Arc<dyn AnimalService>,
    pub adopter_service: Arc<dyn AdopterService>,
    pub staff_service: Arc<dyn StaffService>,
    pub adoption_service: Arc<dyn AdoptionService>,
    pub dashboard_service: Arc<dyn DashboardService>,
    /// Live mirror of the animals collection
    pub animals: Arc<AnimalMirror>,
    /// Live adoption display rows
    pub adoption_board: Arc<AdoptionBoard>,
    /// Database connection
    pub database: Arc<Database>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Wire services and start the live projections.
    pub async fn from_config(database: Arc<Database>, config: Config) -> AppResult<Self> {
        let container = Services::from_connection(database.get_connection(), config.clone());
        let persistence = container.persistence();

        let animals = AnimalMirror::start(persistence.animals(), &persistence.changes()).await?;
        let adoption_board = AdoptionBoard::start(persistence, &animals).await?;

        Ok(Self {
            auth_service: container.auth(),
            animal_service: container.animals(),
            adopter_service: container.adopters(),
            staff_service: container.staff(),
            adoption_service: container.adoptions(),
            dashboard_service: container.dashboard(),
            animals: Arc::new(animals),
            adoption_board: Arc::new(adoption_board),
            database,
            config: Arc::new(config),
        })
    }
}
