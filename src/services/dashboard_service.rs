//! Dashboard service - Aggregate counts across all collections.

use std::sync::Arc;

use async_trait::async_trait;

use super::container::parallel;
use crate::domain::DashboardStats;
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

#[async_trait]
pub trait DashboardService: Send + Sync {
    async fn stats(&self) -> AppResult<DashboardStats>;
}

pub struct DashboardReporter<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> DashboardReporter<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> DashboardService for DashboardReporter<U> {
    async fn stats(&self) -> AppResult<DashboardStats> {
        let (animals, adoptions, staff, adopters) = parallel::join4(
            self.uow.animals().list(),
            self.uow.adoptions().list(),
            self.uow.staff().count(),
            self.uow.adopters().count(),
        )
        .await?;

        Ok(DashboardStats::collect(&animals, &adoptions, staff, adopters))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Animal, AnimalStatus};
    use crate::errors::AppError;
    use crate::infra::repositories::{
        MockAdopterRepository, MockAdoptionRepository, MockAnimalRepository, MockStaffRepository,
    };
    use crate::services::test_support::TestUnitOfWork;
    use chrono::Utc;
    use uuid::Uuid;

    fn animal(status: AnimalStatus) -> Animal {
        let now = Utc::now();
        Animal {
            id: Uuid::new_v4(),
            name: "Rex".to_string(),
            species: "cachorro".to_string(),
            breed: "SRD".to_string(),
            color: "caramelo".to_string(),
            size: "medio".to_string(),
            sex: "M".to_string(),
            birth_date: None,
            rescue_date: None,
            status,
            image: None,
            needs_vaccine: false,
            needs_checkup: false,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn uow(animals: MockAnimalRepository, adopters: MockAdopterRepository) -> TestUnitOfWork {
        let mut adoptions = MockAdoptionRepository::new();
        adoptions.expect_list().returning(|| Ok(vec![]));
        let mut staff = MockStaffRepository::new();
        staff.expect_count().returning(|| Ok(3));

        TestUnitOfWork {
            animals: Arc::new(animals),
            adopters: Arc::new(adopters),
            adoptions: Arc::new(adoptions),
            staff: Arc::new(staff),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_stats_counts_every_collection() {
        let mut animals = MockAnimalRepository::new();
        animals.expect_list().returning(|| {
            Ok(vec![
                animal(AnimalStatus::Available),
                animal(AnimalStatus::Available),
                animal(AnimalStatus::InTreatment),
            ])
        });
        let mut adopters = MockAdopterRepository::new();
        adopters.expect_count().returning(|| Ok(7));

        let reporter = DashboardReporter::new(Arc::new(uow(animals, adopters)));
        let stats = reporter.stats().await.unwrap();

        assert_eq!(stats.animals, 3);
        assert_eq!(stats.staff, 3);
        assert_eq!(stats.adopters, 7);
        assert_eq!(stats.adoptions, 0);
        assert_eq!(stats.animals_by_status["Disponível"], 2);
        assert_eq!(stats.animals_by_status["Adotado"], 0);
        assert_eq!(stats.animals_by_species["cachorro"], 3);
    }

    #[tokio::test]
    async fn test_stats_propagates_store_failure() {
        let mut animals = MockAnimalRepository::new();
        animals.expect_list().returning(|| Ok(vec![]));
        let mut adopters = MockAdopterRepository::new();
        adopters
            .expect_count()
            .returning(|| Err(AppError::StoreUnavailable(sea_orm::DbErr::Custom("down".into()))));

        let reporter = DashboardReporter::new(Arc::new(uow(animals, adopters)));
        let result = reporter.stats().await;

        assert!(matches!(result, Err(AppError::StoreUnavailable(_))));
    }
}
