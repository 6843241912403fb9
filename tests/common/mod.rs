//! Shared setup for integration tests: a migrated SQLite file in a temp dir.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use serde_json::json;
use tempfile::TempDir;

use shelter_admin::config::Config;
use shelter_admin::domain::{Adopter, Animal, NewAdopter, NewAnimal, NewStaff, Staff};
use shelter_admin::infra::{Database, Persistence, UnitOfWork};

pub const WAIT: Duration = Duration::from_secs(5);

pub struct TestDb {
    // keeps the database file alive for the test's duration
    _dir: TempDir,
    pub config: Config,
    pub database: Arc<Database>,
    pub persistence: Arc<Persistence>,
}

pub async fn setup() -> TestDb {
    let dir = TempDir::new().expect("temp dir");
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("shelter.db").display());

    let mut config = Config::local(url);
    config.storage_dir = dir.path().join("uploads").display().to_string();
    config.storage_public_url = "http://localhost:3000/files".to_string();

    let database = Database::connect(&config).await.expect("database");
    let persistence = Arc::new(Persistence::new(database.get_connection()));

    TestDb {
        _dir: dir,
        config,
        database: Arc::new(database),
        persistence,
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn new_animal(name: &str) -> NewAnimal {
    serde_json::from_value(json!({
        "name": name,
        "species": "cachorro",
        "breed": "Vira-lata",
        "color": "caramelo",
        "size": "medio",
        "sex": "M",
        "birth_date": "2021-05-10",
        "rescue_date": "2023-01-15"
    }))
    .expect("animal fixture")
}

pub fn new_adopter(cpf: &str, email: &str) -> NewAdopter {
    serde_json::from_value(json!({
        "name": "Maria Silva",
        "email": email,
        "phone": "11987654321",
        "sex": "F",
        "rg": "123456789",
        "cpf": cpf,
        "marital_status": "Solteira",
        "state": "SP",
        "city": "São Paulo",
        "district": "Centro",
        "street": "Rua A",
        "number": "10",
        "cep": "01310100"
    }))
    .expect("adopter fixture")
}

pub fn new_staff(name: &str) -> NewStaff {
    serde_json::from_value(json!({
        "name": name,
        "role": "Responsável por Adoções",
        "email": "equipe@abrigo.org",
        "phone": "(11) 3333-4444",
        "sex": "F"
    }))
    .expect("staff fixture")
}

/// One animal, adopter and staff member ready for an adoption.
pub async fn seed(uow: &Persistence) -> (Animal, Adopter, Staff) {
    let animal = uow
        .animals()
        .create(new_animal("Rex"), None)
        .await
        .expect("animal");
    let adopter = uow
        .adopters()
        .create(new_adopter("12345678901", "maria@example.com").normalized())
        .await
        .expect("adopter");
    let staff = uow
        .staff()
        .create(new_staff("Ana Souza"), None)
        .await
        .expect("staff");
    (animal, adopter, staff)
}
