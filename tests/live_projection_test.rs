//! The animal mirror and the adoption board following committed writes.

mod common;

use std::sync::Arc;

use serde_json::json;
use tokio::sync::watch;
use tokio::time::timeout;

use shelter_admin::domain::{AdopterChanges, AdoptionStatus, AnimalStatus, NewAdoption};
use shelter_admin::infra::UnitOfWork;
use shelter_admin::projection::{AdoptionBoard, AnimalMirror, AnimalSnapshot, BoardRows};
use shelter_admin::services::{AdopterManager, AdopterService, AdoptionManager, AdoptionService};

use common::{date, new_animal, seed, setup, WAIT};

async fn wait_for_animals<F>(rx: &mut watch::Receiver<Arc<AnimalSnapshot>>, done: F) -> Arc<AnimalSnapshot>
where
    F: Fn(&AnimalSnapshot) -> bool,
{
    let snapshot = timeout(WAIT, rx.wait_for(|snapshot| done(snapshot)))
        .await
        .expect("mirror did not catch up")
        .expect("mirror stopped");
    snapshot.clone()
}

async fn wait_for_rows<F>(rx: &mut watch::Receiver<BoardRows>, done: F) -> BoardRows
where
    F: Fn(&BoardRows) -> bool,
{
    let rows = timeout(WAIT, rx.wait_for(|rows| done(rows)))
        .await
        .expect("board did not catch up")
        .expect("board stopped");
    rows.clone()
}

#[tokio::test]
async fn test_mirror_loads_and_follows_animal_writes() {
    let db = setup().await;
    let uow = db.persistence.clone();
    let (rex, _, _) = seed(&uow).await;

    let mirror = AnimalMirror::start(uow.animals(), &uow.changes()).await.unwrap();
    assert_eq!(mirror.current().len(), 1);
    let mut rx = mirror.subscribe();

    let luna = uow.animals().create(new_animal("Luna"), None).await.unwrap();
    let snapshot = wait_for_animals(&mut rx, |s| s.get(&luna.id).is_some()).await;
    assert_eq!(snapshot.len(), 2);

    uow.animals()
        .set_status(rex.id, AnimalStatus::InTreatment)
        .await
        .unwrap();
    wait_for_animals(&mut rx, |s| {
        s.get(&rex.id).map(|a| a.status) == Some(AnimalStatus::InTreatment)
    })
    .await;

    uow.animals().delete(luna.id).await.unwrap();
    let snapshot = wait_for_animals(&mut rx, |s| s.get(&luna.id).is_none()).await;
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.search("re").len(), 1);
}

#[tokio::test]
async fn test_board_rederives_status_from_animal() {
    let db = setup().await;
    let uow = db.persistence.clone();
    let (rex, adopter, staff) = seed(&uow).await;
    let adoptions = AdoptionManager::new(uow.clone());

    let mirror = AnimalMirror::start(uow.animals(), &uow.changes()).await.unwrap();
    let board = AdoptionBoard::start(uow.clone(), &mirror).await.unwrap();
    assert!(board.current().is_empty());
    let mut rows = board.subscribe();

    let adoption = adoptions
        .register_adoption(NewAdoption {
            adopter_id: adopter.id,
            animal_id: rex.id,
            employee_id: staff.id,
            status: AdoptionStatus::Adopted,
            adoption_date: date(2024, 6, 1),
            notes: None,
        })
        .await
        .unwrap();

    let current = wait_for_rows(&mut rows, |rows| {
        rows.iter()
            .any(|row| row.id == adoption.id && row.status == AdoptionStatus::Adopted)
    })
    .await;
    let row = &current[0];
    assert_eq!(row.animal_name, "Rex");
    assert_eq!(row.adopter_name, adopter.name);
    assert_eq!(row.employee_name, "Ana Souza");

    // animal made available by hand: the board shows the adoption as returned
    uow.animals()
        .set_status(rex.id, AnimalStatus::Available)
        .await
        .unwrap();
    let current = wait_for_rows(&mut rows, |rows| {
        rows.iter().any(|row| row.status == AdoptionStatus::Returned)
    })
    .await;
    assert_eq!(current[0].recorded_status, AdoptionStatus::Adopted);
    assert_eq!(board.search("devolvido").len(), 1);
    assert!(board.search("adotado").is_empty());
}

#[tokio::test]
async fn test_board_follows_adopter_renames_and_deletions() {
    let db = setup().await;
    let uow = db.persistence.clone();
    let (rex, adopter, staff) = seed(&uow).await;
    let adoptions = AdoptionManager::new(uow.clone());
    let adopters = AdopterManager::new(uow.clone());

    let adoption = adoptions
        .register_adoption(NewAdoption {
            adopter_id: adopter.id,
            animal_id: rex.id,
            employee_id: staff.id,
            status: AdoptionStatus::InProgress,
            adoption_date: date(2024, 6, 1),
            notes: None,
        })
        .await
        .unwrap();

    let mirror = AnimalMirror::start(uow.animals(), &uow.changes()).await.unwrap();
    let board = AdoptionBoard::start(uow.clone(), &mirror).await.unwrap();
    assert_eq!(board.current().len(), 1);
    let mut rows = board.subscribe();

    let changes: AdopterChanges =
        serde_json::from_value(json!({ "name": "Beatriz Lima" })).unwrap();
    adopters.update_adopter(adopter.id, changes).await.unwrap();
    wait_for_rows(&mut rows, |rows| {
        rows.iter().any(|row| row.adopter_name == "Beatriz Lima")
    })
    .await;
    assert_eq!(board.search("beatriz").len(), 1);

    adoptions.delete_adoption(adoption.id).await.unwrap();
    wait_for_rows(&mut rows, |rows| rows.is_empty()).await;
    let snapshot = wait_for_animals(&mut mirror.subscribe(), |s| {
        s.get(&rex.id).map(|a| a.status) == Some(AnimalStatus::Available)
    })
    .await;
    assert!(snapshot.version() > 0);
}
