//! Adoption display rows kept in step with the animal mirror.
//!
//! Rows are rebuilt from the store when adoptions, adopters or staff
//! change, and re-derived in place whenever the animal snapshot moves.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::animal_mirror::{AnimalMirror, AnimalSnapshot};
use crate::domain::AdoptionRow;
use crate::errors::AppResult;
use crate::infra::{Collection, FeedEvent, Subscription, UnitOfWork};

pub type BoardRows = Arc<Vec<AdoptionRow>>;

pub struct AdoptionBoard {
    rows: watch::Receiver<BoardRows>,
    task: JoinHandle<()>,
}

impl AdoptionBoard {
    /// Build the rows and start following the mirror and the change feed.
    pub async fn start<U>(uow: Arc<U>, mirror: &AnimalMirror) -> AppResult<Self>
    where
        U: UnitOfWork + 'static,
    {
        let subscription = uow.changes().subscribe(&[
            Collection::Adoptions,
            Collection::Adopters,
            Collection::Staff,
        ]);
        let mut animals = mirror.subscribe();
        let snapshot = animals.borrow_and_update().clone();
        let initial = load_rows(uow.as_ref(), &snapshot).await?;
        tracing::info!(rows = initial.len(), "adoption board loaded");

        let (sender, rows) = watch::channel(Arc::new(initial));
        let task = tokio::spawn(follow(uow, animals, subscription, sender));

        Ok(Self { rows, task })
    }

    pub fn subscribe(&self) -> watch::Receiver<BoardRows> {
        self.rows.clone()
    }

    pub fn current(&self) -> BoardRows {
        self.rows.borrow().clone()
    }

    /// Rows matching adopter, animal, employee or displayed status.
    pub fn search(&self, query: &str) -> Vec<AdoptionRow> {
        self.rows
            .borrow()
            .iter()
            .filter(|row| row.matches_search(query))
            .cloned()
            .collect()
    }
}

impl Drop for AdoptionBoard {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn load_rows<U: UnitOfWork>(uow: &U, animals: &AnimalSnapshot) -> AppResult<Vec<AdoptionRow>> {
    let adoption_repo = uow.adoptions();
    let adopter_repo = uow.adopters();
    let staff_repo = uow.staff();
    let (adoptions, adopters, staff) =
        tokio::try_join!(adoption_repo.list(), adopter_repo.list(), staff_repo.list())?;

    let adopters: HashMap<Uuid, String> = adopters.into_iter().map(|a| (a.id, a.name)).collect();
    let staff: HashMap<Uuid, String> = staff.into_iter().map(|s| (s.id, s.name)).collect();

    Ok(adoptions
        .iter()
        .map(|adoption| {
            AdoptionRow::resolve(
                adoption,
                animals.get(&adoption.animal_id),
                adopters.get(&adoption.adopter_id).map(String::as_str),
                staff.get(&adoption.employee_id).map(String::as_str),
            )
        })
        .collect())
}

async fn follow<U: UnitOfWork>(
    uow: Arc<U>,
    mut animals: watch::Receiver<Arc<AnimalSnapshot>>,
    mut subscription: Subscription,
    sender: watch::Sender<BoardRows>,
) {
    loop {
        tokio::select! {
            changed = animals.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = animals.borrow_and_update().clone();
                sender.send_modify(|rows| {
                    for row in Arc::make_mut(rows).iter_mut() {
                        row.rederive(snapshot.get(&row.animal_id));
                    }
                });
            }
            event = subscription.next() => {
                let Some(event) = event else { break };
                if let FeedEvent::Lagged(skipped) = event {
                    tracing::warn!(skipped, "adoption board lagged; reloading");
                }
                let snapshot = animals.borrow().clone();
                match load_rows(uow.as_ref(), &snapshot).await {
                    Ok(rows) => {
                        sender.send_replace(Arc::new(rows));
                    }
                    Err(e) => tracing::warn!(error = %e, "adoption board reload failed"),
                }
            }
        }
    }
    tracing::debug!("adoption board stopped");
}
