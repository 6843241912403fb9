//! Local mirror of the `animals` collection.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::domain::Animal;
use crate::errors::AppResult;
use crate::infra::{AnimalRepository, ChangeFeed, ChangeKind, Collection, FeedEvent, Subscription};

/// Immutable view of every animal at one point in time
#[derive(Debug, Clone, Default)]
pub struct AnimalSnapshot {
    animals: HashMap<Uuid, Animal>,
    /// Bumped on every applied change
    version: u64,
}

impl AnimalSnapshot {
    fn from_list(animals: Vec<Animal>) -> Self {
        Self {
            animals: animals.into_iter().map(|a| (a.id, a)).collect(),
            version: 0,
        }
    }

    pub fn get(&self, id: &Uuid) -> Option<&Animal> {
        self.animals.get(id)
    }

    pub fn len(&self) -> usize {
        self.animals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animals.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Animals ordered by name, filtered by an optional name/breed search.
    pub fn search(&self, query: &str) -> Vec<Animal> {
        let mut found: Vec<Animal> = self
            .animals
            .values()
            .filter(|animal| animal.matches_search(query))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        found
    }

    fn upsert(&mut self, animal: Animal) {
        self.animals.insert(animal.id, animal);
        self.version += 1;
    }

    fn evict(&mut self, id: &Uuid) {
        self.animals.remove(id);
        self.version += 1;
    }

    fn replace(&mut self, animals: Vec<Animal>) {
        let version = self.version + 1;
        *self = Self::from_list(animals);
        self.version = version;
    }
}

/// Owns the background task that keeps the snapshot current.
///
/// Dropping the mirror stops the task; receivers then see the last
/// snapshot and `changed()` returns an error.
pub struct AnimalMirror {
    snapshot: watch::Receiver<Arc<AnimalSnapshot>>,
    task: JoinHandle<()>,
}

impl AnimalMirror {
    /// Load the collection and start following the change feed.
    pub async fn start(repo: Arc<dyn AnimalRepository>, feed: &ChangeFeed) -> AppResult<Self> {
        // subscribe first so nothing committed during the load is missed
        let subscription = feed.subscribe(&[Collection::Animals]);
        let initial = AnimalSnapshot::from_list(repo.list().await?);
        tracing::info!(animals = initial.len(), "animal mirror loaded");

        let (sender, snapshot) = watch::channel(Arc::new(initial));
        let task = tokio::spawn(follow(repo, subscription, sender));

        Ok(Self { snapshot, task })
    }

    /// A handle that observes every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Arc<AnimalSnapshot>> {
        self.snapshot.clone()
    }

    pub fn current(&self) -> Arc<AnimalSnapshot> {
        self.snapshot.borrow().clone()
    }
}

impl Drop for AnimalMirror {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn follow(
    repo: Arc<dyn AnimalRepository>,
    mut subscription: Subscription,
    sender: watch::Sender<Arc<AnimalSnapshot>>,
) {
    while let Some(event) = subscription.next().await {
        match event {
            FeedEvent::Changed(change) if change.kind == ChangeKind::Removed => {
                sender.send_modify(|snapshot| Arc::make_mut(snapshot).evict(&change.id));
            }
            FeedEvent::Changed(change) => match repo.find_by_id(change.id).await {
                Ok(Some(animal)) => {
                    sender.send_modify(|snapshot| Arc::make_mut(snapshot).upsert(animal));
                }
                // deleted again before we got to read it
                Ok(None) => {
                    sender.send_modify(|snapshot| Arc::make_mut(snapshot).evict(&change.id));
                }
                Err(e) => {
                    tracing::warn!(animal_id = %change.id, error = %e, "animal mirror refresh failed");
                }
            },
            FeedEvent::Lagged(skipped) => {
                tracing::warn!(skipped, "animal mirror lagged; reloading");
                match repo.list().await {
                    Ok(animals) => {
                        sender.send_modify(|snapshot| Arc::make_mut(snapshot).replace(animals));
                    }
                    Err(e) => tracing::warn!(error = %e, "animal mirror reload failed"),
                }
            }
        }
    }
    tracing::debug!("change feed closed; animal mirror stopped");
}
