//! Push-style change feed for the record store.
//!
//! Every committed write publishes a `Change` naming the collection and
//! document touched. Subscribers receive events in commit order; a
//! subscriber that falls more than `CHANGE_FEED_CAPACITY` events behind is
//! told it lagged and must resynchronise from the store.

use serde::Serialize;
use tokio::sync::broadcast::{self, error::RecvError};
use uuid::Uuid;

use crate::config::{
    CHANGE_FEED_CAPACITY, COLLECTION_ADOPTERS, COLLECTION_ADOPTIONS, COLLECTION_ANIMALS,
    COLLECTION_STAFF,
};

/// Collections that publish changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Animals,
    Adoptions,
    Adopters,
    Staff,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Animals => COLLECTION_ANIMALS,
            Collection::Adoptions => COLLECTION_ADOPTIONS,
            Collection::Adopters => COLLECTION_ADOPTERS,
            Collection::Staff => COLLECTION_STAFF,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Added,
    Modified,
    Removed,
}

/// A committed write to one document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Change {
    pub collection: Collection,
    pub id: Uuid,
    pub kind: ChangeKind,
}

impl Change {
    pub fn added(collection: Collection, id: Uuid) -> Self {
        Self { collection, id, kind: ChangeKind::Added }
    }

    pub fn modified(collection: Collection, id: Uuid) -> Self {
        Self { collection, id, kind: ChangeKind::Modified }
    }

    pub fn removed(collection: Collection, id: Uuid) -> Self {
        Self { collection, id, kind: ChangeKind::Removed }
    }
}

/// What a subscription yields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    Changed(Change),
    /// Events were dropped; the subscriber must reload
    Lagged(u64),
}

/// Broadcast hub shared by every store handle
#[derive(Clone)]
pub struct ChangeFeed {
    sender: broadcast::Sender<Change>,
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new(CHANGE_FEED_CAPACITY)
    }
}

impl ChangeFeed {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a committed change. Having no subscribers is not an error.
    pub fn publish(&self, change: Change) {
        tracing::trace!(
            collection = change.collection.as_str(),
            id = %change.id,
            kind = ?change.kind,
            "change published"
        );
        let _ = self.sender.send(change);
    }

    /// Subscribe to changes on the given collections only.
    pub fn subscribe(&self, collections: &[Collection]) -> Subscription {
        Subscription {
            receiver: self.sender.subscribe(),
            collections: collections.to_vec(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Filtered receiving end of the feed
pub struct Subscription {
    receiver: broadcast::Receiver<Change>,
    collections: Vec<Collection>,
}

impl Subscription {
    /// Next relevant event, or `None` once the feed is gone.
    pub async fn next(&mut self) -> Option<FeedEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(change) if self.collections.contains(&change.collection) => {
                    return Some(FeedEvent::Changed(change))
                }
                Ok(_) => continue,
                Err(RecvError::Lagged(skipped)) => return Some(FeedEvent::Lagged(skipped)),
                Err(RecvError::Closed) => return None,
            }
        }
    }
}
