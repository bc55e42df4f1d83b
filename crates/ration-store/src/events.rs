//! Change notifications published by the stores after every mutation.

use ration_shared::{AssignmentId, ProductId, UserId};
use serde::Serialize;
use tokio::sync::broadcast;

/// One mutation of one store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum StoreEvent {
    ProductCreated { id: ProductId },
    ProductUpdated { id: ProductId },
    ProductDeleted { id: ProductId },
    UserCreated { id: UserId },
    UserUpdated { id: UserId },
    UserDeleted { id: UserId },
    AssignmentCreated { id: AssignmentId },
    /// `None` after logout.
    SessionChanged { user: Option<UserId> },
}

/// Cloneable publisher shared by all stores of one [`Stores`](crate::Stores).
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<StoreEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.tx.subscribe()
    }

    /// Publish an event.  Having no subscribers is not an error.
    pub fn emit(&self, event: StoreEvent) {
        if self.tx.send(event).is_err() {
            tracing::trace!("store event dropped, no subscribers");
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(ration_shared::constants::DEFAULT_EVENT_CAPACITY)
    }
}
