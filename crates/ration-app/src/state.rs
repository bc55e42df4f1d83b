//! Application state shared by every command handler.
//!
//! [`AppState`] wraps the [`Stores`] in an async mutex.  A command locks once
//! and runs to completion, so the ledger's create-then-decrement is never
//! observed half done.

use std::sync::Arc;

use ration_store::{EventBus, StoreEvent, Stores};
use tokio::sync::{broadcast, Mutex, MutexGuard};

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    stores: Arc<Mutex<Stores>>,
    events: EventBus,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let events = EventBus::new(config.event_capacity);
        let stores = if config.seed_bootstrap {
            Stores::bootstrap(&config.store, events.clone())
        } else {
            Stores::empty(&config.store, events.clone())
        };

        Self {
            stores: Arc::new(Mutex::new(stores)),
            events,
        }
    }

    pub async fn stores(&self) -> MutexGuard<'_, Stores> {
        self.stores.lock().await
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use ration_store::StoreConfig;

    #[tokio::test]
    async fn test_seed_flag_controls_bootstrap() {
        let empty = AppState::new(AppConfig {
            store: StoreConfig::instant(),
            seed_bootstrap: false,
            ..AppConfig::default()
        });
        assert!(empty.stores().await.directory.list().is_empty());

        let seeded = test_support::seeded();
        assert_eq!(seeded.stores().await.inventory.list().len(), 4);
    }
}
