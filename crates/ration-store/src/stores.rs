//! The four stores of one running hub.
//!
//! [`Stores`] owns the session, inventory, directory and ledger, and splits
//! borrows between them for the operations that span two stores.

use ration_shared::Role;

use crate::config::StoreConfig;
use crate::directory::DirectoryStore;
use crate::error::Result;
use crate::events::EventBus;
use crate::inventory::InventoryStore;
use crate::ledger::{LedgerStore, Recorded};
use crate::models::{Credentials, NewAssignment, Product, ProductAssignment, RegisterData, User};
use crate::seed;
use crate::session::SessionStore;

#[derive(Debug)]
pub struct Stores {
    pub session: SessionStore,
    pub inventory: InventoryStore,
    pub directory: DirectoryStore,
    pub ledger: LedgerStore,
}

impl Stores {
    /// Stores with no records at all.
    pub fn empty(config: &StoreConfig, events: EventBus) -> Self {
        Self::with_records(config, events, Vec::new(), Vec::new(), Vec::new())
    }

    /// Stores loaded with the [`seed`] records.
    pub fn bootstrap(config: &StoreConfig, events: EventBus) -> Self {
        let stores = Self::with_records(
            config,
            events,
            seed::products(),
            seed::users(),
            seed::assignments(),
        );
        tracing::info!(
            products = stores.inventory.list().len(),
            users = stores.directory.list().len(),
            assignments = stores.ledger.list().len(),
            "stores bootstrapped"
        );
        stores
    }

    pub fn with_records(
        config: &StoreConfig,
        events: EventBus,
        products: Vec<Product>,
        users: Vec<User>,
        assignments: Vec<ProductAssignment>,
    ) -> Self {
        Self {
            session: SessionStore::new(
                config.session_delay,
                config.registration_policy,
                events.clone(),
            ),
            inventory: InventoryStore::new(products, events.clone()),
            directory: DirectoryStore::new(users, events.clone()),
            ledger: LedgerStore::new(assignments, config.stock_policy, events),
        }
    }

    pub async fn login(&mut self, credentials: &Credentials) -> Result<User> {
        self.session.login(&self.directory, credentials).await
    }

    pub async fn register(&mut self, data: RegisterData) -> Result<User> {
        self.session.register(&mut self.directory, data).await
    }

    pub fn logout(&mut self) {
        self.session.logout();
    }

    /// The signed-in user, if their session role matches `role`.
    pub fn current_with_role(&self, role: Role) -> Option<&User> {
        self.session.current().filter(|u| u.role() == role)
    }

    /// Append a ledger entry and apply its stock side effect.
    pub fn record_assignment(&mut self, new: NewAssignment) -> Result<Recorded> {
        self.ledger.create(&mut self.inventory, new)
    }
}
