//! # ration-store
//!
//! In-memory stores for the Ration Hub: the session, the product inventory,
//! the user directory and the append-only assignment ledger.
//!
//! Every store is an explicit value constructed with its initial records, so
//! tests can build isolated instances.  The [`Stores`] aggregate owns one of
//! each and wires the only cross-store interaction: recording an assignment
//! reduces the assigned product's stock.

pub mod config;
pub mod directory;
pub mod events;
pub mod inventory;
pub mod ledger;
pub mod models;
pub mod seed;
pub mod sequence;
pub mod session;
pub mod stores;

mod error;

pub use config::{RegistrationPolicy, StockPolicy, StoreConfig};
pub use directory::DirectoryStore;
pub use error::{Result, StoreError};
pub use events::{EventBus, StoreEvent};
pub use inventory::InventoryStore;
pub use ledger::{LedgerStore, Recorded, StockEffect};
pub use models::*;
pub use session::SessionStore;
pub use stores::Stores;
