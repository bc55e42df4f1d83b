//! Application configuration loaded from environment variables.
//!
//! All settings have defaults that reproduce the demo behaviour, so the hub
//! starts with zero configuration.

use std::time::Duration;

use ration_shared::constants::DEFAULT_EVENT_CAPACITY;
use ration_store::{RegistrationPolicy, StockPolicy, StoreConfig};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Store behaviour.
    /// Env: `SESSION_DELAY_MS` (default `1000`),
    /// `STOCK_POLICY` (`allow-negative` | `reject-overdraw`),
    /// `REJECT_DUPLICATE_EMAIL` (true/false, default `false`)
    pub store: StoreConfig,

    /// Load the demo products, users and ledger entry at startup.
    /// Env: `SEED_BOOTSTRAP` (true/false)
    /// Default: `true`
    pub seed_bootstrap: bool,

    /// Capacity of the store event channel.
    /// Env: `EVENT_CAPACITY`
    /// Default: `64`
    pub event_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            seed_bootstrap: true,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(val) = lookup("SESSION_DELAY_MS") {
            match val.parse::<u64>() {
                Ok(ms) => config.store.session_delay = Duration::from_millis(ms),
                Err(_) => {
                    tracing::warn!(value = %val, "Invalid SESSION_DELAY_MS, using default");
                }
            }
        }

        if let Some(val) = lookup("STOCK_POLICY") {
            match val.parse::<StockPolicy>() {
                Ok(policy) => config.store.stock_policy = policy,
                Err(e) => tracing::warn!(error = %e, "Invalid STOCK_POLICY, using default"),
            }
        }

        if let Some(val) = lookup("REJECT_DUPLICATE_EMAIL") {
            if parse_flag(&val) {
                config.store.registration_policy = RegistrationPolicy::RejectDuplicateEmail;
            }
        }

        if let Some(val) = lookup("SEED_BOOTSTRAP") {
            config.seed_bootstrap = parse_flag(&val);
        }

        if let Some(val) = lookup("EVENT_CAPACITY") {
            match val.parse::<usize>() {
                Ok(n) if n > 0 => config.event_capacity = n,
                _ => tracing::warn!(value = %val, "Invalid EVENT_CAPACITY, using default"),
            }
        }

        // RUST_LOG is handled directly by tracing-subscriber's EnvFilter.

        config
    }
}

fn parse_flag(val: &str) -> bool {
    val != "false" && val != "0"
}
