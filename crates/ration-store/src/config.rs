//! Behavioural switches for the stores.
//!
//! The defaults reproduce the demo semantics: stock may go negative and the
//! same email can register any number of times.  The stricter policies are
//! opt-in.

use std::str::FromStr;
use std::time::Duration;

use ration_shared::constants::DEFAULT_SESSION_DELAY_MS;
use serde::{Deserialize, Serialize};

/// What the ledger does when an assignment exceeds on-hand stock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockPolicy {
    /// Record the entry and let the quantity go below zero.
    #[default]
    AllowNegative,
    /// Refuse the entry before anything is mutated.
    RejectOverdraw,
}

impl FromStr for StockPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "allow-negative" => Ok(Self::AllowNegative),
            "reject-overdraw" => Ok(Self::RejectOverdraw),
            other => Err(format!("unknown stock policy: {other}")),
        }
    }
}

/// Whether registration checks for an existing customer with the same email.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegistrationPolicy {
    #[default]
    AllowDuplicates,
    RejectDuplicateEmail,
}

/// Store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Simulated latency for login and registration.
    pub session_delay: Duration,
    pub stock_policy: StockPolicy,
    pub registration_policy: RegistrationPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            session_delay: Duration::from_millis(DEFAULT_SESSION_DELAY_MS),
            stock_policy: StockPolicy::default(),
            registration_policy: RegistrationPolicy::default(),
        }
    }
}

impl StoreConfig {
    /// Default behaviour without the simulated latency.
    pub fn instant() -> Self {
        Self {
            session_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.session_delay, Duration::from_millis(1000));
        assert_eq!(config.stock_policy, StockPolicy::AllowNegative);
        assert_eq!(config.registration_policy, RegistrationPolicy::AllowDuplicates);
    }

    #[test]
    fn test_parse_stock_policy() {
        assert_eq!(
            "reject-overdraw".parse::<StockPolicy>(),
            Ok(StockPolicy::RejectOverdraw)
        );
        assert!("strict".parse::<StockPolicy>().is_err());
    }
}
