/// Application name
pub const APP_NAME: &str = "Ration Hub";

/// Artificial latency applied to login and registration, in milliseconds
pub const DEFAULT_SESSION_DELAY_MS: u64 = 1000;

/// Minimum password length accepted by the registration form
pub const MIN_PASSWORD_LEN: usize = 6;

/// Units of measure offered by the product form
pub const UNIT_OPTIONS: &[&str] = &["kg", "g", "liter", "ml", "packet"];

/// Default unit preselected on the product form
pub const DEFAULT_UNIT: &str = "kg";

/// Largest quantity a form may carry, for stock levels and assignments alike
pub const MAX_QUANTITY: i64 = 1_000_000_000;

/// Currency symbol used for MRP display (Indian rupee)
pub const CURRENCY_SYMBOL: &str = "₹";

/// Recent activity shown on the shopkeeper dashboard
pub const SHOPKEEPER_RECENT_LIMIT: usize = 5;

/// Recent purchases shown on the customer dashboard
pub const CUSTOMER_RECENT_LIMIT: usize = 3;

/// Capacity of the store change-event broadcast channel
pub const DEFAULT_EVENT_CAPACITY: usize = 64;
