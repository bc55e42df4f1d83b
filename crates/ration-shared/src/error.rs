use thiserror::Error;

/// Form-level validation failures raised before any store is touched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Unsupported unit: {0}")]
    UnsupportedUnit(String),

    #[error("Price must be a non-negative number")]
    InvalidPrice,

    #[error("Quantity must be at least {min}")]
    QuantityTooSmall { min: i64 },

    #[error("Quantity must be at most {max}")]
    QuantityTooLarge { max: i64 },

    #[error("Quantity {requested} exceeds available stock {available}")]
    QuantityExceedsStock { requested: i64, available: i64 },
}
