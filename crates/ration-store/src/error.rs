use ration_shared::{ProductId, UserId};
use thiserror::Error;

/// Errors produced by the store layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No product with this identifier is in the inventory.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// No user with this identifier is in the directory.
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    /// Login failed.  Deliberately does not say which part was wrong.
    #[error("Invalid email, password or role")]
    InvalidCredentials,

    /// Registration refused under `RegistrationPolicy::RejectDuplicateEmail`.
    #[error("A customer with email {0} already exists")]
    DuplicateEmail(String),

    /// Assignment refused under `StockPolicy::RejectOverdraw`.
    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    /// The decremented stock would not fit in an `i64`.
    #[error("Stock of product {product_id} cannot absorb {requested} more (on hand {available})")]
    StockOverflow {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
