//! # ration-shared
//!
//! Types shared by every Ration Hub crate: identifier newtypes, the [`Role`]
//! enumeration, form validation rules and display formatting helpers.

pub mod constants;
pub mod error;
pub mod format;
pub mod types;
pub mod validation;

pub use error::ValidationError;
pub use types::{AssignmentId, ProductId, Role, UserId};
