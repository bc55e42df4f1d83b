use ration_shared::{Role, ValidationError};
use ration_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum AppError {
    #[error("Not signed in")]
    Unauthenticated,

    #[error("This action requires the {required} role")]
    Forbidden { required: Role },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Invalid request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Short machine-readable category for the JSON shell.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Unauthenticated => "unauthenticated",
            AppError::Forbidden { .. } => "forbidden",
            AppError::Validation(_) => "validation",
            AppError::Store(StoreError::InvalidCredentials) => "invalid-credentials",
            AppError::Store(StoreError::ProductNotFound(_) | StoreError::UserNotFound(_)) => {
                "not-found"
            }
            AppError::Store(_) => "conflict",
            AppError::BadRequest(_) => "bad-request",
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
