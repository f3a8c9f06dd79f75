//! The module contains the errors the engine can return.
//!
//! The errors are:
//!
//! - [`InvalidEntry`] returned when an entry fails validation. The message is
//!   meant to be shown to the user as is.
//! - [`MissingId`] returned when an entry that was never persisted is used
//!   where a stored one is required. This is a usage error, not bad input.
//! - [`ExistingKey`] and [`Authentication`] returned by the user operations.
//! - [`KeyNotFound`] returned by stores when a row to change does not exist.
//!
//!  [`InvalidEntry`]: EngineError::InvalidEntry
//!  [`MissingId`]: EngineError::MissingId
//!  [`ExistingKey`]: EngineError::ExistingKey
//!  [`Authentication`]: EngineError::Authentication
//!  [`KeyNotFound`]: EngineError::KeyNotFound
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{0}")]
    InvalidEntry(String),
    #[error("{0} has no id: it was never persisted")]
    MissingId(String),
    #[error("{0}")]
    ExistingKey(String),
    #[error("{0}")]
    Authentication(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Invalid value: {0}")]
    InvalidValue(String),
    #[error("Password hashing failed: {0}")]
    Hashing(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl EngineError {
    /// Returns `true` for errors caused by the caller's data, which can be
    /// fixed and retried.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidEntry(_))
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidEntry(a), Self::InvalidEntry(b)) => a == b,
            (Self::MissingId(a), Self::MissingId(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::Authentication(a), Self::Authentication(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::InvalidValue(a), Self::InvalidValue(b)) => a == b,
            (Self::Hashing(a), Self::Hashing(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
