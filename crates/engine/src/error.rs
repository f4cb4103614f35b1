//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`NotFound`] thrown when a referenced trip, trip point, route,
//!   accommodation, expense or place does not exist.
//! - [`InvalidArgument`] thrown when a domain rule is violated (check-out
//!   before check-in, non-positive expense amount, route endpoints in
//!   different trips or identical).
//! - [`InvalidState`] thrown when the store returns something the engine did
//!   not expect, e.g. a row that vanished right after being written.
//!
//!  [`NotFound`]: EngineError::NotFound
//!  [`InvalidArgument`]: EngineError::InvalidArgument
//!  [`InvalidState`]: EngineError::InvalidState
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Invalid state: {0}")]
    InvalidState(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl EngineError {
    pub(crate) fn not_found(kind: &str, id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("{kind} {id}"))
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::InvalidArgument(a), Self::InvalidArgument(b)) => a == b,
            (Self::InvalidState(a), Self::InvalidState(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
