//! Error types for the Product actor.

use crate::error::{from_store, ErrorKind};
use document_actor::FrameworkError;
use thiserror::Error;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// The requested product was not found.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// Name, price or image missing or malformed.
    #[error("Product validation error: {0}")]
    ValidationError(String),

    /// A stock adjustment would take the level below zero.
    #[error("Insufficient stock: adjusting {available} by {delta}")]
    InsufficientStock { delta: i64, available: u32 },

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl ProductError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProductError::NotFound(_) => ErrorKind::NotFound,
            ProductError::ValidationError(_) | ProductError::InsufficientStock { .. } => {
                ErrorKind::Validation
            }
            ProductError::ActorCommunicationError(_) => ErrorKind::BackendUnavailable,
        }
    }
}

impl From<FrameworkError> for ProductError {
    fn from(e: FrameworkError) -> Self {
        from_store(e, ProductError::NotFound, ProductError::ActorCommunicationError)
    }
}
