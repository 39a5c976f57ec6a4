//! Error types for the User actor.

use crate::error::{from_store, ErrorKind};
use document_actor::FrameworkError;
use thiserror::Error;

/// Errors that can occur during profile operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    /// The requested profile was not found.
    #[error("User not found: {0}")]
    NotFound(String),

    /// The profile data provided is invalid.
    #[error("User validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl UserError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            UserError::NotFound(_) => ErrorKind::NotFound,
            UserError::ValidationError(_) => ErrorKind::Validation,
            UserError::ActorCommunicationError(_) => ErrorKind::BackendUnavailable,
        }
    }
}

impl From<FrameworkError> for UserError {
    fn from(e: FrameworkError) -> Self {
        from_store(e, UserError::NotFound, UserError::ActorCommunicationError)
    }
}
