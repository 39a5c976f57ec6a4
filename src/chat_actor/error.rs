//! Error types for the Chat actor.

use crate::error::{from_store, ErrorKind};
use document_actor::FrameworkError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ChatError {
    #[error("Message not found: {0}")]
    NotFound(String),

    #[error("Message validation error: {0}")]
    ValidationError(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl ChatError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ChatError::NotFound(_) => ErrorKind::NotFound,
            ChatError::ValidationError(_) => ErrorKind::Validation,
            ChatError::ActorCommunicationError(_) => ErrorKind::BackendUnavailable,
        }
    }
}

impl From<FrameworkError> for ChatError {
    fn from(e: FrameworkError) -> Self {
        from_store(e, ChatError::NotFound, ChatError::ActorCommunicationError)
    }
}
