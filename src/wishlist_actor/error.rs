//! Error types for the Wishlist actor.

use crate::error::{from_store, ErrorKind};
use document_actor::FrameworkError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum WishlistError {
    #[error("Wishlist entry not found: {0}")]
    NotFound(String),

    #[error("Wishlist validation error: {0}")]
    ValidationError(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl WishlistError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WishlistError::NotFound(_) => ErrorKind::NotFound,
            WishlistError::ValidationError(_) => ErrorKind::Validation,
            WishlistError::ActorCommunicationError(_) => ErrorKind::BackendUnavailable,
        }
    }
}

impl From<FrameworkError> for WishlistError {
    fn from(e: FrameworkError) -> Self {
        from_store(e, WishlistError::NotFound, WishlistError::ActorCommunicationError)
    }
}
