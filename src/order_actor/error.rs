//! Error types for the Order actor.

use crate::error::{from_store, ErrorKind};
use crate::model::OrderStatus;
use document_actor::FrameworkError;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order (or the customer placing it) was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The order data provided is invalid.
    #[error("Order validation error: {0}")]
    ValidationError(String),

    /// The status change is not in the lifecycle table.
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl OrderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderError::NotFound(_) => ErrorKind::NotFound,
            OrderError::ValidationError(_) => ErrorKind::Validation,
            OrderError::InvalidTransition { .. } => ErrorKind::InvalidTransition,
            OrderError::ActorCommunicationError(_) => ErrorKind::BackendUnavailable,
        }
    }
}

impl From<FrameworkError> for OrderError {
    fn from(e: FrameworkError) -> Self {
        from_store(e, OrderError::NotFound, OrderError::ActorCommunicationError)
    }
}
