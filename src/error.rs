//! Storefront-level errors.
//!
//! Each collection has its own error enum next to its actor (`OrderError`, `ProductError`,
//! ...). [`StorefrontError`] wraps all of them so that a UI layer matches on one type, and
//! [`ErrorKind`] collapses them into the handful of outcomes a user can be shown.

use crate::auth::AuthError;
use crate::blob::BlobError;
use crate::chat_actor::ChatError;
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use crate::user_actor::UserError;
use crate::wishlist_actor::WishlistError;
use document_actor::FrameworkError;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad input. Nothing was written.
    Validation,
    /// The operation needs a signed-in user.
    Unauthenticated,
    /// Signed in, but the role claim does not allow it.
    Unauthorized,
    NotFound,
    /// A backing store could not be reached. Nothing is retried.
    BackendUnavailable,
    /// An order status change outside the lifecycle table.
    InvalidTransition,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StorefrontError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Sign in required")]
    Unauthenticated,

    #[error("Not allowed: {0}")]
    Unauthorized(String),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Product(#[from] ProductError),

    #[error(transparent)]
    User(#[from] UserError),

    #[error(transparent)]
    Wishlist(#[from] WishlistError),

    #[error(transparent)]
    Chat(#[from] ChatError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Blob(#[from] BlobError),

    #[error("Shutdown failed: {0}")]
    Shutdown(String),
}

impl StorefrontError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StorefrontError::Validation(_) => ErrorKind::Validation,
            StorefrontError::Unauthenticated => ErrorKind::Unauthenticated,
            StorefrontError::Unauthorized(_) => ErrorKind::Unauthorized,
            StorefrontError::Order(e) => e.kind(),
            StorefrontError::Product(e) => e.kind(),
            StorefrontError::User(e) => e.kind(),
            StorefrontError::Wishlist(e) => e.kind(),
            StorefrontError::Chat(e) => e.kind(),
            StorefrontError::Auth(e) => e.kind(),
            StorefrontError::Blob(e) => e.kind(),
            StorefrontError::Shutdown(_) => ErrorKind::BackendUnavailable,
        }
    }
}

/// Converts a store error into a collection error.
///
/// Entity errors raised by the collection's own hooks come back typed. A missing document
/// becomes `not_found`, and any other store failure becomes `unavailable`.
pub(crate) fn from_store<E>(
    err: FrameworkError,
    not_found: impl FnOnce(String) -> E,
    unavailable: impl FnOnce(String) -> E,
) -> E
where
    E: std::error::Error + 'static,
{
    match err.into_entity_error::<E>() {
        Ok(entity) => entity,
        Err(FrameworkError::NotFound(id)) => not_found(id),
        Err(other) => unavailable(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_keep_entity_detail() {
        let boxed = FrameworkError::EntityError(Box::new(OrderError::ValidationError(
            "quantity must be at least 1".into(),
        )));
        let err: OrderError = boxed.into();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err: OrderError = FrameworkError::ActorClosed.into();
        assert_eq!(err.kind(), ErrorKind::BackendUnavailable);

        let err: OrderError = FrameworkError::NotFound("order_9".into()).into();
        assert_eq!(err, OrderError::NotFound("order_9".into()));
    }

    #[test]
    fn storefront_error_delegates_kind() {
        let err = StorefrontError::from(ProductError::NotFound("product_1".into()));
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(StorefrontError::Unauthenticated.kind(), ErrorKind::Unauthenticated);
    }
}
