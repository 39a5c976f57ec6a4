//! # Framework Errors
//!
//! Errors raised by the store plumbing itself. Document-level failures travel inside
//! [`FrameworkError::EntityError`] and can be recovered with
//! [`FrameworkError::into_entity_error`].

/// Errors that can occur within the document store framework.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Recovers the typed entity error boxed by the actor.
    ///
    /// Returns `Err(self)` unchanged when this is a plumbing error or when the boxed error
    /// is of another type.
    pub fn into_entity_error<E>(self) -> Result<E, Self>
    where
        E: std::error::Error + 'static,
    {
        match self {
            FrameworkError::EntityError(inner) => inner
                .downcast::<E>()
                .map(|e| *e)
                .map_err(FrameworkError::EntityError),
            other => Err(other),
        }
    }

    /// True when the store could not be reached at all (closed or dropped channel).
    pub fn is_unavailable(&self) -> bool {
        matches!(self, FrameworkError::ActorClosed | FrameworkError::ActorDropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error, PartialEq)]
    #[error("out of stock")]
    struct OutOfStock;

    #[derive(Debug, thiserror::Error)]
    #[error("other")]
    struct Other;

    #[test]
    fn recovers_boxed_entity_error() {
        let err = FrameworkError::EntityError(Box::new(OutOfStock));
        assert_eq!(err.into_entity_error::<OutOfStock>().unwrap(), OutOfStock);
    }

    #[test]
    fn keeps_foreign_errors_boxed() {
        let err = FrameworkError::EntityError(Box::new(Other));
        let back = err.into_entity_error::<OutOfStock>().unwrap_err();
        assert!(matches!(back, FrameworkError::EntityError(_)));
        assert_eq!(back.to_string(), "Entity error: other");
    }

    #[test]
    fn plumbing_errors_pass_through() {
        let err = FrameworkError::ActorClosed;
        assert!(err.is_unavailable());
        assert!(matches!(
            err.into_entity_error::<OutOfStock>(),
            Err(FrameworkError::ActorClosed)
        ));
        assert!(!FrameworkError::NotFound("x".into()).is_unavailable());
    }
}
