//! # Authentication
//!
//! The storefront talks to authentication through the [`AuthProvider`] trait: password
//! sign-up and sign-in, social sign-in, and password changes. A successful call yields a
//! [`Principal`] (user id, email and role claim). Principals can only be minted inside this
//! crate, so the role a caller acts with always comes from the provider.
//!
//! [`LocalAuth`] is the in-process provider. [`AuthClient`] is the per-device handle a UI
//! holds: it remembers the current [`Session`] and notifies watchers on every sign-in and
//! sign-out.

pub mod credential;
pub mod local;
pub mod session;

pub use credential::{Credential, CredentialClient, CredentialId};
pub use local::LocalAuth;
pub use session::{AuthClient, Principal, Session};

use crate::error::ErrorKind;
use crate::user_actor::UserError;
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Unknown email or wrong password. Deliberately does not say which.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Not signed in")]
    NotSignedIn,

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::ValidationError(_) => ErrorKind::Validation,
            AuthError::InvalidCredentials | AuthError::NotSignedIn => ErrorKind::Unauthenticated,
            AuthError::ActorCommunicationError(_) => ErrorKind::BackendUnavailable,
        }
    }
}

impl From<UserError> for AuthError {
    fn from(e: UserError) -> Self {
        match e {
            UserError::ValidationError(msg) => AuthError::ValidationError(msg),
            UserError::NotFound(_) => AuthError::InvalidCredentials,
            UserError::ActorCommunicationError(msg) => AuthError::ActorCommunicationError(msg),
        }
    }
}

/// Email/password registration form.
#[derive(Clone, Default)]
pub struct SignUp {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
    pub confirm_password: String,
}

impl fmt::Debug for SignUp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUp")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OAuthProvider {
    Google,
    Facebook,
}

impl fmt::Display for OAuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OAuthProvider::Google => f.write_str("google"),
            OAuthProvider::Facebook => f.write_str("facebook"),
        }
    }
}

/// What a social provider asserts about the person signing in.
#[derive(Debug, Clone)]
pub struct OAuthIdentity {
    pub email: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Registers a new account and signs it in.
    async fn sign_up(&self, form: SignUp) -> Result<Principal, AuthError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Principal, AuthError>;

    /// Signs in with a social identity, creating the profile on first use.
    async fn sign_in_with_oauth(
        &self,
        provider: OAuthProvider,
        identity: OAuthIdentity,
    ) -> Result<Principal, AuthError>;

    async fn change_password(
        &self,
        principal: &Principal,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<(), AuthError>;
}

/// Shared password rules for sign-up and password changes.
pub(crate) fn check_password(
    password: &str,
    confirm: &str,
    min_len: usize,
) -> Result<(), AuthError> {
    if password != confirm {
        return Err(AuthError::ValidationError("passwords do not match".into()));
    }
    if password.chars().count() < min_len {
        return Err(AuthError::ValidationError(format!(
            "password must be at least {min_len} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_rules() {
        assert!(check_password("secret1", "secret1", 6).is_ok());
        assert_eq!(
            check_password("secret1", "secret2", 6),
            Err(AuthError::ValidationError("passwords do not match".into()))
        );
        assert!(check_password("abc", "abc", 6).is_err());
    }

    #[test]
    fn sign_up_debug_hides_password() {
        let form = SignUp {
            name: "Ana".into(),
            email: "ana@shop.test".into(),
            password: "hunter22".into(),
            confirm_password: "hunter22".into(),
            ..Default::default()
        };
        assert!(!format!("{form:?}").contains("hunter22"));
    }
}
