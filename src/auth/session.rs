//! Sessions and the per-device auth handle.

use crate::auth::{AuthError, AuthProvider, OAuthIdentity, OAuthProvider, SignUp};
use crate::error::StorefrontError;
use crate::model::{Role, UserId};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

/// An authenticated identity with its role claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    user_id: UserId,
    email: String,
    role: Role,
}

impl Principal {
    pub(crate) fn new(user_id: UserId, email: String, role: Role) -> Self {
        Self {
            user_id,
            email,
            role,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Who is calling: a signed-in principal, or a guest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    principal: Option<Principal>,
}

impl Session {
    pub fn guest() -> Self {
        Self::default()
    }

    pub(crate) fn signed_in(principal: Principal) -> Self {
        Self {
            principal: Some(principal),
        }
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    pub fn is_guest(&self) -> bool {
        self.principal.is_none()
    }

    pub fn require_user(&self) -> Result<&Principal, StorefrontError> {
        self.principal.as_ref().ok_or(StorefrontError::Unauthenticated)
    }

    pub fn require_admin(&self) -> Result<&Principal, StorefrontError> {
        let principal = self.require_user()?;
        if principal.is_admin() {
            Ok(principal)
        } else {
            Err(StorefrontError::Unauthorized(format!(
                "{} is not an admin",
                principal.email()
            )))
        }
    }
}

/// One device's view of authentication.
///
/// The session starts as guest. Every successful sign-in (of any kind) publishes the new
/// session to watchers, and signing out publishes the guest session. Signing out while
/// already a guest publishes nothing.
pub struct AuthClient {
    provider: Arc<dyn AuthProvider>,
    state: watch::Sender<Session>,
}

impl AuthClient {
    pub fn new(provider: Arc<dyn AuthProvider>) -> Self {
        let (state, _) = watch::channel(Session::guest());
        Self { provider, state }
    }

    pub fn session(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Receives the current session now and each change after.
    pub fn watch(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    fn publish(&self, principal: Principal) -> Session {
        info!(user_id = %principal.user_id(), role = %principal.role(), "Signed in");
        let session = Session::signed_in(principal);
        self.state.send_replace(session.clone());
        session
    }

    pub async fn sign_up(&self, form: SignUp) -> Result<Session, AuthError> {
        let principal = self.provider.sign_up(form).await?;
        Ok(self.publish(principal))
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let principal = self.provider.sign_in(email, password).await?;
        Ok(self.publish(principal))
    }

    pub async fn sign_in_with(
        &self,
        provider: OAuthProvider,
        identity: OAuthIdentity,
    ) -> Result<Session, AuthError> {
        let principal = self.provider.sign_in_with_oauth(provider, identity).await?;
        Ok(self.publish(principal))
    }

    pub fn sign_out(&self) {
        let changed = self.state.send_if_modified(|session| {
            if session.is_guest() {
                false
            } else {
                *session = Session::guest();
                true
            }
        });
        if changed {
            info!("Signed out");
        }
    }

    pub async fn change_password(
        &self,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<(), AuthError> {
        let session = self.session();
        let principal = session.principal().ok_or(AuthError::NotSignedIn)?;
        self.provider
            .change_password(principal, new_password, confirm_password)
            .await
    }
}
