//! Password credentials, stored in their own collection and never returned to callers.
//!
//! Passwords are kept as a salted SHA-256 digest. Verification runs inside the credential
//! actor as an action, so the digest never leaves it.

use crate::auth::AuthError;
use crate::error::from_store;
use crate::model::{document_id, UserId};
use crate::user_actor::normalize_email;
use async_trait::async_trait;
use document_actor::{ActorClient, ActorEntity, FrameworkError, Query, ResourceClient};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use std::fmt;

document_id!(
    /// Credential document id.
    CredentialId,
    "cred"
);

#[derive(Clone, PartialEq, Eq)]
struct PasswordDigest {
    salt: String,
    hash: String,
}

impl PasswordDigest {
    fn new(password: &str) -> Self {
        let salt = hex::encode(rand::random::<[u8; 16]>());
        let hash = Self::hash(&salt, password);
        Self { salt, hash }
    }

    fn hash(salt: &str, password: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(salt.as_bytes());
        hasher.update(password.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Compares in constant time.
    fn matches(&self, password: &str) -> bool {
        let candidate = Self::hash(&self.salt, password);
        bool::from(candidate.as_bytes().ct_eq(self.hash.as_bytes()))
    }
}

/// Sign-in record for one email address.
#[derive(Clone)]
pub struct Credential {
    pub id: CredentialId,
    pub email: String,
    pub user_id: UserId,
    password: Option<PasswordDigest>,
}

impl Credential {
    /// False for accounts that only ever signed in through a social provider.
    pub fn has_password(&self) -> bool {
        self.password.is_some()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("user_id", &self.user_id)
            .field("has_password", &self.has_password())
            .finish()
    }
}

pub struct CredentialCreate {
    pub email: String,
    pub user_id: UserId,
    pub password: Option<String>,
}

impl fmt::Debug for CredentialCreate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialCreate")
            .field("email", &self.email)
            .field("user_id", &self.user_id)
            .finish_non_exhaustive()
    }
}

/// Replaces the password.
pub struct CredentialUpdate {
    pub password: String,
}

impl fmt::Debug for CredentialUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CredentialUpdate { .. }")
    }
}

pub enum CredentialAction {
    /// Returns whether the password matches.
    Verify(String),
}

impl fmt::Debug for CredentialAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialAction::Verify(_) => f.write_str("Verify(..)"),
        }
    }
}

#[async_trait]
impl ActorEntity for Credential {
    type Id = CredentialId;
    type Create = CredentialCreate;
    type Update = CredentialUpdate;
    type Action = CredentialAction;
    type ActionResult = bool;
    type Context = ();
    type Error = AuthError;

    fn from_create_params(id: CredentialId, params: CredentialCreate) -> Result<Self, AuthError> {
        Ok(Self {
            id,
            email: normalize_email(&params.email),
            user_id: params.user_id,
            password: params.password.as_deref().map(PasswordDigest::new),
        })
    }

    async fn on_update(&mut self, update: CredentialUpdate, _: &()) -> Result<(), AuthError> {
        self.password = Some(PasswordDigest::new(&update.password));
        Ok(())
    }

    /// Verifying never changes the record.
    fn is_mutation(_: &CredentialAction) -> bool {
        false
    }

    async fn handle_action(&mut self, action: CredentialAction, _: &()) -> Result<bool, AuthError> {
        match action {
            CredentialAction::Verify(password) => Ok(self
                .password
                .as_ref()
                .is_some_and(|digest| digest.matches(&password))),
        }
    }
}

#[derive(Clone)]
pub struct CredentialClient {
    inner: ResourceClient<Credential>,
}

impl CredentialClient {
    pub fn new(inner: ResourceClient<Credential>) -> Self {
        Self { inner }
    }
}

impl ActorClient<Credential> for CredentialClient {
    type Error = AuthError;

    fn inner(&self) -> &ResourceClient<Credential> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        from_store(
            e,
            |_| AuthError::InvalidCredentials,
            AuthError::ActorCommunicationError,
        )
    }
}

impl CredentialClient {
    pub async fn create(&self, params: CredentialCreate) -> Result<CredentialId, AuthError> {
        self.inner.create(params).await.map_err(Self::map_error)
    }

    pub async fn by_email(&self, email: &str) -> Result<Option<Credential>, AuthError> {
        let email = normalize_email(email);
        let mut hits = self
            .find(Query::all().filter(move |c: &Credential| c.email == email).limit(1))
            .await?;
        Ok(hits.pop())
    }

    pub async fn by_user(&self, user_id: UserId) -> Result<Option<Credential>, AuthError> {
        let mut hits = self
            .find(Query::all().filter(move |c: &Credential| c.user_id == user_id).limit(1))
            .await?;
        Ok(hits.pop())
    }

    pub async fn verify(&self, id: CredentialId, password: &str) -> Result<bool, AuthError> {
        self.inner
            .perform_action(id, CredentialAction::Verify(password.to_string()))
            .await
            .map_err(Self::map_error)
    }

    pub async fn set_password(&self, id: CredentialId, password: &str) -> Result<(), AuthError> {
        self.inner
            .update(
                id,
                CredentialUpdate {
                    password: password.to_string(),
                },
            )
            .await
            .map(|_| ())
            .map_err(Self::map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digests_are_salted() {
        let a = PasswordDigest::new("s3cret!");
        let b = PasswordDigest::new("s3cret!");
        assert_ne!(a.salt, b.salt);
        assert_ne!(a.hash, b.hash);
        assert!(a.matches("s3cret!"));
        assert!(!a.matches("s3cret"));
    }

    #[test]
    fn near_miss_passwords_are_rejected() {
        let digest = PasswordDigest::new("sunflower");
        for attempt in ["", "s", "sunflowe", "sunflowers", "Sunflower", digest.hash.as_str()] {
            assert!(!digest.matches(attempt), "{attempt:?}");
        }
        assert!(digest.matches("sunflower"));
    }

    #[tokio::test]
    async fn social_only_credentials_never_verify() {
        let mut credential = Credential::from_create_params(
            CredentialId(1),
            CredentialCreate {
                email: "Ana@Shop.test".into(),
                user_id: UserId(1),
                password: None,
            },
        )
        .unwrap();
        assert_eq!(credential.email, "ana@shop.test");
        let ok = credential
            .handle_action(CredentialAction::Verify(String::new()), &())
            .await
            .unwrap();
        assert!(!ok);
    }

    #[test]
    fn debug_output_hides_passwords() {
        let create = CredentialCreate {
            email: "ana@shop.test".into(),
            user_id: UserId(1),
            password: Some("hunter22".into()),
        };
        assert!(!format!("{create:?}").contains("hunter22"));
        let verify = CredentialAction::Verify("hunter22".into());
        assert!(!format!("{verify:?}").contains("hunter22"));
    }
}
