//! In-process [`AuthProvider`] backed by the profile and credential collections.

use crate::auth::credential::{CredentialClient, CredentialCreate};
use crate::auth::{
    check_password, AuthError, AuthProvider, OAuthIdentity, OAuthProvider, Principal, SignUp,
};
use crate::clients::UserClient;
use crate::model::{Role, UserCreate, UserId, UserProfile};
use crate::user_actor::normalize_email;
use async_trait::async_trait;
use document_actor::ActorClient;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

pub struct LocalAuth {
    users: UserClient,
    credentials: CredentialClient,
    admin_emails: Vec<String>,
    min_password_len: usize,
    /// Serializes account creation so two sign-ups for one email cannot both pass the
    /// uniqueness check.
    registration: Mutex<()>,
}

impl LocalAuth {
    pub fn new(
        users: UserClient,
        credentials: CredentialClient,
        admin_emails: &[String],
        min_password_len: usize,
    ) -> Self {
        Self {
            users,
            credentials,
            admin_emails: admin_emails.iter().map(|e| normalize_email(e)).collect(),
            min_password_len,
            registration: Mutex::new(()),
        }
    }

    fn role_for(&self, email: &str) -> Role {
        if self.admin_emails.iter().any(|a| a == &normalize_email(email)) {
            Role::Admin
        } else {
            Role::Customer
        }
    }

    fn principal(profile: &UserProfile) -> Principal {
        Principal::new(profile.id, profile.email.clone(), profile.role)
    }

    /// Stores the credential for a profile created moments ago. If that fails the profile is
    /// deleted again, so the email stays free for another attempt.
    async fn attach_credential(
        &self,
        user_id: UserId,
        params: CredentialCreate,
    ) -> Result<(), AuthError> {
        let Err(e) = self.credentials.create(params).await else {
            return Ok(());
        };
        match self.users.delete(user_id).await {
            Ok(()) => warn!(%user_id, error = %e, "Credential insert failed, profile removed"),
            Err(cleanup) => warn!(
                %user_id,
                error = %e,
                cleanup_error = %cleanup,
                "Credential insert failed, orphaned profile left behind"
            ),
        }
        Err(e)
    }
}

#[async_trait]
impl AuthProvider for LocalAuth {
    #[instrument(skip(self))]
    async fn sign_up(&self, form: SignUp) -> Result<Principal, AuthError> {
        check_password(&form.password, &form.confirm_password, self.min_password_len)?;
        if form.name.trim().is_empty() {
            return Err(AuthError::ValidationError("name is required".into()));
        }

        let _guard = self.registration.lock().await;
        if self.credentials.by_email(&form.email).await?.is_some()
            || self.users.find_by_email(&form.email).await?.is_some()
        {
            return Err(AuthError::ValidationError(format!(
                "{} is already registered",
                normalize_email(&form.email)
            )));
        }

        let role = self.role_for(&form.email);
        let user_id = self
            .users
            .create_user(UserCreate {
                name: form.name,
                email: form.email.clone(),
                phone: form.phone,
                photo_url: None,
                role,
            })
            .await?;
        self.attach_credential(
            user_id,
            CredentialCreate {
                email: form.email,
                user_id,
                password: Some(form.password),
            },
        )
        .await?;

        let profile = self
            .users
            .get(user_id)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;
        info!(%user_id, %role, "Account registered");
        Ok(Self::principal(&profile))
    }

    #[instrument(skip(self, password))]
    async fn sign_in(&self, email: &str, password: &str) -> Result<Principal, AuthError> {
        let Some(credential) = self.credentials.by_email(email).await? else {
            return Err(AuthError::InvalidCredentials);
        };
        if !self.credentials.verify(credential.id, password).await? {
            warn!(user_id = %credential.user_id, "Password rejected");
            return Err(AuthError::InvalidCredentials);
        }
        let profile = self
            .users
            .get(credential.user_id)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;
        Ok(Self::principal(&profile))
    }

    #[instrument(skip(self, identity), fields(email = %identity.email))]
    async fn sign_in_with_oauth(
        &self,
        provider: OAuthProvider,
        identity: OAuthIdentity,
    ) -> Result<Principal, AuthError> {
        let _guard = self.registration.lock().await;
        if let Some(profile) = self.users.find_by_email(&identity.email).await? {
            return Ok(Self::principal(&profile));
        }

        let role = self.role_for(&identity.email);
        let user_id = self
            .users
            .create_user(UserCreate {
                name: identity.display_name.unwrap_or_default(),
                email: identity.email.clone(),
                phone: None,
                photo_url: identity.photo_url,
                role,
            })
            .await?;
        self.attach_credential(
            user_id,
            CredentialCreate {
                email: identity.email,
                user_id,
                password: None,
            },
        )
        .await?;

        let profile = self
            .users
            .get(user_id)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;
        info!(%user_id, %provider, "Profile created on first social sign-in");
        Ok(Self::principal(&profile))
    }

    #[instrument(skip_all, fields(user_id = %principal.user_id()))]
    async fn change_password(
        &self,
        principal: &Principal,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<(), AuthError> {
        check_password(new_password, confirm_password, self.min_password_len)?;
        let credential = self
            .credentials
            .by_user(principal.user_id())
            .await?
            .ok_or(AuthError::InvalidCredentials)?;
        self.credentials
            .set_password(credential.id, new_password)
            .await?;
        info!("Password changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::credential::Credential;
    use crate::ErrorKind;
    use document_actor::mock::MockClient;
    use document_actor::FrameworkError;

    fn form(email: &str) -> SignUp {
        SignUp {
            name: "Ana".into(),
            email: email.into(),
            phone: None,
            password: "sunflower".into(),
            confirm_password: "sunflower".into(),
        }
    }

    /// Real profile collection, scripted credential collection.
    fn start_with(credentials: &MockClient<Credential>) -> (LocalAuth, UserClient) {
        let (user_actor, user_client) = crate::user_actor::new(8);
        tokio::spawn(user_actor.run(()));
        let users = UserClient::new(user_client);
        let auth = LocalAuth::new(
            users.clone(),
            CredentialClient::new(credentials.client()),
            &[],
            6,
        );
        (auth, users)
    }

    #[tokio::test]
    async fn failed_credential_insert_removes_the_new_profile() {
        let mut credentials = MockClient::<Credential>::new();
        credentials.expect_query().return_ok(vec![]);
        credentials.expect_create().return_err(FrameworkError::ActorClosed);
        let (auth, users) = start_with(&credentials);

        let err = auth.sign_up(form("ana@example.com")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BackendUnavailable);
        assert!(users.find_by_email("ana@example.com").await.unwrap().is_none());
        credentials.verify();
    }

    #[tokio::test]
    async fn failed_social_credential_removes_the_new_profile() {
        let mut credentials = MockClient::<Credential>::new();
        credentials.expect_create().return_err(FrameworkError::ActorClosed);
        let (auth, users) = start_with(&credentials);

        let identity = OAuthIdentity {
            email: "ben@example.com".into(),
            display_name: Some("Ben".into()),
            photo_url: None,
        };
        assert!(auth
            .sign_in_with_oauth(OAuthProvider::Google, identity)
            .await
            .is_err());
        assert!(users.find_by_email("ben@example.com").await.unwrap().is_none());
        credentials.verify();
    }
}
