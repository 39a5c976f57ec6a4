//! # User Client
//!
//! Profile lookups and edits.
use crate::model::{UserCreate, UserId, UserProfile, UserUpdate};
use crate::user_actor::{normalize_email, UserError};
use async_trait::async_trait;
use document_actor::{ActorClient, FrameworkError, Query, ResourceClient};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<UserProfile>,
}

impl UserClient {
    pub fn new(inner: ResourceClient<UserProfile>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<UserProfile> for UserClient {
    type Error = UserError;

    fn inner(&self) -> &ResourceClient<UserProfile> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.into()
    }
}

impl UserClient {
    #[instrument(skip(self))]
    pub async fn create_user(&self, params: UserCreate) -> Result<UserId, UserError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_user(&self, id: UserId, update: UserUpdate) -> Result<UserProfile, UserError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Case-insensitive lookup by email.
    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserProfile>, UserError> {
        let email = normalize_email(email);
        let mut hits = self
            .find(Query::all().filter(move |u: &UserProfile| u.email == email).limit(1))
            .await?;
        Ok(hits.pop())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;
    use chrono::Utc;
    use document_actor::mock::MockClient;

    #[tokio::test]
    async fn find_by_email_returns_first_hit() {
        let mut mock = MockClient::<UserProfile>::new();
        mock.expect_query().return_ok(vec![UserProfile {
            id: UserId(4),
            name: "Ana".into(),
            email: "ana@shop.test".into(),
            phone: None,
            photo_url: None,
            role: Role::Customer,
            created_at: Utc::now(),
        }]);
        mock.expect_query().return_ok(vec![]);

        let users = UserClient::new(mock.client());
        let found = users.find_by_email("ANA@shop.test").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(UserId(4)));
        assert!(users.find_by_email("nobody@shop.test").await.unwrap().is_none());
        mock.verify();
    }
}
