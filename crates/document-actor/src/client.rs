//! # Generic Client
//!
//! The handle used to talk to a `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use crate::query::Query;
use crate::subscription::Subscription;
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for interacting with a `ResourceActor`.
///
/// Each call sends one [`ResourceRequest`] over the actor's mpsc channel and awaits the reply
/// on a oneshot channel. The client only holds a sender, so cloning is cheap and clones can be
/// handed to any number of tasks.
///
/// * `ActorClosed`: the actor's receiver is gone, the request was never delivered.
/// * `ActorDropped`: the actor received the request but dropped the reply channel.
#[derive(Clone)]
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, FrameworkError>>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::Create) -> Result<T::Id, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }

    /// One-shot scan of the collection.
    pub async fn query(&self, query: Query<T>) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Query { query, respond_to })
            .await
    }

    /// Registers a live query. The first snapshot is already queued when this returns.
    pub async fn subscribe(&self, query: Query<T>) -> Result<Subscription<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Subscribe { query, respond_to })
            .await
    }
}
