//! # ActorClient Trait
//!
//! Common surface for collection-specific clients. Implementors supply the inner
//! `ResourceClient` and an error mapping, and get `get`, `delete`, `find` and `subscribe`
//! for free.
use crate::{ActorEntity, FrameworkError, Query, ResourceClient, Subscription};
use async_trait::async_trait;

/// Trait for collection-specific clients to inherit the standard operations.
///
/// # Example
///
/// ```rust
/// use document_actor::{ActorClient, ActorEntity, FrameworkError, Query, ResourceClient};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)]
/// struct Tag { id: u32, label: String }
/// #[derive(Debug)] struct TagCreate(String);
/// #[derive(Debug)] struct TagUpdate;
/// #[derive(Debug)] enum TagAction {}
///
/// #[derive(Debug, thiserror::Error)]
/// enum TagError {
///     #[error("store unavailable: {0}")]
///     Store(String),
/// }
///
/// #[async_trait]
/// impl ActorEntity for Tag {
///     type Id = u32;
///     type Create = TagCreate;
///     type Update = TagUpdate;
///     type Action = TagAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = TagError;
///
///     fn from_create_params(id: u32, p: TagCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, label: p.0 })
///     }
///     async fn on_update(&mut self, _: TagUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, a: TagAction, _: &()) -> Result<(), Self::Error> { match a {} }
/// }
///
/// struct TagClient {
///     inner: ResourceClient<Tag>,
/// }
///
/// impl ActorClient<Tag> for TagClient {
///     type Error = TagError;
///
///     fn inner(&self) -> &ResourceClient<Tag> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError) -> Self::Error {
///         TagError::Store(e.to_string())
///     }
/// }
///
/// async fn usage(client: TagClient) {
///     // get(), delete(), find() and subscribe() are provided
///     let _ = client.get(1).await;
///     let _ = client.find(Query::all().filter(|t: &Tag| t.label.starts_with('a'))).await;
///     let _ = client.delete(1).await;
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The collection-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the collection's error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch a document by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Delete a document by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }

    /// Scan the collection.
    async fn find(&self, query: Query<T>) -> Result<Vec<T>, Self::Error> {
        self.inner().query(query).await.map_err(Self::map_error)
    }

    /// Open a live query.
    async fn subscribe(&self, query: Query<T>) -> Result<Subscription<T>, Self::Error> {
        self.inner().subscribe(query).await.map_err(Self::map_error)
    }
}
