//! # Generic Actor Server
//!
//! `ResourceActor` owns one collection. It processes requests sequentially, so the document
//! map needs no locks, and it pushes snapshots to live subscribers after every successful
//! mutation.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use crate::subscription::{self, Subscriber};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of documents.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the state (`store`), the live
/// subscribers and the receiver end of the channel. Each actor processes its own messages
/// *sequentially*, so exclusive ownership of `store` inside the task replaces locking.
///
/// # Usage Pattern
///
/// 1.  **Create**: `ResourceActor::new()` returns the `actor` (server) and `client` (interface).
/// 2.  **Wire**: pass dependencies (other clients) into `actor.run(context)`.
/// 3.  **Run**: spawn the run loop in a background task.
///
/// ```rust
/// use document_actor::{ActorEntity, Query, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Note { id: u32, text: String }
/// #[derive(Debug)] struct NoteCreate(String);
/// #[derive(Debug)] struct NoteUpdate;
/// #[derive(Debug)] enum NoteAction {}
/// #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
///
/// #[async_trait]
/// impl ActorEntity for Note {
///     type Id = u32;
///     type Create = NoteCreate;
///     type Update = NoteUpdate;
///     type Action = NoteAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = NoteError;
///
///     fn from_create_params(id: u32, p: NoteCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, text: p.0 })
///     }
///     async fn on_update(&mut self, _: NoteUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, a: NoteAction, _: &()) -> Result<(), Self::Error> {
///         match a {}
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Note>::new(10);
///     tokio::spawn(actor.run(()));
///
///     let mut live = client.subscribe(Query::all()).await.unwrap();
///     assert!(live.next().await.unwrap().is_empty());
///
///     client.create(NoteCreate("hello".into())).await.unwrap();
///     let snapshot = live.next().await.unwrap();
///     assert_eq!(snapshot[0].text, "hello");
/// }
/// ```
///
/// # Implementation Details
///
/// * **Create**: next id from the `u32` counter, `from_create_params`, `on_create`, insert,
///   publish.
/// * **Get**: clone of the stored document, or `None`.
/// * **Update**: `on_update` on the stored document, publish, return the new state.
/// * **Delete**: `on_delete`, remove, publish.
/// * **Action**: `handle_action` on the stored document, publish on success unless
///   [`ActorEntity::is_mutation`] says the action is read-only.
/// * **Query**: [`Query::apply`] over the store.
/// * **Subscribe**: register, then send the initial snapshot to that subscriber only.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    subscribers: Vec<Subscriber<T>>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the request channel. When it is full, client calls
    /// wait for space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            subscribers: Vec::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Pushes a fresh snapshot to every live subscriber and drops the ones whose
    /// `Subscription` has been released.
    fn publish(&mut self, entity_type: &str) {
        let store = &self.store;
        let before = self.subscribers.len();
        self.subscribers.retain(|sub| {
            let snapshot = sub.query.apply(store.iter());
            sub.sender.send(snapshot).is_ok()
        });
        let released = before - self.subscribers.len();
        if released > 0 {
            debug!(entity_type, released, live = self.subscribers.len(), "Subscribers released");
        }
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// # Context Injection
    /// `context` is passed to every entity hook. It lets documents reach dependencies (like
    /// other collections' clients) that were created after this actor but before its loop
    /// started.
    pub async fn run(mut self, context: T::Context) {
        // Just the type name, e.g. "Order" instead of "boutique::model::order::Order"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);
                    self.next_id += 1;

                    match T::from_create_params(id.clone(), params) {
                        Ok(mut item) => {
                            if let Err(e) = item.on_create(&context).await {
                                warn!(entity_type, error = %e, "on_create failed");
                                let _ =
                                    respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                                continue;
                            }
                            self.store.insert(id.clone(), item);
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(id));
                            self.publish(entity_type);
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    if let Some(item) = self.store.get_mut(&id) {
                        if let Err(e) = item.on_update(update, &context).await {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        info!(entity_type, %id, "Updated");
                        let _ = respond_to.send(Ok(item.clone()));
                        self.publish(entity_type);
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    if let Some(item) = self.store.get(&id) {
                        if let Err(e) = item.on_delete(&context).await {
                            warn!(entity_type, %id, error = %e, "on_delete failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        self.store.remove(&id);
                        info!(entity_type, %id, size = self.store.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                        self.publish(entity_type);
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    if let Some(item) = self.store.get_mut(&id) {
                        let mutates = T::is_mutation(&action);
                        let result = item
                            .handle_action(action, &context)
                            .await
                            .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                        let ok = result.is_ok();
                        match &result {
                            Ok(_) => info!(entity_type, %id, "Action ok"),
                            Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                        }
                        let _ = respond_to.send(result);
                        if ok && mutates {
                            self.publish(entity_type);
                        }
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Query { query, respond_to } => {
                    let items = query.apply(self.store.iter());
                    debug!(entity_type, ?query, hits = items.len(), "Query");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Subscribe { query, respond_to } => {
                    let initial = query.apply(self.store.iter());
                    let (subscriber, subscription) = subscription::channel(query);
                    if subscriber.sender.send(initial).is_ok()
                        && respond_to.send(Ok(subscription)).is_ok()
                    {
                        self.subscribers.push(subscriber);
                        info!(entity_type, live = self.subscribers.len(), "Subscribed");
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
