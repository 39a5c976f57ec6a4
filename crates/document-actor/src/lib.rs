//! # Document Actor
//!
//! A small document store built on the actor model. Each collection (products, orders,
//! wishlist entries, ...) is owned by one [`ResourceActor`] running in its own Tokio task, and
//! everything else talks to it through a cloneable [`ResourceClient`].
//!
//! ## Layers
//!
//! 1. **Documents** ([`ActorEntity`]): the data plus its lifecycle hooks and validation.
//! 2. **Runtime** ([`ResourceActor`]): sequential request processing, id generation and
//!    subscriber fan-out.
//! 3. **Interface** ([`ResourceClient`], [`ActorClient`]): typed async calls.
//!
//! Requests to one collection are processed strictly in arrival order, so a document is never
//! observed half-updated and a lifecycle hook that rejects a change leaves the store as it
//! was. Collections run in parallel with each other.
//!
//! ## Operations
//!
//! | Operation | Client call | Notes |
//! |---|---|---|
//! | insert | [`ResourceClient::create`] | id generated by the actor |
//! | point read | [`ResourceClient::get`] | `Ok(None)` when absent |
//! | point update | [`ResourceClient::update`] | returns the stored document |
//! | delete | [`ResourceClient::delete`] | `NotFound` when absent |
//! | custom action | [`ResourceClient::perform_action`] | e.g. stock adjustments |
//! | scan | [`ResourceClient::query`] | filter + single sort key, see [`Query`] |
//! | live scan | [`ResourceClient::subscribe`] | see [`Subscription`] |
//!
//! ## Example
//!
//! ```rust
//! use document_actor::{ActorEntity, Query, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Review { id: u32, product: u32, stars: u8 }
//!
//! #[derive(Debug)] struct ReviewCreate { product: u32, stars: u8 }
//! #[derive(Debug)] struct ReviewUpdate { stars: u8 }
//! #[derive(Debug)] enum ReviewAction {}
//!
//! #[derive(Debug, thiserror::Error)]
//! enum ReviewError {
//!     #[error("stars must be 1-5, got {0}")]
//!     Stars(u8),
//! }
//!
//! #[async_trait]
//! impl ActorEntity for Review {
//!     type Id = u32;
//!     type Create = ReviewCreate;
//!     type Update = ReviewUpdate;
//!     type Action = ReviewAction;
//!     type ActionResult = ();
//!     type Context = ();
//!     type Error = ReviewError;
//!
//!     fn from_create_params(id: u32, p: ReviewCreate) -> Result<Self, Self::Error> {
//!         if !(1..=5).contains(&p.stars) {
//!             return Err(ReviewError::Stars(p.stars));
//!         }
//!         Ok(Self { id, product: p.product, stars: p.stars })
//!     }
//!
//!     async fn on_update(&mut self, u: ReviewUpdate, _: &()) -> Result<(), Self::Error> {
//!         if !(1..=5).contains(&u.stars) {
//!             return Err(ReviewError::Stars(u.stars));
//!         }
//!         self.stars = u.stars;
//!         Ok(())
//!     }
//!
//!     async fn handle_action(&mut self, a: ReviewAction, _: &()) -> Result<(), Self::Error> {
//!         match a {}
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, reviews) = ResourceActor::<Review>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     reviews.create(ReviewCreate { product: 1, stars: 4 }).await.unwrap();
//!     reviews.create(ReviewCreate { product: 1, stars: 5 }).await.unwrap();
//!     assert!(reviews.create(ReviewCreate { product: 1, stars: 9 }).await.is_err());
//!
//!     let best = reviews
//!         .query(Query::all().filter(|r: &Review| r.product == 1).order_by(|r| r.stars).descending())
//!         .await
//!         .unwrap();
//!     assert_eq!(best[0].stars, 5);
//! }
//! ```
//!
//! ## Context Injection
//!
//! Hooks receive `&T::Context`, supplied when the loop starts with `actor.run(context)`.
//! Create every actor first, then start each one with the clients it depends on. An order
//! collection that must confirm the customer exists is started with the user client as its
//! context.
//!
//! ## Testing
//!
//! [`mock::MockClient`] scripts the replies of a collection so that code depending on a client
//! can be tested without a real actor behind it.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod query;
pub mod subscription;
pub mod tracing;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
pub use query::Query;
pub use subscription::Subscription;
