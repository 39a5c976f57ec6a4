//! # ActorEntity Trait
//!
//! The `ActorEntity` trait defines the contract every document type (Product, Order,
//! WishlistEntry, ...) implements to be stored by the generic `ResourceActor`. It fixes the
//! associated types for IDs, DTOs, actions, context and errors, and provides the lifecycle
//! hooks (`on_create`, `on_update`, `on_delete`, `handle_action`).
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//!
//! Both default to `Ok(())`. A hook that returns an error aborts the operation and leaves the
//! collection untouched.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any document type must implement to be managed by a `ResourceActor`.
///
/// # Async & Context
/// Hooks are async so they can call other collections. The `Context` type is injected into
/// every hook when the actor starts (`run(context)`), which lets dependencies be wired after
/// all actors exist.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Document identifier. Generated by the actor from a `u32` counter.
    ///
    /// `Ord` gives scans a stable default order (insertion order for counter-based ids).
    type Id: Eq + Hash + Ord + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload required to insert a new document.
    type Create: Send + Sync + Debug;

    /// Partial-merge payload for point updates.
    type Update: Send + Sync + Debug;

    /// Document-specific operations that don't fit CRUD (e.g. `AdjustStock`).
    type Action: Send + Sync + Debug;

    /// Result returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected into the actor. Use `()` if none are needed.
    type Context: Send + Sync;

    /// Error type for this document.
    ///
    /// One enum per collection rather than one per message: clients match on a single
    /// `OrderError`, at the cost of some variants being impossible for some operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the full document from the generated ID and the payload.
    /// Called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after the document is built and before it is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received. Must leave `self` unchanged on error.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the document is removed.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Whether `action` can change the document. Read-only actions are not followed by a
    /// snapshot to subscribers.
    fn is_mutation(_action: &Self::Action) -> bool {
        true
    }

    /// Handle a document-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
