//! # Order Actor
//!
//! Owns the `Order` collection and the fulfilment state machine.
//!
//! - [`entity`]: [`ActorEntity`](document_actor::ActorEntity) for [`Order`]. Creation validates
//!   the quantity and the product snapshot, then confirms the customer profile through the
//!   injected [`UserClient`](crate::clients::UserClient). Updates are status transitions and
//!   are checked against [`OrderStatus::can_transition_to`](crate::model::OrderStatus).
//! - [`error`]: [`OrderError`].
//!
//! Stock is not touched when an order is placed; the admin adjusts it by hand.

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::Order;
use document_actor::{ResourceActor, ResourceClient};

/// Creates a new Order actor and its client. Start it with a `UserClient` as context.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::new(buffer_size)
}
