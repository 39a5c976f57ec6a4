//! # Chat Actor
//!
//! Messages between customers and the shop. Messages are immutable; a conversation is the set
//! of messages sharing a `user_id`, read in timestamp order.

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::ChatMessage;
use document_actor::{ResourceActor, ResourceClient};

pub fn new(buffer_size: usize) -> (ResourceActor<ChatMessage>, ResourceClient<ChatMessage>) {
    ResourceActor::new(buffer_size)
}
