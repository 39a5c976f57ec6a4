//! # User Actor
//!
//! Customer and admin profiles. Profiles are created by the auth provider on sign-up or first
//! social sign-in; customers can edit their name and phone afterwards.

pub mod entity;
pub mod error;

pub use entity::normalize_email;
pub use error::*;

use crate::model::UserProfile;
use document_actor::{ResourceActor, ResourceClient};

/// Creates a new User actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<UserProfile>, ResourceClient<UserProfile>) {
    ResourceActor::new(buffer_size)
}
