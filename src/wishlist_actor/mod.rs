//! # Wishlist Actor
//!
//! Saved products, one entry per `(user, product)` pair. The pair is kept unique by
//! [`WishlistClient::toggle`](crate::clients::WishlistClient::toggle), which deletes an
//! existing entry instead of adding a second one.

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::WishlistEntry;
use document_actor::{ResourceActor, ResourceClient};

pub fn new(buffer_size: usize) -> (ResourceActor<WishlistEntry>, ResourceClient<WishlistEntry>) {
    ResourceActor::new(buffer_size)
}
