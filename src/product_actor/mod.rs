//! # Product Actor
//!
//! The catalog. Besides CRUD it exposes stock [`actions`]:
//!
//! ```rust,ignore
//! let stock = product_client.check_stock(product_id).await?;
//! product_client.adjust_stock(product_id, -2).await?;
//! ```
//!
//! Orders and wishlist entries keep their own copies of name, price and image, so nothing
//! here cascades when a product is edited or removed.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Product;
use document_actor::{ResourceActor, ResourceClient};

/// Creates a new Product actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Product>, ResourceClient<Product>) {
    ResourceActor::new(buffer_size)
}
