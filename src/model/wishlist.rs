use crate::model::{Product, ProductId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

document_id!(
    /// Wishlist entry id.
    WishlistEntryId,
    "wish"
);

/// One product saved by one user. At most one entry exists per `(user_id, product_id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistEntry {
    pub id: WishlistEntryId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub name: String,
    pub price: f64,
    pub image_url: String,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct WishlistCreate {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub name: String,
    pub price: f64,
    pub image_url: String,
}

impl WishlistCreate {
    pub fn from_product(user_id: UserId, product: &Product) -> Self {
        Self {
            user_id,
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
            image_url: product.image_url.clone(),
        }
    }
}

/// Outcome of a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WishlistToggle {
    Added,
    Removed,
}

impl WishlistToggle {
    pub fn is_saved(self) -> bool {
        matches!(self, WishlistToggle::Added)
    }
}
