use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

document_id!(
    /// Catalog document id.
    ProductId,
    "product"
);

/// A catalog item.
///
/// Orders and wishlist entries copy `name`, `price` and `image_url` when they are created, so
/// later edits (or deleting the product) never reach them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub stock: u32,
    pub image_url: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub name: String,
    pub price: f64,
    pub stock: u32,
    pub image_url: String,
    pub description: Option<String>,
    pub category: Option<String>,
}

/// Partial edit. `None` leaves the field as it is.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

/// Raw admin form input. Price arrives as text and is parsed during validation.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub name: String,
    pub price: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image: Option<ImageUpload>,
}

/// An image file picked in the admin console.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Checks the fields an order snapshot depends on.
pub(crate) fn validate_listing(name: &str, price: f64, image_url: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("product name is required".into());
    }
    if !price.is_finite() || price < 0.0 {
        return Err(format!("invalid price {price}"));
    }
    if image_url.trim().is_empty() {
        return Err("product image is required".into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_requires_name_price_and_image() {
        assert!(validate_listing("Gift Box", 500.0, "memory://products/1-box.png").is_ok());
        assert!(validate_listing(" ", 500.0, "img").is_err());
        assert!(validate_listing("Gift Box", -1.0, "img").is_err());
        assert!(validate_listing("Gift Box", f64::NAN, "img").is_err());
        assert!(validate_listing("Gift Box", 0.0, "").is_err());
    }
}
