//! [`ActorEntity`] implementation for [`Product`].

use crate::model::{validate_listing, Product, ProductCreate, ProductId, ProductUpdate};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};
use async_trait::async_trait;
use chrono::Utc;
use document_actor::ActorEntity;
use tracing::debug;

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Context = ();
    type Error = ProductError;

    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, ProductError> {
        validate_listing(&params.name, params.price, &params.image_url)
            .map_err(ProductError::ValidationError)?;
        Ok(Self {
            id,
            name: params.name.trim().to_string(),
            price: params.price,
            stock: params.stock,
            image_url: params.image_url,
            description: params.description,
            category: params.category,
            created_at: Utc::now(),
        })
    }

    /// Merges the edit. The merged document is validated before anything is written.
    async fn on_update(&mut self, update: ProductUpdate, _: &()) -> Result<(), ProductError> {
        let name = update.name.unwrap_or_else(|| self.name.clone());
        let price = update.price.unwrap_or(self.price);
        let image_url = update.image_url.unwrap_or_else(|| self.image_url.clone());
        validate_listing(&name, price, &image_url).map_err(ProductError::ValidationError)?;

        self.name = name.trim().to_string();
        self.price = price;
        self.image_url = image_url;
        if update.description.is_some() {
            self.description = update.description;
        }
        if update.category.is_some() {
            self.category = update.category;
        }
        Ok(())
    }

    fn is_mutation(action: &ProductAction) -> bool {
        !matches!(action, ProductAction::CheckStock)
    }

    async fn handle_action(
        &mut self,
        action: ProductAction,
        _: &(),
    ) -> Result<ProductActionResult, ProductError> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::CheckStock(self.stock)),
            ProductAction::AdjustStock(delta) => {
                let next = i64::from(self.stock) + delta;
                let stock = u32::try_from(next).map_err(|_| ProductError::InsufficientStock {
                    delta,
                    available: self.stock,
                })?;
                debug!(product_id = %self.id, from = self.stock, to = stock, "Stock adjusted");
                self.stock = stock;
                Ok(ProductActionResult::AdjustStock(stock))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tote() -> Product {
        Product::from_create_params(
            ProductId(1),
            ProductCreate {
                name: "Embroidered Tote".into(),
                price: 450.0,
                stock: 10,
                image_url: "memory://products/1-tote.png".into(),
                description: None,
                category: Some("Bags".into()),
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn stock_never_goes_negative() {
        let mut product = tote();
        let err = product
            .handle_action(ProductAction::AdjustStock(-11), &())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ProductError::InsufficientStock {
                delta: -11,
                available: 10
            }
        );
        assert_eq!(product.stock, 10);

        let result = product
            .handle_action(ProductAction::AdjustStock(-10), &())
            .await
            .unwrap();
        assert_eq!(result, ProductActionResult::AdjustStock(0));
    }

    #[tokio::test]
    async fn invalid_edit_leaves_product_unchanged() {
        let mut product = tote();
        let edit = ProductUpdate {
            name: Some("Canvas Tote".into()),
            price: Some(-5.0),
            ..Default::default()
        };
        assert!(product.on_update(edit, &()).await.is_err());
        assert_eq!(product.name, "Embroidered Tote");
        assert_eq!(product.price, 450.0);
    }
}
