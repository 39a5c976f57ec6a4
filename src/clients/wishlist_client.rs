//! # Wishlist Client
use crate::model::{Product, ProductId, UserId, WishlistCreate, WishlistEntry, WishlistToggle};
use crate::wishlist_actor::WishlistError;
use async_trait::async_trait;
use document_actor::{ActorClient, FrameworkError, Query, ResourceClient};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct WishlistClient {
    inner: ResourceClient<WishlistEntry>,
}

impl WishlistClient {
    pub fn new(inner: ResourceClient<WishlistEntry>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<WishlistEntry> for WishlistClient {
    type Error = WishlistError;

    fn inner(&self) -> &ResourceClient<WishlistEntry> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.into()
    }
}

impl WishlistClient {
    /// A user's saved products, oldest first.
    pub fn user_query(user_id: UserId) -> Query<WishlistEntry> {
        Query::all()
            .filter(move |e: &WishlistEntry| e.user_id == user_id)
            .order_by(|e| e.added_at)
    }

    pub async fn entries_for(&self, user_id: UserId) -> Result<Vec<WishlistEntry>, WishlistError> {
        self.find(Self::user_query(user_id)).await
    }

    pub async fn entry_for(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<Option<WishlistEntry>, WishlistError> {
        let mut hits = self
            .find(Self::user_query(user_id).filter(move |e| e.product_id == product_id))
            .await?;
        Ok(hits.pop())
    }

    /// Removes the entry for `(user_id, product.id)` if there is one, otherwise saves the
    /// product's current name, price and image.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn toggle(
        &self,
        user_id: UserId,
        product: &Product,
    ) -> Result<WishlistToggle, WishlistError> {
        match self.entry_for(user_id, product.id).await? {
            Some(entry) => {
                debug!(entry_id = %entry.id, "Removing");
                self.delete(entry.id).await?;
                Ok(WishlistToggle::Removed)
            }
            None => {
                debug!("Adding");
                self.inner
                    .create(WishlistCreate::from_product(user_id, product))
                    .await
                    .map_err(Self::map_error)?;
                Ok(WishlistToggle::Added)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WishlistEntryId;
    use chrono::Utc;
    use document_actor::mock::MockClient;

    fn keychain() -> Product {
        Product {
            id: ProductId(2),
            name: "Beaded Keychain".into(),
            price: 120.0,
            stock: 10,
            image_url: "memory://products/2-keychain.png".into(),
            description: None,
            category: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn toggle_adds_when_absent() {
        let mut mock = MockClient::<WishlistEntry>::new();
        mock.expect_query().return_ok(vec![]);
        mock.expect_create().return_ok(WishlistEntryId(1));

        let wishlist = WishlistClient::new(mock.client());
        let outcome = wishlist.toggle(UserId(1), &keychain()).await.unwrap();
        assert_eq!(outcome, WishlistToggle::Added);
        mock.verify();
    }

    #[tokio::test]
    async fn toggle_removes_when_present() {
        let product = keychain();
        let mut mock = MockClient::<WishlistEntry>::new();
        mock.expect_query().return_ok(vec![WishlistEntry {
            id: WishlistEntryId(7),
            user_id: UserId(1),
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
            image_url: product.image_url.clone(),
            added_at: Utc::now(),
        }]);
        mock.expect_delete(WishlistEntryId(7)).return_ok(());

        let wishlist = WishlistClient::new(mock.client());
        let outcome = wishlist.toggle(UserId(1), &product).await.unwrap();
        assert_eq!(outcome, WishlistToggle::Removed);
        mock.verify();
    }
}
