use crate::model::{validate_listing, WishlistCreate, WishlistEntry, WishlistEntryId};
use crate::wishlist_actor::WishlistError;
use async_trait::async_trait;
use chrono::Utc;
use document_actor::ActorEntity;
use std::convert::Infallible;

#[async_trait]
impl ActorEntity for WishlistEntry {
    type Id = WishlistEntryId;
    type Create = WishlistCreate;
    /// Entries are added and removed, never edited.
    type Update = Infallible;
    type Action = Infallible;
    type ActionResult = ();
    type Context = ();
    type Error = WishlistError;

    fn from_create_params(
        id: WishlistEntryId,
        params: WishlistCreate,
    ) -> Result<Self, WishlistError> {
        validate_listing(&params.name, params.price, &params.image_url)
            .map_err(WishlistError::ValidationError)?;
        Ok(Self {
            id,
            user_id: params.user_id,
            product_id: params.product_id,
            name: params.name,
            price: params.price,
            image_url: params.image_url,
            added_at: Utc::now(),
        })
    }

    async fn on_update(&mut self, update: Infallible, _: &()) -> Result<(), WishlistError> {
        match update {}
    }

    async fn handle_action(&mut self, action: Infallible, _: &()) -> Result<(), WishlistError> {
        match action {}
    }
}
