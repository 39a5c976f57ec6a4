use crate::auth::Session;
use crate::error::StorefrontError;
use crate::lifecycle::Storefront;
use crate::model::{ProductId, WishlistToggle};
use std::collections::BTreeSet;
use tracing::warn;

/// The heart icons on the product grid.
///
/// A toggle flips the heart before the write is sent and puts it back if the write fails.
/// [`toggle`](Self::toggle) does both halves; callers that render in between use
/// [`begin_toggle`](Self::begin_toggle) and [`settle`](Self::settle).
#[derive(Debug, Clone, Default)]
pub struct WishlistView {
    saved: BTreeSet<ProductId>,
}

impl WishlistView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_saved(&self, product_id: ProductId) -> bool {
        self.saved.contains(&product_id)
    }

    pub fn saved(&self) -> impl Iterator<Item = ProductId> + '_ {
        self.saved.iter().copied()
    }

    /// Replaces the local hearts with what the store holds.
    pub async fn refresh(
        &mut self,
        shop: &Storefront,
        session: &Session,
    ) -> Result<(), StorefrontError> {
        let entries = shop.wishlist(session).await?;
        self.saved = entries.into_iter().map(|e| e.product_id).collect();
        Ok(())
    }

    /// Flips the heart now, before any write is sent. Pass the returned token and the
    /// write's result to [`settle`](Self::settle).
    pub fn begin_toggle(&mut self, product_id: ProductId) -> PendingToggle {
        let was_saved = !self.saved.insert(product_id);
        if was_saved {
            self.saved.remove(&product_id);
        }
        PendingToggle {
            product_id,
            was_saved,
        }
    }

    /// Applies the outcome of a toggle started with [`begin_toggle`](Self::begin_toggle).
    /// A failed write puts the heart back where it was.
    pub fn settle(
        &mut self,
        pending: PendingToggle,
        result: Result<WishlistToggle, StorefrontError>,
    ) -> Result<WishlistToggle, StorefrontError> {
        let PendingToggle {
            product_id,
            was_saved,
        } = pending;
        match result {
            Ok(outcome) => {
                // The store is authoritative if the local state had drifted
                self.set(product_id, outcome.is_saved());
                Ok(outcome)
            }
            Err(e) => {
                warn!(product_id = %product_id, error = %e, "Wishlist toggle failed, reverting");
                self.set(product_id, was_saved);
                Err(e)
            }
        }
    }

    fn set(&mut self, product_id: ProductId, saved: bool) {
        if saved {
            self.saved.insert(product_id);
        } else {
            self.saved.remove(&product_id);
        }
    }

    pub async fn toggle(
        &mut self,
        shop: &Storefront,
        session: &Session,
        product_id: ProductId,
    ) -> Result<WishlistToggle, StorefrontError> {
        session.require_user()?;
        let pending = self.begin_toggle(product_id);
        let result = shop.toggle_wishlist(session, product_id).await;
        self.settle(pending, result)
    }
}

/// A heart flipped by [`WishlistView::begin_toggle`] whose write has not settled.
#[derive(Debug)]
#[must_use = "settle the toggle with the write's result"]
pub struct PendingToggle {
    product_id: ProductId,
    was_saved: bool,
}

impl PendingToggle {
    pub fn product_id(&self) -> ProductId {
        self.product_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heart_flips_before_the_write_and_reverts_on_failure() {
        let mut hearts = WishlistView::new();
        let tote = ProductId(1);

        let pending = hearts.begin_toggle(tote);
        assert!(hearts.is_saved(tote));
        let err = hearts
            .settle(pending, Err(StorefrontError::Validation("offline".into())))
            .unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Validation);
        assert!(!hearts.is_saved(tote));

        let pending = hearts.begin_toggle(tote);
        assert_eq!(pending.product_id(), tote);
        hearts.settle(pending, Ok(WishlistToggle::Added)).unwrap();
        assert!(hearts.is_saved(tote));

        let pending = hearts.begin_toggle(tote);
        assert!(!hearts.is_saved(tote));
        hearts
            .settle(pending, Err(StorefrontError::Validation("offline".into())))
            .unwrap_err();
        assert!(hearts.is_saved(tote));
    }

    #[test]
    fn store_outcome_wins_over_a_drifted_heart() {
        let mut hearts = WishlistView::new();
        let tote = ProductId(1);

        // Local state says unsaved, but the store already had it and removed it
        let pending = hearts.begin_toggle(tote);
        hearts.settle(pending, Ok(WishlistToggle::Removed)).unwrap();
        assert!(!hearts.is_saved(tote));
    }
}
