use crate::auth::Session;
use crate::error::StorefrontError;
use crate::lifecycle::Storefront;
use crate::model::{ChatMessage, MessageId, UserId};
use document_actor::Subscription;
use tracing::debug;

/// The admin's chat pane: one open conversation at a time.
#[derive(Default)]
pub struct AdminChatPanel {
    open: Option<(UserId, Subscription<ChatMessage>)>,
}

impl AdminChatPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<UserId> {
        self.open.as_ref().map(|(user_id, _)| *user_id)
    }

    /// Opens `user_id`'s conversation. The previous subscription is released before the new
    /// one is created, so at most one is ever live.
    pub async fn select(
        &mut self,
        shop: &Storefront,
        session: &Session,
        user_id: UserId,
    ) -> Result<(), StorefrontError> {
        session.require_admin()?;
        self.close();
        let subscription = shop.subscribe_conversation(session, user_id).await?;
        debug!(user_id = %user_id, "Conversation opened");
        self.open = Some((user_id, subscription));
        Ok(())
    }

    /// Next snapshot of the open conversation, or `None` if nothing is open or the store
    /// has shut down.
    pub async fn next(&mut self) -> Option<Vec<ChatMessage>> {
        let (_, subscription) = self.open.as_mut()?;
        subscription.next().await
    }

    pub fn close(&mut self) {
        if let Some((user_id, subscription)) = self.open.take() {
            subscription.unsubscribe();
            debug!(user_id = %user_id, "Conversation closed");
        }
    }

    /// Replies in the open conversation.
    pub async fn reply(
        &self,
        shop: &Storefront,
        session: &Session,
        text: &str,
    ) -> Result<MessageId, StorefrontError> {
        let user_id = self
            .selected()
            .ok_or_else(|| StorefrontError::Validation("no conversation selected".into()))?;
        shop.reply(session, user_id, text).await
    }
}
