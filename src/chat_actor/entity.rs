use crate::chat_actor::ChatError;
use crate::model::{ChatMessage, ChatMessageCreate, MessageId};
use async_trait::async_trait;
use chrono::Utc;
use document_actor::ActorEntity;
use std::convert::Infallible;

#[async_trait]
impl ActorEntity for ChatMessage {
    type Id = MessageId;
    type Create = ChatMessageCreate;
    type Update = Infallible;
    type Action = Infallible;
    type ActionResult = ();
    type Context = ();
    type Error = ChatError;

    /// Stamps the message with the time it reached the store.
    fn from_create_params(id: MessageId, params: ChatMessageCreate) -> Result<Self, ChatError> {
        let text = params.text.trim();
        if text.is_empty() {
            return Err(ChatError::ValidationError("message is empty".into()));
        }
        Ok(Self {
            id,
            user_id: params.user_id,
            user_email: params.user_email,
            text: text.to_string(),
            sender: params.sender,
            timestamp: Utc::now(),
        })
    }

    async fn on_update(&mut self, update: Infallible, _: &()) -> Result<(), ChatError> {
        match update {}
    }

    async fn handle_action(&mut self, action: Infallible, _: &()) -> Result<(), ChatError> {
        match action {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Sender, UserId};

    #[test]
    fn blank_messages_are_rejected() {
        let params = ChatMessageCreate {
            user_id: UserId(1),
            user_email: None,
            text: " \n ".into(),
            sender: Sender::User,
        };
        assert!(matches!(
            ChatMessage::from_create_params(MessageId(1), params),
            Err(ChatError::ValidationError(_))
        ));
    }
}
