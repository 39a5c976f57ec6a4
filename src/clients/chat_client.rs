//! # Chat Client
use crate::chat_actor::ChatError;
use crate::model::{
    summarize_conversations, ChatMessage, ChatMessageCreate, Conversation, MessageId, UserId,
};
use async_trait::async_trait;
use document_actor::{ActorClient, FrameworkError, Query, ResourceClient, Subscription};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct ChatClient {
    inner: ResourceClient<ChatMessage>,
}

impl ChatClient {
    pub fn new(inner: ResourceClient<ChatMessage>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<ChatMessage> for ChatClient {
    type Error = ChatError;

    fn inner(&self) -> &ResourceClient<ChatMessage> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.into()
    }
}

impl ChatClient {
    /// One conversation in timestamp order. Equal timestamps keep the order messages arrived.
    pub fn conversation_query(user_id: UserId) -> Query<ChatMessage> {
        Query::all()
            .filter(move |m: &ChatMessage| m.user_id == user_id)
            .order_by(|m| m.timestamp)
    }

    #[instrument(skip(self))]
    pub async fn send(&self, params: ChatMessageCreate) -> Result<MessageId, ChatError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    pub async fn conversation(&self, user_id: UserId) -> Result<Vec<ChatMessage>, ChatError> {
        self.find(Self::conversation_query(user_id)).await
    }

    pub async fn subscribe_conversation(
        &self,
        user_id: UserId,
    ) -> Result<Subscription<ChatMessage>, ChatError> {
        self.subscribe(Self::conversation_query(user_id)).await
    }

    /// One row per customer who has written or been written to, most recent first.
    #[instrument(skip(self))]
    pub async fn conversations(&self) -> Result<Vec<Conversation>, ChatError> {
        let messages = self
            .find(Query::all().order_by(|m: &ChatMessage| m.timestamp))
            .await?;
        Ok(summarize_conversations(&messages))
    }
}
