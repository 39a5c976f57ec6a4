use crate::model::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

document_id!(
    /// Chat message id.
    MessageId,
    "msg"
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Admin,
}

/// One message in the conversation between a customer and the shop.
///
/// Every customer has exactly one conversation, keyed by `user_id`, whoever sent the message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub user_id: UserId,
    pub user_email: Option<String>,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ChatMessageCreate {
    pub user_id: UserId,
    pub user_email: Option<String>,
    pub text: String,
    pub sender: Sender,
}

/// Row in the admin's conversation list.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversation {
    pub user_id: UserId,
    /// The customer's email, or "Guest User" when none was recorded.
    pub label: String,
    pub last_message: String,
    pub last_activity: DateTime<Utc>,
}

pub const GUEST_LABEL: &str = "Guest User";

/// Folds messages into one row per customer, most recent activity first.
pub fn summarize_conversations(messages: &[ChatMessage]) -> Vec<Conversation> {
    let mut rows: Vec<Conversation> = Vec::new();
    for message in messages {
        let label = message.user_email.clone();
        match rows.iter_mut().find(|row| row.user_id == message.user_id) {
            Some(row) => {
                if message.timestamp >= row.last_activity {
                    row.last_activity = message.timestamp;
                    row.last_message = message.text.clone();
                }
                if row.label == GUEST_LABEL {
                    if let Some(email) = label {
                        row.label = email;
                    }
                }
            }
            None => rows.push(Conversation {
                user_id: message.user_id,
                label: label.unwrap_or_else(|| GUEST_LABEL.to_string()),
                last_message: message.text.clone(),
                last_activity: message.timestamp,
            }),
        }
    }
    rows.sort_by(|a, b| b.last_activity.cmp(&a.last_activity));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn message(id: u32, user: u32, email: Option<&str>, text: &str, minute: u32) -> ChatMessage {
        ChatMessage {
            id: MessageId(id),
            user_id: UserId(user),
            user_email: email.map(str::to_string),
            text: text.to_string(),
            sender: Sender::User,
            timestamp: Utc.with_ymd_and_hms(2024, 2, 14, 9, minute, 0).unwrap(),
        }
    }

    #[test]
    fn one_row_per_customer_newest_first() {
        let messages = vec![
            message(1, 1, Some("ana@shop.test"), "hello", 0),
            message(2, 2, None, "is this in stock?", 5),
            message(3, 1, Some("ana@shop.test"), "any update?", 10),
        ];
        let rows = summarize_conversations(&messages);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].user_id, UserId(1));
        assert_eq!(rows[0].last_message, "any update?");
        assert_eq!(rows[1].label, GUEST_LABEL);
    }

    #[test]
    fn sender_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Sender::Admin).unwrap(), "\"admin\"");
    }
}
