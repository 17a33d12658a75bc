//! Direct messages between parents and teachers.

use crate::document::{collections, impl_document};
use crate::ids::{MessageId, UserId, validate_required_id};
use k12_core::now_millis;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Stored field names, for queries.
pub mod fields {
    pub const MESSAGE_ID: &str = "messageId";
    pub const SENDER_ID: &str = "senderId";
    pub const RECEIVER_ID: &str = "receiverId";
    pub const TIMESTAMP: &str = "timestamp";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(rename = "messageId")]
    pub id: MessageId,
    #[validate(custom(function = "validate_required_id"))]
    pub sender_id: UserId,
    pub sender_name: String,
    #[validate(custom(function = "validate_required_id"))]
    pub receiver_id: UserId,
    pub receiver_name: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub subject: String,
    #[validate(length(min = 1, max = 5000))]
    pub content: String,
    pub timestamp: i64,
    #[serde(default)]
    pub is_read: bool,
    /// Same value for both directions between two participants.
    #[serde(default)]
    pub conversation_id: String,
}

impl_document!(Message, MessageId, collections::MESSAGES, "messageId");

/// Order-independent key for the conversation between `a` and `b`.
pub fn conversation_key(a: &UserId, b: &UserId) -> String {
    if a <= b {
        format!("{}_{}", a, b)
    } else {
        format!("{}_{}", b, a)
    }
}

impl Message {
    pub fn new(
        sender_id: UserId,
        sender_name: impl Into<String>,
        receiver_id: UserId,
        receiver_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let conversation_id = conversation_key(&sender_id, &receiver_id);
        Self {
            id: MessageId::empty(),
            sender_id,
            sender_name: sender_name.into(),
            receiver_id,
            receiver_name: receiver_name.into(),
            subject: String::new(),
            content: content.into(),
            timestamp: now_millis(),
            is_read: false,
            conversation_id,
        }
    }

    pub fn with_subject(self, subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            ..self
        }
    }

    /// True when this message went from one of `a`, `b` to the other.
    pub fn is_between(&self, a: &UserId, b: &UserId) -> bool {
        (&self.sender_id == a && &self.receiver_id == b)
            || (&self.sender_id == b && &self.receiver_id == a)
    }
}
