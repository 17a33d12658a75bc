use tracing::{debug, instrument};

use k12_core::AppError;
use k12_models::messages::fields;
use k12_models::{Document, Message, MessageId, UserId};
use k12_store::{Direction, DocumentStore};

use crate::modules::repository;

pub struct MessageService;

impl MessageService {
    #[instrument(skip(store, message), fields(message.sender = %message.sender_id, message.receiver = %message.receiver_id))]
    pub async fn send_message<S: DocumentStore>(
        store: &S,
        message: Message,
    ) -> Result<MessageId, AppError> {
        repository::create(store, message).await
    }

    /// Inbox of `user_id`, newest first.
    #[instrument(skip(store))]
    pub async fn get_messages<S: DocumentStore>(
        store: &S,
        user_id: &UserId,
    ) -> Result<Vec<Message>, AppError> {
        repository::fetch(
            store
                .collection(Message::COLLECTION)
                .where_eq(fields::RECEIVER_ID, user_id.as_str())
                .order_by(fields::TIMESTAMP, Direction::Descending),
        )
        .await
    }

    /// Messages exchanged between `a` and `b`, oldest first.
    ///
    /// The store can only filter on the sender, so the query returns
    /// everything either participant sent; messages to third parties are
    /// dropped here.
    #[instrument(skip(store))]
    pub async fn get_conversation<S: DocumentStore>(
        store: &S,
        a: &UserId,
        b: &UserId,
    ) -> Result<Vec<Message>, AppError> {
        let sent: Vec<Message> = repository::fetch(
            store
                .collection(Message::COLLECTION)
                .where_in(fields::SENDER_ID, [a.as_str(), b.as_str()])
                .order_by(fields::TIMESTAMP, Direction::Ascending),
        )
        .await?;

        let fetched = sent.len();
        let conversation: Vec<Message> = sent
            .into_iter()
            .filter(|message| message.is_between(a, b))
            .collect();
        debug!(fetched, kept = conversation.len(), "Conversation filtered");

        Ok(conversation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k12_store::MemoryStore;

    fn message(from: &str, to: &str, content: &str, timestamp: i64) -> Message {
        Message {
            timestamp,
            ..Message::new(UserId::new(from), from, UserId::new(to), to, content)
        }
    }

    #[tokio::test]
    async fn test_inbox_newest_first() {
        let store = MemoryStore::new();
        MessageService::send_message(&store, message("t1", "p1", "first", 1))
            .await
            .unwrap();
        MessageService::send_message(&store, message("t2", "p1", "second", 2))
            .await
            .unwrap();
        MessageService::send_message(&store, message("t1", "p2", "other", 3))
            .await
            .unwrap();

        let inbox: Vec<String> = MessageService::get_messages(&store, &UserId::new("p1"))
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.content)
            .collect();
        assert_eq!(inbox, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn test_same_sender_same_receiver_is_one_conversation() {
        let store = MemoryStore::new();
        MessageService::send_message(&store, message("p1", "p1", "note to self", 1))
            .await
            .unwrap();

        let conversation =
            MessageService::get_conversation(&store, &UserId::new("p1"), &UserId::new("p1"))
                .await
                .unwrap();
        assert_eq!(conversation.len(), 1);
    }
}
