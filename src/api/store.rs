//! Persistent Store Contract
//!
//! [`ConversationStore`] is the durable side of the client: every optimistic
//! mutation eventually lands here, and hydration reads come from here. The
//! controller only ever sees this trait, so tests drive it with a scripted
//! in-memory store while production wires up the HTTP implementation.
//!
//! Writes deliberately return no row data. The authoritative row for a send
//! or edit reaches the client through the realtime feed, and reconciliation
//! happens there; a write call only reports whether the store accepted it.

use async_trait::async_trait;
use uuid::Uuid;

use crate::shared::error::ChatError;
use crate::shared::messaging::{Conversation, MessageRow, NewMessage, ReactionSnapshot};

/// Durable operations against the hosted store.
///
/// All methods take `&self`; implementations are shared behind an `Arc` and
/// called from spawned tasks.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Insert a message row. The `client_tag` inside `message` is persisted
    /// with the row and echoed back on the realtime feed.
    async fn send_message(&self, message: NewMessage) -> Result<(), ChatError>;

    /// Delete a message owned by the current user
    async fn delete_message(&self, message_id: Uuid) -> Result<(), ChatError>;

    /// Replace a message's content and stamp its edit time
    async fn edit_message(&self, message_id: Uuid, content: String) -> Result<(), ChatError>;

    /// Toggle the current user's reaction row for `emoji` on a message.
    /// The store inserts the row if absent and deletes it if present.
    async fn react_to_message(&self, message_id: Uuid, emoji: String) -> Result<(), ChatError>;

    /// Fetch the aggregated reaction state for the whole conversation
    async fn reactions(&self, conversation_id: Uuid) -> Result<ReactionSnapshot, ChatError>;

    /// Mark all messages addressed to the current user in the conversation
    /// as read
    async fn mark_as_read(&self, conversation_id: Uuid) -> Result<(), ChatError>;

    /// Fetch the conversation's message history, oldest first
    async fn list_messages(&self, conversation_id: Uuid) -> Result<Vec<MessageRow>, ChatError>;

    /// Fetch the current user's conversation list
    async fn list_conversations(&self) -> Result<Vec<Conversation>, ChatError>;
}
