//! Chat Message Data Structures
//!
//! Represents a message in a conversation, both as the store row shape
//! ([`MessageRow`]) and as the in-memory timeline entry ([`Message`]).
//!
//! Optimistic entries live in their own id namespace: [`MessageId::Local`]
//! values come from a per-controller monotonic counter and can never collide
//! with the authoritative [`MessageId::Server`] uuids the store assigns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of a timeline entry.
///
/// `Server` ids are assigned by the hosted store. `Local` ids are handed out
/// by the controller for optimistic entries and are never sent over the wire;
/// the two namespaces are disjoint by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageId {
    /// Authoritative id assigned by the store
    Server(Uuid),
    /// Locally allocated id for a not-yet-confirmed entry
    Local(u64),
}

impl MessageId {
    /// Whether this id belongs to an unconfirmed optimistic entry
    pub fn is_local(&self) -> bool {
        matches!(self, MessageId::Local(_))
    }

    /// Whether this id is store-assigned
    pub fn is_server(&self) -> bool {
        matches!(self, MessageId::Server(_))
    }

    /// The authoritative uuid, if this is a server id
    pub fn server_id(&self) -> Option<Uuid> {
        match self {
            MessageId::Server(id) => Some(*id),
            MessageId::Local(_) => None,
        }
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageId::Server(id) => write!(f, "{}", id),
            MessageId::Local(n) => write!(f, "local-{}", n),
        }
    }
}

impl From<Uuid> for MessageId {
    fn from(id: Uuid) -> Self {
        MessageId::Server(id)
    }
}

/// Type of message content.
///
/// Only plain text is modeled; unrecognized store tags fall back to `Text`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    /// Plain text message
    #[default]
    Text,
}

impl MessageType {
    /// Tag string used by the store
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Text => "text",
        }
    }

    /// Parse a store tag, falling back to `Text` for anything unknown
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "text" => MessageType::Text,
            _ => MessageType::Text,
        }
    }
}

/// Denormalized snapshot of a replied-to message.
///
/// Carried on the replying message so the target can be rendered without a
/// second lookup against the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReplyPreview {
    /// Authoritative id of the target message
    pub id: Uuid,
    /// Target content at the time the reply was composed
    pub content: String,
    /// Sender of the target message
    pub sender_id: Uuid,
}

/// A message as held in the conversation timeline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    /// Timeline id (local until the store confirms the row)
    pub id: MessageId,
    /// Conversation this message belongs to
    pub conversation_id: Uuid,
    /// User who sent the message
    pub sender_id: Uuid,
    /// Message content
    pub content: String,
    /// Type of message
    #[serde(default)]
    pub message_type: MessageType,
    /// When the message was created
    pub created_at: DateTime<Utc>,
    /// When the message was last edited, if ever
    pub edited_at: Option<DateTime<Utc>>,
    /// Denormalized reply target, if this message is a reply
    pub reply: Option<ReplyPreview>,
    /// Whether the recipient has read the message
    pub is_read: bool,
    /// Idempotency token attached to the send and echoed back by the store
    pub client_tag: Option<Uuid>,
}

impl Message {
    /// Create an optimistic local entry for a send that has not been
    /// confirmed yet
    pub fn new_local(
        local_id: u64,
        conversation_id: Uuid,
        sender_id: Uuid,
        content: String,
        reply: Option<ReplyPreview>,
        client_tag: Uuid,
    ) -> Self {
        Self {
            id: MessageId::Local(local_id),
            conversation_id,
            sender_id,
            content,
            message_type: MessageType::Text,
            created_at: Utc::now(),
            edited_at: None,
            reply,
            is_read: false,
            client_tag: Some(client_tag),
        }
    }

    /// Build a timeline entry from an authoritative store row.
    ///
    /// The reply preview is resolved by the caller from the rows it already
    /// holds; the row itself only carries `reply_to_id`.
    pub fn from_row(row: MessageRow, reply: Option<ReplyPreview>) -> Self {
        Self {
            id: MessageId::Server(row.id),
            conversation_id: row.conversation_id,
            sender_id: row.sender_id,
            content: row.content,
            message_type: MessageType::from_tag(&row.message_type),
            created_at: row.created_at,
            edited_at: row.edited_at,
            reply,
            is_read: row.is_read,
            client_tag: row.client_tag,
        }
    }

    /// Whether this entry is still waiting for store confirmation
    pub fn is_pending(&self) -> bool {
        self.id.is_local()
    }

    /// Get a preview of the message (first N characters)
    pub fn preview(&self, max_len: usize) -> String {
        let char_count = self.content.chars().count();
        if char_count <= max_len {
            return self.content.clone();
        }
        let ellipsis_len = max_len.min(3);
        let mut preview: String = self.content.chars().take(max_len - ellipsis_len).collect();
        preview.push_str(&".".repeat(ellipsis_len));
        preview
    }
}

fn default_message_type() -> String {
    "text".to_string()
}

/// A message row as the hosted store exposes it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageRow {
    /// Authoritative message id
    pub id: Uuid,
    /// Conversation the row belongs to
    pub conversation_id: Uuid,
    /// Sending user
    pub sender_id: Uuid,
    /// Message content
    pub content: String,
    /// Read flag maintained by the store
    #[serde(default)]
    pub is_read: bool,
    /// Row creation time
    pub created_at: DateTime<Utc>,
    /// Content type tag
    #[serde(default = "default_message_type")]
    pub message_type: String,
    /// Last edit time, if edited
    #[serde(default)]
    pub edited_at: Option<DateTime<Utc>>,
    /// Id of the replied-to message, if any
    #[serde(default)]
    pub reply_to_id: Option<Uuid>,
    /// Idempotency token echoed back from the send, if the row originated
    /// from this client
    #[serde(default)]
    pub client_tag: Option<Uuid>,
}

/// Payload for a durable send
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMessage {
    /// Target conversation
    pub conversation_id: Uuid,
    /// Message content (validated non-empty by the controller)
    pub content: String,
    /// Content type tag
    #[serde(default)]
    pub message_type: MessageType,
    /// Id of the replied-to message, if this send is a reply
    pub reply_to_id: Option<Uuid>,
    /// Client-generated idempotency token, echoed back in the inserted row
    pub client_tag: Uuid,
}

/// Response after sending a message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub success: bool,
    pub message: Option<MessageRow>,
    pub error: Option<String>,
}

/// Generic `{success}` acknowledgement for delete/edit/mark-read calls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Response for listing messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMessagesResponse {
    pub messages: Vec<MessageRow>,
}
