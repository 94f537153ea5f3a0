//! Conversation Data Structure
//!
//! Represents a conversation between two or more users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::message::Message;

/// Represents a conversation between users
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Conversation {
    /// Unique conversation ID
    pub id: Uuid,
    /// Participant user IDs
    pub participants: Vec<Uuid>,
    /// Username of the other participant (for display in chat list)
    pub other_username: Option<String>,
    /// Preview text of the last message
    pub last_message_preview: String,
    /// Timestamp of the last message
    pub last_message_time: Option<DateTime<Utc>>,
    /// Number of unread messages
    pub unread_count: u32,
    /// When the conversation was created
    pub created_at: DateTime<Utc>,
}

impl Conversation {
    /// Create a new conversation
    pub fn new(participants: Vec<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            participants,
            other_username: None,
            last_message_preview: String::new(),
            last_message_time: None,
            unread_count: 0,
            created_at: Utc::now(),
        }
    }

    /// Create a new conversation between two users
    pub fn new_direct(user1: Uuid, user2: Uuid) -> Self {
        Self::new(vec![user1, user2])
    }

    /// Update the last message preview
    pub fn update_last_message(&mut self, message: &Message, preview_len: usize) {
        self.last_message_preview = message.preview(preview_len);
        self.last_message_time = Some(message.created_at);
    }

    /// Check if user is a participant
    pub fn has_participant(&self, user_id: Uuid) -> bool {
        self.participants.contains(&user_id)
    }

    /// Get the other participant (for direct messages)
    pub fn other_participant(&self, current_user_id: Uuid) -> Option<Uuid> {
        self.participants
            .iter()
            .find(|&&id| id != current_user_id)
            .copied()
    }
}

/// Response for listing conversations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListConversationsResponse {
    pub conversations: Vec<Conversation>,
}
