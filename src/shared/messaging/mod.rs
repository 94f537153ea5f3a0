//! Messaging Data Structures
//!
//! Shared types for conversations, messages, and reactions. These are the
//! shapes exchanged with the hosted store and held in the conversation
//! timeline.

pub mod conversation;
pub mod message;
pub mod reaction;

pub use conversation::{Conversation, ListConversationsResponse};
pub use message::{
    AckResponse, ListMessagesResponse, Message, MessageId, MessageRow, MessageType, NewMessage,
    ReplyPreview, SendMessageResponse,
};
pub use reaction::{
    ListReactionsResponse, ReactionBoard, ReactionEntry, ReactionRow, ReactionSnapshot,
    ReactionToggle,
};
