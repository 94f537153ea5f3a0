//! Shared Types
//!
//! Data structures and errors used across the client: message and
//! conversation models, reaction summaries, realtime row events, and the
//! crate-wide error type.

pub mod error;
pub mod event;
pub mod messaging;

pub use error::ChatError;
pub use event::{Operation, RowEvent, Table};
pub use messaging::{
    Conversation, Message, MessageId, MessageRow, NewMessage, ReactionBoard, ReactionEntry,
    ReactionRow, ReactionSnapshot, ReactionToggle, ReplyPreview,
};
