//! Fizikhub Chat - Conversation State Engine
//!
//! Client-side state engine for Fizikhub's direct-message conversations.
//! It keeps an open conversation's message timeline and reaction summaries
//! correct while the user types, edits, deletes, and reacts faster than the
//! hosted store can answer.
//!
//! # Overview
//!
//! Every mutation is applied to local state first and reconciled with the
//! store afterwards:
//!
//! - A send appends an unconfirmed local entry; the realtime echo replaces
//!   it in place, matched by a client tag
//! - Edits and deletes apply immediately and roll back from a journal if
//!   the store refuses them
//! - Reaction toggles apply immediately; the authoritative whole-board
//!   snapshot overwrites them on the next refetch
//! - Durable writes run strictly one at a time, in issue order
//!
//! # Module Structure
//!
//! - **`shared`** - Types used throughout the crate
//!   - Message, conversation, and reaction models
//!   - Realtime row-change events
//!   - The crate-wide error type
//!
//! - **`config`** - Base URL and bearer-token configuration
//!
//! - **`api`** - The persistent store accessor
//!   - [`api::ConversationStore`] trait the engine drives
//!   - HTTP implementation against the hosted backend
//!
//! - **`realtime`** - Row-change feed with an explicit lifecycle
//!   - SSE transport with reconnect and backoff
//!   - Hand-driven feeds for tests and embedders
//!
//! - **`conversation`** - The state engine itself
//!   - [`conversation::ConversationController`] and its parts
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use fizikhub_chat::api::{ConversationStore, HttpConversationStore};
//! use fizikhub_chat::config::Config;
//! use fizikhub_chat::conversation::ConversationController;
//! use fizikhub_chat::realtime::SseSubscriber;
//! use uuid::Uuid;
//!
//! # fn main() -> Result<(), fizikhub_chat::config::ConfigError> {
//! let config = Config::builder()
//!     .base_url("https://fizikhub.example")
//!     .token("jwt")
//!     .build()?;
//! let conversation_id = Uuid::new_v4();
//! let current_user = Uuid::new_v4();
//!
//! let store: Arc<dyn ConversationStore> = Arc::new(HttpConversationStore::new(config.clone()));
//! let mut chat = ConversationController::new(store, conversation_id, current_user);
//! chat.hydrate();
//! chat.attach_subscription(SseSubscriber::new(config).subscribe(conversation_id));
//!
//! loop {
//!     chat.tick();
//!     for message in chat.messages() {
//!         let _reactions = chat.reactions_for(message.id);
//!     }
//!     # break;
//! }
//! chat.close_subscription();
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod conversation;
pub mod realtime;
pub mod shared;

pub use config::Config;
pub use conversation::ConversationController;
pub use shared::error::ChatError;
