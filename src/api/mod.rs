//! Store Accessor Layer
//!
//! The trait the controller talks to, plus the HTTP implementation used in
//! production.

pub mod http;
pub mod store;

pub use http::HttpConversationStore;
pub use store::ConversationStore;
