//! Conversation State Engine
//!
//! Everything that happens inside one open conversation lives here. The
//! [`ConversationController`] is the single entry point; the other modules
//! are the pieces it is assembled from:
//!
//! - [`compose`]: the input box with its reply and edit targets
//! - [`mutation`]: the serialized queue of durable writes
//! - [`journal`]: pre-mutation snapshots for rollback
//! - [`scroll`]: scroll commands and read marks derived from list changes

pub mod compose;
pub mod controller;
pub mod journal;
pub mod mutation;
pub mod scroll;

pub use compose::ComposeState;
pub use controller::ConversationController;
pub use journal::{OperationJournal, Snapshot};
pub use mutation::{Mutation, MutationOutcome, MutationQueue};
pub use scroll::{ScrollCommand, ScrollCoordinator};
