//! # Pending-Operation Journal
//!
//! Captures the pre-mutation state of a message before an optimistic edit or
//! delete is applied, keyed by the mutation that owns it. When the durable
//! call fails, the snapshot is taken back and restored; when it succeeds (or
//! a server-side delete supersedes it) the snapshot is discarded.
//!
//! Sends are not journaled (rolling one back is just removing the optimistic
//! entry) and reactions are never journaled (the authoritative snapshot
//! overwrites them wholesale).

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

use crate::shared::messaging::Message;

/// Pre-mutation state of one message
#[derive(Debug, Clone)]
pub enum Snapshot {
    /// The message was removed optimistically; holds the position it had
    Removed { index: usize, message: Message },
    /// The message was edited optimistically; holds the prior content and
    /// edit time
    Edited {
        message_id: Uuid,
        content: String,
        edited_at: Option<DateTime<Utc>>,
    },
}

impl Snapshot {
    /// Authoritative id of the message the snapshot belongs to
    fn message_id(&self) -> Option<Uuid> {
        match self {
            Snapshot::Removed { message, .. } => message.id.server_id(),
            Snapshot::Edited { message_id, .. } => Some(*message_id),
        }
    }
}

/// Snapshots of optimistic mutations awaiting their durable result
#[derive(Debug, Default)]
pub struct OperationJournal {
    snapshots: HashMap<u64, Snapshot>,
}

impl OperationJournal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture a snapshot for a mutation
    pub fn record(&mut self, mutation_id: u64, snapshot: Snapshot) {
        self.snapshots.insert(mutation_id, snapshot);
    }

    /// Drop a snapshot after its durable call succeeded
    pub fn confirm(&mut self, mutation_id: u64) {
        self.snapshots.remove(&mutation_id);
    }

    /// Take a snapshot back for restore after its durable call failed
    pub fn rollback(&mut self, mutation_id: u64) -> Option<Snapshot> {
        self.snapshots.remove(&mutation_id)
    }

    /// Drop every snapshot for a message. A server-side delete supersedes
    /// any pending local restore for it.
    pub fn discard_for_message(&mut self, message_id: Uuid) {
        self.snapshots
            .retain(|_, snapshot| snapshot.message_id() != Some(message_id));
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
