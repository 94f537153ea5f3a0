//! Message Reaction Data Structures
//!
//! Reactions are stored as one row per (message, user, emoji) and shown as a
//! per-message summary: each distinct emoji with its count and whether the
//! current user is among the reactors. The store's reaction query returns
//! the whole conversation's summaries at once as a [`ReactionSnapshot`].
//!
//! The [`ReactionBoard`] keeps those summaries for every message in the open
//! conversation and applies the optimistic toggle before the store round trip
//! completes. A snapshot refetch overwrites the entire board.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// A reaction row as the hosted store exposes it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReactionRow {
    /// Row id
    pub id: Uuid,
    /// Message the reaction is attached to
    pub message_id: Uuid,
    /// Reacting user
    pub user_id: Uuid,
    /// Emoji character(s)
    pub emoji: String,
    /// When the reaction was added
    pub created_at: DateTime<Utc>,
}

/// Aggregated view of one emoji on one message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReactionEntry {
    /// Emoji character(s)
    pub emoji: String,
    /// How many users reacted with this emoji
    pub count: u32,
    /// Whether the current user is among them
    pub reacted_by_me: bool,
}

/// Outcome of an optimistic toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionToggle {
    /// The user's reaction was added locally
    Added,
    /// The user's reaction was removed locally
    Removed,
}

/// Aggregated reaction state for a whole conversation, keyed by message id
pub type ReactionSnapshot = HashMap<Uuid, Vec<ReactionEntry>>;

/// Per-message reaction summaries for the open conversation.
///
/// Keys are authoritative message ids. A message whose last reaction was
/// toggled off keeps its key with an empty summary list; lookups for unknown
/// messages return an empty slice either way, so callers never distinguish
/// the two.
#[derive(Debug, Clone, Default)]
pub struct ReactionBoard {
    boards: HashMap<Uuid, Vec<ReactionEntry>>,
}

impl ReactionBoard {
    /// Create an empty board
    pub fn new() -> Self {
        Self {
            boards: HashMap::new(),
        }
    }

    /// Summaries for a message, empty if none are known
    pub fn entries(&self, message_id: Uuid) -> &[ReactionEntry] {
        self.boards
            .get(&message_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of messages with a tracked summary list
    pub fn len(&self) -> usize {
        self.boards.len()
    }

    /// Whether no summaries are tracked at all
    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    /// Apply the current user's toggle for `emoji` on `message_id`.
    ///
    /// Adding to an existing entry increments its count and marks it as the
    /// user's own. Toggling off decrements, and an entry that reaches zero is
    /// dropped from the list.
    pub fn toggle(&mut self, message_id: Uuid, emoji: &str) -> ReactionToggle {
        let entries = self.boards.entry(message_id).or_default();
        if let Some(pos) = entries.iter().position(|e| e.emoji == emoji) {
            if entries[pos].reacted_by_me {
                entries[pos].count = entries[pos].count.saturating_sub(1);
                entries[pos].reacted_by_me = false;
                if entries[pos].count == 0 {
                    entries.remove(pos);
                }
                ReactionToggle::Removed
            } else {
                entries[pos].count += 1;
                entries[pos].reacted_by_me = true;
                ReactionToggle::Added
            }
        } else {
            entries.push(ReactionEntry {
                emoji: emoji.to_string(),
                count: 1,
                reacted_by_me: true,
            });
            ReactionToggle::Added
        }
    }

    /// Overwrite the whole board with an authoritative snapshot
    pub fn replace_all(&mut self, snapshot: ReactionSnapshot) {
        self.boards = snapshot;
    }

    /// Drop all summaries for a message (used when the message is deleted)
    pub fn remove_message(&mut self, message_id: Uuid) {
        self.boards.remove(&message_id);
    }

    /// Aggregate raw reaction rows into one message's summaries.
    ///
    /// Entries keep the order in which their emoji first appears in `rows`,
    /// so the same rows always produce the same list.
    pub fn summarize(rows: &[ReactionRow], current_user: Uuid) -> Vec<ReactionEntry> {
        let mut entries: Vec<ReactionEntry> = Vec::new();
        for row in rows {
            if let Some(entry) = entries.iter_mut().find(|e| e.emoji == row.emoji) {
                entry.count += 1;
                if row.user_id == current_user {
                    entry.reacted_by_me = true;
                }
            } else {
                entries.push(ReactionEntry {
                    emoji: row.emoji.clone(),
                    count: 1,
                    reacted_by_me: row.user_id == current_user,
                });
            }
        }
        entries
    }

    /// Aggregate raw reaction rows into a whole-conversation snapshot
    pub fn snapshot_from_rows(rows: &[ReactionRow], current_user: Uuid) -> ReactionSnapshot {
        let mut by_message: HashMap<Uuid, Vec<ReactionRow>> = HashMap::new();
        for row in rows {
            by_message
                .entry(row.message_id)
                .or_default()
                .push(row.clone());
        }
        by_message
            .into_iter()
            .map(|(message_id, rows)| (message_id, Self::summarize(&rows, current_user)))
            .collect()
    }
}

/// Response for the whole-conversation reaction query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListReactionsResponse {
    pub reactions: ReactionSnapshot,
}
