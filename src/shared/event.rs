/**
 * Row-Change Event System
 *
 * This module defines the events delivered by the realtime feed. Every event
 * describes one change to one store row: which table it happened in, what
 * kind of change it was, and the row payload itself.
 *
 * Payloads stay as raw JSON until a consumer asks for a typed row, so events
 * for tables we do not model can flow through (and be ignored) without
 * failing deserialization.
 */
use serde::{Deserialize, Serialize};

use super::error::ChatError;
use super::messaging::{MessageRow, ReactionRow};

/// Store table an event originated from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    /// The messages table
    Messages,
    /// The per-user reaction rows table
    MessageReactions,
    /// Any table this client does not model
    #[serde(other)]
    Other,
}

/// Kind of row change
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// A row was inserted
    Insert,
    /// A row was updated in place
    Update,
    /// A row was deleted
    Delete,
    /// Any operation this client does not model
    #[serde(other)]
    Other,
}

/// One row change delivered over the realtime feed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RowEvent {
    /// Table the change happened in
    pub table: Table,
    /// Kind of change
    pub operation: Operation,
    /// Changed row as raw JSON
    pub row: serde_json::Value,
}

impl RowEvent {
    /// Create an event from a raw row payload
    pub fn new(table: Table, operation: Operation, row: serde_json::Value) -> Self {
        Self {
            table,
            operation,
            row,
        }
    }

    /// Create an insert event from a typed row
    pub fn insert<T: Serialize>(table: Table, row: &T) -> Result<Self, ChatError> {
        Ok(Self::new(table, Operation::Insert, serde_json::to_value(row)?))
    }

    /// Create an update event from a typed row
    pub fn update<T: Serialize>(table: Table, row: &T) -> Result<Self, ChatError> {
        Ok(Self::new(table, Operation::Update, serde_json::to_value(row)?))
    }

    /// Create a delete event from a typed row
    pub fn delete<T: Serialize>(table: Table, row: &T) -> Result<Self, ChatError> {
        Ok(Self::new(table, Operation::Delete, serde_json::to_value(row)?))
    }

    /// Decode the payload as a message row
    pub fn message_row(&self) -> Result<MessageRow, ChatError> {
        Ok(serde_json::from_value(self.row.clone())?)
    }

    /// Decode the payload as a reaction row
    pub fn reaction_row(&self) -> Result<ReactionRow, ChatError> {
        Ok(serde_json::from_value(self.row.clone())?)
    }

    /// Decode only the row's primary key. Delete payloads often carry just
    /// the key, so this works where a full typed decode would not.
    pub fn row_id(&self) -> Result<uuid::Uuid, ChatError> {
        #[derive(Deserialize)]
        struct RowKey {
            id: uuid::Uuid,
        }
        let key: RowKey = serde_json::from_value(self.row.clone())?;
        Ok(key.id)
    }
}
