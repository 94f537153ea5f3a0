//! Shared Error Types
//!
//! This module defines the error type used across the conversation state
//! engine: the store accessor, the realtime subscription, and the
//! conversation controller all report failures as [`ChatError`].
//!
//! # Error Categories
//!
//! - `Store` - transport-level failures talking to the hosted store
//! - `Rejected` - the store answered but refused the operation
//! - `Serialization` - JSON encode/decode failures
//! - `Validation` - bad input caught before any network call
//! - `Subscription` - realtime channel failures
//! - `PendingTarget` / `UnknownMessage` - operations aimed at a message
//!   that is not (or not yet) addressable
//!
//! # Usage
//!
//! ```rust
//! use fizikhub_chat::shared::error::ChatError;
//!
//! let error = ChatError::validation("content", "message content cannot be empty");
//! ```
//!
//! # Thread Safety
//!
//! All error values are `Send + Sync` and `Clone`, so they can cross task
//! boundaries and be surfaced later through `take_error()`.
use thiserror::Error;

/// Errors reported by the conversation state engine
#[derive(Debug, Error, Clone)]
pub enum ChatError {
    /// Transport-level store failure (connection refused, timeout, 5xx)
    #[error("store request failed: {message}")]
    Store {
        /// Human-readable error message
        message: String,
    },

    /// The store processed the request and answered `success: false`
    #[error("store rejected the operation: {message}")]
    Rejected {
        /// Reason reported by the store, if any
        message: String,
    },

    /// JSON serialization or deserialization error
    #[error("serialization error: {message}")]
    Serialization {
        /// Human-readable error message
        message: String,
    },

    /// Input validation error
    #[error("validation error in field '{field}': {message}")]
    Validation {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// Realtime subscription failure
    #[error("subscription error: {message}")]
    Subscription {
        /// Human-readable error message
        message: String,
    },

    /// The operation needs an authoritative id but the target message is
    /// still an unconfirmed optimistic entry
    #[error("message {id} has not been confirmed by the store yet")]
    PendingTarget {
        /// Display form of the local message id
        id: String,
    },

    /// The operation referenced a message that is not in the timeline
    #[error("message {id} is not present in the conversation")]
    UnknownMessage {
        /// Display form of the message id
        id: String,
    },
}

impl ChatError {
    /// Create a new store transport error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Create a new rejection error
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new subscription error
    pub fn subscription(message: impl Into<String>) -> Self {
        Self::Subscription {
            message: message.into(),
        }
    }

    /// Create a new pending-target error
    pub fn pending_target(id: impl ToString) -> Self {
        Self::PendingTarget { id: id.to_string() }
    }

    /// Create a new unknown-message error
    pub fn unknown_message(id: impl ToString) -> Self {
        Self::UnknownMessage { id: id.to_string() }
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        Self::store(format!("HTTP error: {}", err))
    }
}
