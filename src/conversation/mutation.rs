//! # Serialized Mutation Queue
//!
//! Every durable write leaves the controller through this queue: mutations
//! are enqueued in the order the user issued them and dispatched strictly
//! one at a time, so the order in which store calls run (and complete) is
//! deterministic and observable rather than an accident of callback timing.
//!
//! The dispatcher spawns the store call onto the ambient tokio runtime and
//! parks its result in a channel; [`MutationQueue::poll_completion`] picks
//! it up without blocking, which is what lets the controller stay a plain
//! `&mut self` state machine.

use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::ConversationStore;
use crate::shared::error::ChatError;
use crate::shared::messaging::NewMessage;

/// One durable write waiting for (or undergoing) dispatch
#[derive(Debug, Clone)]
pub enum Mutation {
    /// Insert a new message row
    Send { local_id: u64, payload: NewMessage },
    /// Delete a message row
    Delete { message_id: Uuid },
    /// Replace a message row's content
    Edit { message_id: Uuid, content: String },
    /// Toggle the current user's reaction row
    React { message_id: Uuid, emoji: String },
}

impl Mutation {
    /// Short operation name for trace lines
    pub fn kind(&self) -> &'static str {
        match self {
            Mutation::Send { .. } => "send",
            Mutation::Delete { .. } => "delete",
            Mutation::Edit { .. } => "edit",
            Mutation::React { .. } => "react",
        }
    }

    /// Key of the entity the mutation touches, for trace lines
    pub fn entity_key(&self) -> String {
        match self {
            Mutation::Send { local_id, .. } => format!("local-{}", local_id),
            Mutation::Delete { message_id } => message_id.to_string(),
            Mutation::Edit { message_id, .. } => message_id.to_string(),
            Mutation::React { message_id, .. } => message_id.to_string(),
        }
    }
}

/// Completed mutation handed back to the controller
#[derive(Debug)]
pub struct MutationOutcome {
    /// Id assigned at enqueue time
    pub mutation_id: u64,
    /// The mutation that ran
    pub mutation: Mutation,
    /// What the store said
    pub result: Result<(), ChatError>,
}

#[derive(Debug)]
struct InFlight {
    mutation_id: u64,
    mutation: Mutation,
    receiver: Receiver<Result<(), ChatError>>,
}

/// FIFO queue of durable writes with a one-at-a-time dispatcher
#[derive(Debug, Default)]
pub struct MutationQueue {
    queue: VecDeque<(u64, Mutation)>,
    in_flight: Option<InFlight>,
    next_id: u64,
    completed: u64,
}

impl MutationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mutation to the back of the queue and return its id
    pub fn enqueue(&mut self, mutation: Mutation) -> u64 {
        self.next_id += 1;
        let mutation_id = self.next_id;
        tracing::debug!(
            "[CHAT] Queued {} for {} (mutation {})",
            mutation.kind(),
            mutation.entity_key(),
            mutation_id
        );
        self.queue.push_back((mutation_id, mutation));
        mutation_id
    }

    /// Dispatch the next queued mutation if none is in flight
    pub fn pump(&mut self, store: &Arc<dyn ConversationStore>) {
        if self.in_flight.is_some() {
            return;
        }
        let Some((mutation_id, mutation)) = self.queue.pop_front() else {
            return;
        };

        let (tx, rx) = mpsc::channel();
        let store = Arc::clone(store);
        let job = mutation.clone();
        tokio::spawn(async move {
            let result = dispatch(store, job).await;
            let _ = tx.send(result);
        });

        self.in_flight = Some(InFlight {
            mutation_id,
            mutation,
            receiver: rx,
        });
    }

    /// Non-blocking check for the in-flight mutation's result
    pub fn poll_completion(&mut self) -> Option<MutationOutcome> {
        let result = match &self.in_flight {
            Some(in_flight) => match in_flight.receiver.try_recv() {
                Ok(result) => result,
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Disconnected) => {
                    Err(ChatError::store("store task dropped without a result"))
                }
            },
            None => return None,
        };

        let InFlight {
            mutation_id,
            mutation,
            ..
        } = self.in_flight.take()?;
        self.completed += 1;
        Some(MutationOutcome {
            mutation_id,
            mutation,
            result,
        })
    }

    /// Remove a queued (not yet dispatched) send for a local message.
    /// Returns whether anything was removed.
    pub fn cancel_send(&mut self, local_id: u64) -> bool {
        let before = self.queue.len();
        self.queue.retain(|(_, mutation)| {
            !matches!(mutation, Mutation::Send { local_id: queued, .. } if *queued == local_id)
        });
        self.queue.len() != before
    }

    /// Whether any send is queued or in flight
    pub fn has_outstanding_send(&self) -> bool {
        let queued = self
            .queue
            .iter()
            .any(|(_, mutation)| matches!(mutation, Mutation::Send { .. }));
        let in_flight = matches!(
            &self.in_flight,
            Some(InFlight {
                mutation: Mutation::Send { .. },
                ..
            })
        );
        queued || in_flight
    }

    /// Mutation currently being executed, if any
    pub fn in_flight(&self) -> Option<&Mutation> {
        self.in_flight.as_ref().map(|in_flight| &in_flight.mutation)
    }

    /// Number of mutations waiting behind the in-flight one
    pub fn queued_len(&self) -> usize {
        self.queue.len()
    }

    /// Whether nothing is queued or in flight
    pub fn is_idle(&self) -> bool {
        self.in_flight.is_none() && self.queue.is_empty()
    }

    /// Total mutations completed since creation
    pub fn completed(&self) -> u64 {
        self.completed
    }
}

async fn dispatch(store: Arc<dyn ConversationStore>, mutation: Mutation) -> Result<(), ChatError> {
    match mutation {
        Mutation::Send { payload, .. } => store.send_message(payload).await,
        Mutation::Delete { message_id } => store.delete_message(message_id).await,
        Mutation::Edit {
            message_id,
            content,
        } => store.edit_message(message_id, content).await,
        Mutation::React { message_id, emoji } => store.react_to_message(message_id, emoji).await,
    }
}
