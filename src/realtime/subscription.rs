//! Realtime Subscription Handle
//!
//! A [`Subscription`] is the controller-facing end of one conversation's
//! realtime feed. It owns the feed's lifecycle explicitly: it is opened by
//! whoever creates it, polled non-blockingly from `tick()`, and torn down
//! deterministically with [`Subscription::close`] (or on drop). Nothing here
//! is tied to any view lifecycle.
//!
//! The producing side is either the live SSE task or a [`FeedHandle`], the
//! paired injector used by tests and embedders to push events and status
//! transitions by hand.

use std::sync::mpsc::{self, Receiver, Sender};

use crate::shared::event::RowEvent;

/// Connection state reported by the feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionStatus {
    Connecting,
    Connected,
    Retrying,
    Error(String),
    Disconnected,
}

/// Receiving end of a conversation's realtime feed
#[derive(Debug)]
pub struct Subscription {
    event_receiver: Option<Receiver<RowEvent>>,
    status_receiver: Option<Receiver<SubscriptionStatus>>,
    status: SubscriptionStatus,
    task: Option<tokio::task::JoinHandle<()>>,
}

impl Subscription {
    /// Build a subscription from its channel halves and, for live feeds,
    /// the transport task to abort on close
    pub(crate) fn from_parts(
        event_receiver: Receiver<RowEvent>,
        status_receiver: Receiver<SubscriptionStatus>,
        task: Option<tokio::task::JoinHandle<()>>,
    ) -> Self {
        Self {
            event_receiver: Some(event_receiver),
            status_receiver: Some(status_receiver),
            status: SubscriptionStatus::Connecting,
            task,
        }
    }

    /// Create a manually driven subscription and its injector.
    ///
    /// Events pushed through the returned [`FeedHandle`] show up in
    /// [`Subscription::poll`] in push order.
    pub fn channel() -> (FeedHandle, Subscription) {
        let (event_tx, event_rx) = mpsc::channel();
        let (status_tx, status_rx) = mpsc::channel();
        let handle = FeedHandle {
            event_sender: event_tx,
            status_sender: status_tx,
        };
        (handle, Subscription::from_parts(event_rx, status_rx, None))
    }

    /// Drain buffered events (non-blocking)
    pub fn poll(&mut self) -> Vec<RowEvent> {
        let mut events = Vec::new();
        if let Some(receiver) = &self.event_receiver {
            while let Ok(event) = receiver.try_recv() {
                events.push(event);
            }
        }
        events
    }

    /// Drain buffered status updates and return the newest, if any.
    ///
    /// The newest update also becomes the value reported by
    /// [`Subscription::status`].
    pub fn poll_status(&mut self) -> Option<SubscriptionStatus> {
        let mut latest = None;
        if let Some(receiver) = &self.status_receiver {
            while let Ok(status) = receiver.try_recv() {
                latest = Some(status);
            }
        }
        if let Some(status) = &latest {
            self.status = status.clone();
        }
        latest
    }

    /// Last known connection state
    pub fn status(&self) -> &SubscriptionStatus {
        &self.status
    }

    /// Tear the feed down.
    ///
    /// Aborts the transport task if one is attached and drops the channel
    /// receivers, so any later push from the producing side fails instead of
    /// buffering. Safe to call more than once.
    pub fn close(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.event_receiver = None;
        self.status_receiver = None;
        self.status = SubscriptionStatus::Disconnected;
    }

    /// Whether `close()` has run
    pub fn is_closed(&self) -> bool {
        self.event_receiver.is_none()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.close();
    }
}

/// Producer half for a manually driven subscription.
///
/// Cloneable; pushes fail (returning `false`) once the paired subscription
/// is closed.
#[derive(Debug, Clone)]
pub struct FeedHandle {
    event_sender: Sender<RowEvent>,
    status_sender: Sender<SubscriptionStatus>,
}

impl FeedHandle {
    /// Push an event into the feed. Returns `false` if the subscription is
    /// closed.
    pub fn push(&self, event: RowEvent) -> bool {
        self.event_sender.send(event).is_ok()
    }

    /// Report a connection state transition. Returns `false` if the
    /// subscription is closed.
    pub fn set_status(&self, status: SubscriptionStatus) -> bool {
        self.status_sender.send(status).is_ok()
    }
}
