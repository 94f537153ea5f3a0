//! Realtime Feed Layer
//!
//! Row-change events reach the controller through a [`Subscription`] handle
//! with an explicit open/poll/close lifecycle. Production opens one through
//! [`SseSubscriber`]; tests and embedders drive one by hand through the
//! paired [`FeedHandle`].

pub mod sse;
pub mod subscription;

pub use sse::SseSubscriber;
pub use subscription::{FeedHandle, Subscription, SubscriptionStatus};
