//! SSE Feed Transport
//!
//! This module implements the live realtime feed over Server-Sent Events.
//! Each `data:` line carries one JSON [`RowEvent`]; the transport task
//! forwards decoded events into the paired [`Subscription`] and reports
//! connection state through the same handle.
//!
//! Reconnects use exponential backoff starting at one second and capped at
//! thirty, reset after every successful connect. A clean end of stream stops
//! the task; a transport error retries.

use futures_util::StreamExt;
use reqwest::Client;
use std::sync::mpsc::{self, Sender};
use std::time::Duration;
use uuid::Uuid;

use crate::config::Config;
use crate::shared::event::RowEvent;

use super::subscription::{Subscription, SubscriptionStatus};

const INITIAL_RECONNECT_DELAY: Duration = Duration::from_millis(1000);
const MAX_RECONNECT_DELAY: Duration = Duration::from_secs(30);

/// Live feed transport over SSE
#[derive(Debug, Clone)]
pub struct SseSubscriber {
    config: Config,
}

impl SseSubscriber {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Open the feed for a conversation.
    ///
    /// Spawns the transport task on the ambient tokio runtime; the returned
    /// subscription aborts it on `close()`.
    pub fn subscribe(&self, conversation_id: Uuid) -> Subscription {
        let (event_tx, event_rx) = mpsc::channel();
        let (status_tx, status_rx) = mpsc::channel();
        let config = self.config.clone();

        let task = tokio::spawn(async move {
            run_feed_loop(config, conversation_id, event_tx, status_tx).await;
        });

        Subscription::from_parts(event_rx, status_rx, Some(task))
    }
}

/// Connect-read-reconnect loop for one conversation's feed
async fn run_feed_loop(
    config: Config,
    conversation_id: Uuid,
    event_sender: Sender<RowEvent>,
    status_sender: Sender<SubscriptionStatus>,
) {
    let client = Client::new();
    let mut reconnect_delay = INITIAL_RECONNECT_DELAY;

    loop {
        let url = config.feed_url(conversation_id);

        let Some(token) = config.get_token().cloned() else {
            tracing::error!("[FEED] No authentication token available");
            let _ = status_sender.send(SubscriptionStatus::Error(
                "not authenticated".to_string(),
            ));
            let _ = status_sender.send(SubscriptionStatus::Disconnected);
            return;
        };

        tracing::info!("[FEED] Subscribing to SSE: {}", url);
        let _ = status_sender.send(SubscriptionStatus::Connecting);

        let response = match client
            .get(&url)
            .header("Accept", "text/event-stream")
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!("[FEED] Failed to open feed (will retry): {}", e);
                let _ = status_sender.send(SubscriptionStatus::Error(format!("network: {}", e)));
                let _ = status_sender.send(SubscriptionStatus::Retrying);
                tokio::time::sleep(reconnect_delay).await;
                reconnect_delay = std::cmp::min(reconnect_delay * 2, MAX_RECONNECT_DELAY);
                continue;
            }
        };

        if !response.status().is_success() {
            tracing::error!(
                "[FEED] Feed request failed with status: {} (will retry)",
                response.status()
            );
            let _ = status_sender.send(SubscriptionStatus::Error(format!(
                "http: {}",
                response.status()
            )));
            let _ = status_sender.send(SubscriptionStatus::Retrying);
            tokio::time::sleep(reconnect_delay).await;
            reconnect_delay = std::cmp::min(reconnect_delay * 2, MAX_RECONNECT_DELAY);
            continue;
        }

        tracing::info!(
            "[FEED] SSE feed established for conversation {}",
            conversation_id
        );
        let _ = status_sender.send(SubscriptionStatus::Connected);

        // Reset reconnect delay on successful connection
        reconnect_delay = INITIAL_RECONNECT_DELAY;

        let mut stream = response.bytes_stream();
        let mut buffer = String::new();
        let mut connection_active = true;

        while let Some(chunk_result) = stream.next().await {
            match chunk_result {
                Ok(chunk) => {
                    let chunk_str = match std::str::from_utf8(&chunk) {
                        Ok(s) => s,
                        Err(e) => {
                            tracing::error!("[FEED] Invalid UTF-8 in SSE stream: {}", e);
                            connection_active = false;
                            break;
                        }
                    };

                    buffer.push_str(chunk_str);

                    // Process complete lines
                    while let Some(newline_pos) = buffer.find('\n') {
                        let line = buffer[..newline_pos].trim_end_matches('\r').to_string();
                        buffer = buffer[newline_pos + 1..].to_string();

                        // Skip empty lines and comments
                        if line.is_empty() || line.starts_with(':') {
                            continue;
                        }

                        let payload = if let Some(data) = line.strip_prefix("data: ") {
                            data
                        } else if line.starts_with('{') && line.ends_with('}') {
                            // Some proxies strip the SSE framing and forward
                            // bare JSON lines
                            line.as_str()
                        } else {
                            continue;
                        };

                        match serde_json::from_str::<RowEvent>(payload) {
                            Ok(event) => {
                                tracing::debug!(
                                    "[FEED] Received {:?} on {:?}",
                                    event.operation,
                                    event.table
                                );
                                if event_sender.send(event).is_err() {
                                    // Subscription closed underneath us
                                    return;
                                }
                            }
                            Err(e) => {
                                tracing::warn!(
                                    "[FEED] Failed to parse feed payload: {} | {}",
                                    e,
                                    payload
                                );
                            }
                        }
                    }
                }
                Err(e) => {
                    tracing::error!("[FEED] Error reading from SSE stream: {}", e);
                    let _ = status_sender.send(SubscriptionStatus::Error(format!("stream: {}", e)));
                    connection_active = false;
                    break;
                }
            }
        }

        if connection_active {
            tracing::info!(
                "[FEED] Feed closed normally for conversation {}",
                conversation_id
            );
            let _ = status_sender.send(SubscriptionStatus::Disconnected);
            break;
        } else {
            tracing::warn!(
                "[FEED] Feed connection lost for conversation {}, will reconnect",
                conversation_id
            );
            let _ = status_sender.send(SubscriptionStatus::Retrying);
            tokio::time::sleep(reconnect_delay).await;
            reconnect_delay = std::cmp::min(reconnect_delay * 2, MAX_RECONNECT_DELAY);
        }
    }
}
