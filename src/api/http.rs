//! HTTP Store Accessor
//!
//! This module implements [`ConversationStore`] against the Fizikhub HTTP
//! API: JSON bodies, bearer auth, and `{success, ...}` response envelopes.
//!
//! Error mapping: transport failures become [`ChatError::Store`], 4xx
//! statuses and `success: false` envelopes become [`ChatError::Rejected`].

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use uuid::Uuid;

use crate::config::Config;
use crate::shared::error::ChatError;
use crate::shared::messaging::{
    AckResponse, Conversation, ListConversationsResponse, ListMessagesResponse,
    ListReactionsResponse, MessageRow, NewMessage, ReactionSnapshot, SendMessageResponse,
};

use super::store::ConversationStore;

/// Body for an edit call
#[derive(Debug, Serialize)]
struct EditMessageRequest {
    content: String,
}

/// Body for a reaction toggle call
#[derive(Debug, Serialize)]
struct ReactRequest {
    emoji: String,
}

/// HTTP implementation of the store contract
pub struct HttpConversationStore {
    config: Config,
    client: Client,
}

impl HttpConversationStore {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn bearer_token(&self) -> Result<&String, ChatError> {
        self.config
            .get_token()
            .ok_or_else(|| ChatError::rejected("not authenticated"))
    }

    /// Turn a non-success status into the matching error, keeping the
    /// response body as the message when the store sent one
    async fn fail_for_status(response: Response) -> Result<Response, ChatError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| status.to_string());
        if status.is_client_error() {
            Err(ChatError::rejected(format!("{}: {}", status, error_text)))
        } else {
            Err(ChatError::store(format!("{}: {}", status, error_text)))
        }
    }

    /// Decode a `{success}` envelope and map `success: false` to a rejection
    async fn read_ack(response: Response) -> Result<(), ChatError> {
        let ack = Self::fail_for_status(response)
            .await?
            .json::<AckResponse>()
            .await?;
        if ack.success {
            Ok(())
        } else {
            Err(ChatError::rejected(
                ack.error.unwrap_or_else(|| "operation refused".to_string()),
            ))
        }
    }
}

#[async_trait]
impl ConversationStore for HttpConversationStore {
    async fn send_message(&self, message: NewMessage) -> Result<(), ChatError> {
        let url = self.config.api_url("/api/chat/messages");
        let token = self.bearer_token()?;

        tracing::debug!(
            "[STORE] Sending message: conversation={}, tag={}",
            message.conversation_id,
            message.client_tag
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", token))
            .json(&message)
            .send()
            .await?;

        let envelope = Self::fail_for_status(response)
            .await?
            .json::<SendMessageResponse>()
            .await?;
        if envelope.success {
            Ok(())
        } else {
            Err(ChatError::rejected(
                envelope
                    .error
                    .unwrap_or_else(|| "send refused".to_string()),
            ))
        }
    }

    async fn delete_message(&self, message_id: Uuid) -> Result<(), ChatError> {
        let url = self
            .config
            .api_url(&format!("/api/chat/messages/{}", message_id));
        let token = self.bearer_token()?;

        let response = self
            .client
            .delete(&url)
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await?;

        Self::read_ack(response).await
    }

    async fn edit_message(&self, message_id: Uuid, content: String) -> Result<(), ChatError> {
        let url = self
            .config
            .api_url(&format!("/api/chat/messages/{}", message_id));
        let token = self.bearer_token()?;

        let response = self
            .client
            .patch(&url)
            .header("Authorization", format!("Bearer {}", token))
            .json(&EditMessageRequest { content })
            .send()
            .await?;

        Self::read_ack(response).await
    }

    async fn react_to_message(&self, message_id: Uuid, emoji: String) -> Result<(), ChatError> {
        let url = self
            .config
            .api_url(&format!("/api/chat/messages/{}/reactions", message_id));
        let token = self.bearer_token()?;

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", token))
            .json(&ReactRequest { emoji })
            .send()
            .await?;

        // The reaction endpoint answers with an empty body
        Self::fail_for_status(response).await?;
        Ok(())
    }

    async fn reactions(&self, conversation_id: Uuid) -> Result<ReactionSnapshot, ChatError> {
        let url = self
            .config
            .api_url(&format!("/api/chat/conversations/{}/reactions", conversation_id));
        let token = self.bearer_token()?;

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await?;

        let list = Self::fail_for_status(response)
            .await?
            .json::<ListReactionsResponse>()
            .await?;
        Ok(list.reactions)
    }

    async fn mark_as_read(&self, conversation_id: Uuid) -> Result<(), ChatError> {
        let url = self
            .config
            .api_url(&format!("/api/chat/conversations/{}/read", conversation_id));
        let token = self.bearer_token()?;

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await?;

        // The read-mark endpoint answers with an empty body
        Self::fail_for_status(response).await?;
        Ok(())
    }

    async fn list_messages(&self, conversation_id: Uuid) -> Result<Vec<MessageRow>, ChatError> {
        let url = self
            .config
            .api_url(&format!("/api/chat/conversations/{}/messages", conversation_id));
        let token = self.bearer_token()?;

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await?;

        let list = Self::fail_for_status(response)
            .await?
            .json::<ListMessagesResponse>()
            .await?;
        Ok(list.messages)
    }

    async fn list_conversations(&self) -> Result<Vec<Conversation>, ChatError> {
        let url = self.config.api_url("/api/chat/conversations");
        let token = self.bearer_token()?;

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await?;

        let list = Self::fail_for_status(response)
            .await?
            .json::<ListConversationsResponse>()
            .await?;
        Ok(list.conversations)
    }
}
