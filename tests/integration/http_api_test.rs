//! HTTP store accessor tests
//!
//! Exercises [`HttpConversationStore`] against a mock backend: auth headers,
//! request shapes, envelope decoding, and error mapping.

use assert_matches::assert_matches;
use fizikhub_chat::api::{ConversationStore, HttpConversationStore};
use fizikhub_chat::config::Config;
use fizikhub_chat::shared::error::ChatError;
use fizikhub_chat::shared::messaging::{Conversation, ListMessagesResponse, MessageType, NewMessage};
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::fixtures::message_row;

fn store_for(server: &MockServer) -> HttpConversationStore {
    let config = Config::builder()
        .base_url(server.uri())
        .token("test-token")
        .build()
        .unwrap();
    HttpConversationStore::new(config)
}

fn new_message(conversation_id: Uuid, content: &str) -> NewMessage {
    NewMessage {
        conversation_id,
        content: content.to_string(),
        message_type: MessageType::Text,
        reply_to_id: None,
        client_tag: Uuid::new_v4(),
    }
}

#[tokio::test]
async fn test_send_message_posts_tagged_payload() {
    let server = MockServer::start().await;
    let message = new_message(Uuid::new_v4(), "merhaba");

    Mock::given(method("POST"))
        .and(path("/api/chat/messages"))
        .and(header("Authorization", "Bearer test-token"))
        .and(body_partial_json(json!({
            "content": "merhaba",
            "client_tag": message.client_tag,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": null,
            "error": null,
        })))
        .expect(1)
        .mount(&server)
        .await;

    store_for(&server).send_message(message).await.unwrap();
}

#[tokio::test]
async fn test_send_refusal_envelope_maps_to_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": null,
            "error": "konusma kapatildi",
        })))
        .mount(&server)
        .await;

    let error = store_for(&server)
        .send_message(new_message(Uuid::new_v4(), "selam"))
        .await
        .unwrap_err();
    assert_matches!(error, ChatError::Rejected { message } if message.contains("konusma kapatildi"));
}

#[tokio::test]
async fn test_server_error_maps_to_store_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat/messages"))
        .respond_with(ResponseTemplate::new(500).set_body_string("patladi"))
        .mount(&server)
        .await;

    let error = store_for(&server)
        .send_message(new_message(Uuid::new_v4(), "selam"))
        .await
        .unwrap_err();
    assert_matches!(error, ChatError::Store { message } if message.contains("500"));
}

#[tokio::test]
async fn test_client_error_maps_to_rejected() {
    let server = MockServer::start().await;
    let message_id = Uuid::new_v4();
    Mock::given(method("DELETE"))
        .and(path(format!("/api/chat/messages/{}", message_id)))
        .respond_with(ResponseTemplate::new(403).set_body_string("senin degil"))
        .mount(&server)
        .await;

    let error = store_for(&server)
        .delete_message(message_id)
        .await
        .unwrap_err();
    assert_matches!(error, ChatError::Rejected { message } if message.contains("senin degil"));
}

#[tokio::test]
async fn test_missing_token_short_circuits_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let config = Config::builder().base_url(server.uri()).build().unwrap();
    let store = HttpConversationStore::new(config);
    let error = store
        .send_message(new_message(Uuid::new_v4(), "selam"))
        .await
        .unwrap_err();
    assert_matches!(error, ChatError::Rejected { .. });
    server.verify().await;
}

#[tokio::test]
async fn test_delete_reads_ack_envelope() {
    let server = MockServer::start().await;
    let message_id = Uuid::new_v4();
    Mock::given(method("DELETE"))
        .and(path(format!("/api/chat/messages/{}", message_id)))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    store_for(&server).delete_message(message_id).await.unwrap();
}

#[tokio::test]
async fn test_false_ack_maps_to_rejected() {
    let server = MockServer::start().await;
    let message_id = Uuid::new_v4();
    Mock::given(method("DELETE"))
        .and(path(format!("/api/chat/messages/{}", message_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "mesaj bulunamadi",
        })))
        .mount(&server)
        .await;

    let error = store_for(&server)
        .delete_message(message_id)
        .await
        .unwrap_err();
    assert_matches!(error, ChatError::Rejected { message } if message.contains("mesaj bulunamadi"));
}

#[tokio::test]
async fn test_edit_patches_new_content() {
    let server = MockServer::start().await;
    let message_id = Uuid::new_v4();
    Mock::given(method("PATCH"))
        .and(path(format!("/api/chat/messages/{}", message_id)))
        .and(body_partial_json(json!({ "content": "duzeltilmis" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    store_for(&server)
        .edit_message(message_id, "duzeltilmis".to_string())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_react_accepts_empty_response_body() {
    let server = MockServer::start().await;
    let message_id = Uuid::new_v4();
    Mock::given(method("POST"))
        .and(path(format!("/api/chat/messages/{}/reactions", message_id)))
        .and(body_partial_json(json!({ "emoji": "🔥" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    store_for(&server)
        .react_to_message(message_id, "🔥".to_string())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_reactions_query_parses_snapshot() {
    let server = MockServer::start().await;
    let conversation_id = Uuid::new_v4();
    let message_id = Uuid::new_v4();
    Mock::given(method("GET"))
        .and(path(format!(
            "/api/chat/conversations/{}/reactions",
            conversation_id
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "reactions": {
                message_id.to_string(): [
                    { "emoji": "🔥", "count": 2, "reacted_by_me": true },
                    { "emoji": "😂", "count": 1, "reacted_by_me": false },
                ],
            },
        })))
        .mount(&server)
        .await;

    let snapshot = store_for(&server).reactions(conversation_id).await.unwrap();
    let entries = &snapshot[&message_id];
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].emoji, "🔥");
    assert_eq!(entries[0].count, 2);
    assert!(entries[0].reacted_by_me);
}

#[tokio::test]
async fn test_mark_read_posts_empty_body() {
    let server = MockServer::start().await;
    let conversation_id = Uuid::new_v4();
    Mock::given(method("POST"))
        .and(path(format!("/api/chat/conversations/{}/read", conversation_id)))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    store_for(&server).mark_as_read(conversation_id).await.unwrap();
}

#[tokio::test]
async fn test_list_messages_parses_rows() {
    let server = MockServer::start().await;
    let conversation_id = Uuid::new_v4();
    let row = message_row(conversation_id, Uuid::new_v4(), "tarihce");
    Mock::given(method("GET"))
        .and(path(format!(
            "/api/chat/conversations/{}/messages",
            conversation_id
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(&ListMessagesResponse {
            messages: vec![row.clone()],
        }))
        .mount(&server)
        .await;

    let rows = store_for(&server).list_messages(conversation_id).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, row.id);
    assert_eq!(rows[0].content, "tarihce");
}

#[tokio::test]
async fn test_list_conversations_parses_rows() {
    let server = MockServer::start().await;
    let conversation = Conversation::new_direct(Uuid::new_v4(), Uuid::new_v4());
    Mock::given(method("GET"))
        .and(path("/api/chat/conversations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "conversations": [conversation],
        })))
        .mount(&server)
        .await;

    let conversations = store_for(&server).list_conversations().await.unwrap();
    assert_eq!(conversations.len(), 1);
    assert_eq!(conversations[0].id, conversation.id);
}
