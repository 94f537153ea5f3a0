//! End-to-end conversation flows
//!
//! Drives a controller against [`InMemoryStore`] with its feed wired to the
//! controller's subscription, so every optimistic write is followed by the
//! same echo the hosted store would produce.

use std::sync::Arc;

use fizikhub_chat::conversation::{ConversationController, ScrollCommand};
use fizikhub_chat::realtime::Subscription;
use fizikhub_chat::shared::messaging::MessageId;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use crate::common::fixtures::{drive, init_tracing, message_row, reaction_row};
use crate::common::memory_store::InMemoryStore;

struct Harness {
    chat: ConversationController,
    store: Arc<InMemoryStore>,
    conversation_id: Uuid,
    current_user: Uuid,
    other_user: Uuid,
}

/// Controller wired to an echoing store
fn harness() -> Harness {
    init_tracing();
    let conversation_id = Uuid::new_v4();
    let current_user = Uuid::new_v4();
    let store = Arc::new(InMemoryStore::new(current_user));

    let (handle, subscription) = Subscription::channel();
    store.attach_feed(handle);

    let mut chat = ConversationController::new(store.clone(), conversation_id, current_user);
    chat.attach_subscription(subscription);

    Harness {
        chat,
        store,
        conversation_id,
        current_user,
        other_user: Uuid::new_v4(),
    }
}

#[tokio::test]
async fn test_send_settles_into_confirmed_entry() {
    let mut h = harness();
    h.chat.compose_mut().set_draft("selam");
    let local = h.chat.send_message().unwrap();
    assert!(local.is_local());

    drive(&mut h.chat, |chat| {
        chat.messages().len() == 1 && chat.messages()[0].id.is_server()
    })
    .await;

    assert_eq!(h.chat.messages().len(), 1);
    assert_eq!(h.chat.messages()[0].content, "selam");
    assert_eq!(h.chat.messages()[0].sender_id, h.current_user);
    assert_eq!(h.store.row_count(), 1);
    assert!(!h.chat.compose().is_sending());
}

#[tokio::test]
async fn test_consecutive_sends_confirm_in_order() {
    let mut h = harness();
    h.chat.compose_mut().set_draft("bir");
    h.chat.send_message().unwrap();
    drive(&mut h.chat, |chat| {
        chat.messages().iter().all(|message| message.id.is_server())
    })
    .await;

    h.chat.compose_mut().set_draft("iki");
    h.chat.send_message().unwrap();
    drive(&mut h.chat, |chat| {
        chat.messages().len() == 2 && chat.messages().iter().all(|m| m.id.is_server())
    })
    .await;

    let contents: Vec<&str> = h
        .chat
        .messages()
        .iter()
        .map(|message| message.content.as_str())
        .collect();
    assert_eq!(contents, vec!["bir", "iki"]);
    assert_eq!(h.store.row_count(), 2);
}

#[tokio::test]
async fn test_edit_round_trip_keeps_new_content() {
    let mut h = harness();
    h.chat.compose_mut().set_draft("once boyleydi");
    h.chat.send_message().unwrap();
    drive(&mut h.chat, |chat| {
        chat.messages().first().is_some_and(|m| m.id.is_server())
    })
    .await;
    let id = h.chat.messages()[0].id;

    h.chat.begin_edit(id).unwrap();
    h.chat.compose_mut().set_draft("sonra boyle oldu");
    h.chat.send_message();
    assert_eq!(h.chat.messages()[0].content, "sonra boyle oldu");

    // The store confirms and the feed update lands without disturbing it
    drive(&mut h.chat, |chat| chat.is_idle()).await;
    assert_eq!(h.chat.messages()[0].content, "sonra boyle oldu");
    assert!(h.chat.messages()[0].edited_at.is_some());
    assert_eq!(h.chat.messages().len(), 1);
}

#[tokio::test]
async fn test_delete_round_trip_stays_deleted() {
    let mut h = harness();
    h.chat.compose_mut().set_draft("silinecek");
    h.chat.send_message().unwrap();
    drive(&mut h.chat, |chat| {
        chat.messages().first().is_some_and(|m| m.id.is_server())
    })
    .await;
    let id = h.chat.messages()[0].id;

    h.chat.delete_message(id).unwrap();
    assert!(h.chat.messages().is_empty());

    drive(&mut h.chat, |chat| chat.is_idle()).await;
    assert!(h.chat.messages().is_empty());
    assert_eq!(h.store.row_count(), 0);
    assert!(h.chat.take_error().is_none());
}

#[tokio::test]
async fn test_deleted_local_never_resurrects() {
    init_tracing();
    let conversation_id = Uuid::new_v4();
    let current_user = Uuid::new_v4();
    let store = Arc::new(InMemoryStore::new(current_user));

    // Feed events buffer in the unattached subscription until later
    let (handle, subscription) = Subscription::channel();
    store.attach_feed(handle);
    let mut chat = ConversationController::new(store.clone(), conversation_id, current_user);

    chat.compose_mut().set_draft("gonderip sildim");
    let local = chat.send_message().unwrap();
    drive(&mut chat, |chat| chat.applied_mutations() == 1).await;
    assert_eq!(store.row_count(), 1);

    // The echo is already buffered; deleting now must suppress it
    chat.delete_message(local).unwrap();
    chat.attach_subscription(subscription);
    drive(&mut chat, |chat| chat.is_idle()).await;
    assert!(chat.messages().is_empty());

    // A later history load cannot bring it back either
    chat.hydrate();
    drive(&mut chat, |chat| chat.is_hydrated()).await;
    assert!(chat.messages().is_empty());
}

#[tokio::test]
async fn test_reaction_toggle_off_settles_empty() {
    let mut h = harness();
    let row = message_row(h.conversation_id, h.other_user, "begenilen");
    h.store.seed_message(row.clone());
    h.store
        .seed_reaction(reaction_row(row.id, h.current_user, "🔥"));

    h.chat.hydrate();
    drive(&mut h.chat, |chat| chat.is_hydrated()).await;
    let id = MessageId::Server(row.id);
    drive(&mut h.chat, |chat| !chat.reactions_for(id).is_empty()).await;
    assert!(h.chat.reactions_for(id)[0].reacted_by_me);

    // Optimistic removal shows immediately
    h.chat.toggle_reaction(id, "🔥").unwrap();
    assert!(h.chat.reactions_for(id).is_empty());

    // The store deletes the row, the feed event triggers a refetch, and
    // the authoritative snapshot agrees
    drive(&mut h.chat, |chat| chat.is_idle()).await;
    assert!(h.chat.reactions_for(id).is_empty());
    assert_eq!(h.store.reaction_count(), 0);
}

#[tokio::test]
async fn test_reaction_toggle_on_settles_on_authoritative_count() {
    let mut h = harness();
    let row = message_row(h.conversation_id, h.other_user, "mesaj");
    h.store.seed_message(row.clone());
    h.store
        .seed_reaction(reaction_row(row.id, h.other_user, "👍"));

    h.chat.hydrate();
    let id = MessageId::Server(row.id);
    drive(&mut h.chat, |chat| {
        chat.reactions_for(id).first().is_some_and(|e| e.count == 1)
    })
    .await;

    h.chat.toggle_reaction(id, "👍").unwrap();
    assert_eq!(h.chat.reactions_for(id)[0].count, 2);
    assert!(h.chat.reactions_for(id)[0].reacted_by_me);

    drive(&mut h.chat, |chat| chat.is_idle()).await;
    let entries = h.chat.reactions_for(id);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].count, 2);
    assert!(entries[0].reacted_by_me);
    assert_eq!(h.store.reaction_count(), 2);
}

#[tokio::test]
async fn test_incoming_message_owes_read_mark_without_scroll() {
    let mut h = harness();
    h.chat.hydrate();
    drive(&mut h.chat, |chat| chat.is_hydrated()).await;
    h.chat.take_scroll_command();
    // Hydration owes exactly one mark
    drive(&mut h.chat, |_| h.store.read_marks() == 1).await;

    let incoming = message_row(h.conversation_id, h.other_user, "yeni soru");
    h.store.deliver(incoming);
    drive(&mut h.chat, |chat| chat.messages().len() == 1).await;

    // Another participant's message marks as read but does not scroll
    assert_eq!(h.chat.take_scroll_command(), None);
    drive(&mut h.chat, |_| h.store.read_marks() == 2).await;
}

#[tokio::test]
async fn test_own_send_scrolls_to_bottom() {
    let mut h = harness();
    h.chat.hydrate();
    drive(&mut h.chat, |chat| chat.is_hydrated()).await;
    assert_eq!(
        h.chat.take_scroll_command(),
        Some(ScrollCommand::JumpToBottom)
    );

    h.chat.compose_mut().set_draft("en alta in");
    h.chat.send_message().unwrap();
    h.chat.tick();
    assert_eq!(
        h.chat.take_scroll_command(),
        Some(ScrollCommand::AnimateToBottom)
    );
}

#[tokio::test]
async fn test_hydration_orders_seeded_history() {
    let mut h = harness();
    let mut first = message_row(h.conversation_id, h.other_user, "en eski");
    first.created_at = chrono::Utc::now() - chrono::Duration::hours(2);
    let mut second = message_row(h.conversation_id, h.current_user, "ortanca");
    second.created_at = chrono::Utc::now() - chrono::Duration::hours(1);
    let third = message_row(h.conversation_id, h.other_user, "en yeni");

    // Seed out of order on purpose
    h.store.seed_message(third.clone());
    h.store.seed_message(first.clone());
    h.store.seed_message(second.clone());

    h.chat.hydrate();
    drive(&mut h.chat, |chat| chat.is_hydrated()).await;

    let ids: Vec<MessageId> = h.chat.messages().iter().map(|m| m.id).collect();
    assert_eq!(
        ids,
        vec![
            MessageId::Server(first.id),
            MessageId::Server(second.id),
            MessageId::Server(third.id),
        ]
    );
}

#[tokio::test]
async fn test_reply_preview_travels_through_store() {
    let mut h = harness();
    let target = message_row(h.conversation_id, h.other_user, "asil soru");
    h.store.seed_message(target.clone());
    h.chat.hydrate();
    drive(&mut h.chat, |chat| chat.is_hydrated()).await;

    h.chat.begin_reply(MessageId::Server(target.id)).unwrap();
    h.chat.compose_mut().set_draft("iste cevap");
    h.chat.send_message().unwrap();

    drive(&mut h.chat, |chat| {
        chat.messages().len() == 2 && chat.messages()[1].id.is_server()
    })
    .await;

    let reply = h.chat.messages()[1].reply.as_ref().unwrap();
    assert_eq!(reply.id, target.id);
    assert_eq!(reply.content, "asil soru");
    assert_eq!(reply.sender_id, h.other_user);
}
