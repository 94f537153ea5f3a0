//! # Conversation Controller
//!
//! Owns everything the UI shows for one open conversation: the message
//! timeline, the per-message reaction summaries, the compose box, and the
//! realtime feed attached to it. Mutations apply to local state first and
//! reconcile with the store afterwards, so the interface never waits on a
//! round trip.
//!
//! ## Features
//!
//! - **Optimistic Writes**: Sends, edits, deletes, and reaction toggles
//!   update the timeline before the store answers
//! - **Echo Replacement**: A send's feed echo replaces the optimistic entry
//!   in place, matched by its client tag
//! - **Rollback**: Failed edits and deletes restore the exact pre-mutation
//!   state from a journal; failed sends remove the optimistic entry
//! - **Serialized Mutations**: Durable writes run strictly one at a time in
//!   issue order
//! - **Explicit Feed Lifecycle**: The realtime subscription is attached and
//!   closed by hand, never tied to a view
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use fizikhub_chat::api::{ConversationStore, HttpConversationStore};
//! use fizikhub_chat::config::Config;
//! use fizikhub_chat::conversation::ConversationController;
//! use fizikhub_chat::realtime::SseSubscriber;
//! use uuid::Uuid;
//!
//! # fn main() -> Result<(), fizikhub_chat::config::ConfigError> {
//! let conversation_id = Uuid::new_v4();
//! let current_user = Uuid::new_v4();
//! let config = Config::builder()
//!     .base_url("https://fizikhub.example")
//!     .token("jwt")
//!     .build()?;
//!
//! let store: Arc<dyn ConversationStore> = Arc::new(HttpConversationStore::new(config.clone()));
//! let mut chat = ConversationController::new(store, conversation_id, current_user);
//! chat.hydrate();
//! chat.attach_subscription(SseSubscriber::new(config).subscribe(conversation_id));
//!
//! // every UI frame
//! chat.tick();
//! chat.compose_mut().set_draft("selam hocam");
//! chat.send_message();
//! # Ok(())
//! # }
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::api::ConversationStore;
use crate::shared::error::ChatError;
use crate::shared::event::{Operation, RowEvent, Table};
use crate::shared::messaging::{
    Message, MessageId, MessageRow, MessageType, NewMessage, ReactionBoard, ReactionEntry,
    ReactionSnapshot, ReplyPreview,
};
use crate::realtime::{Subscription, SubscriptionStatus};

use super::compose::ComposeState;
use super::journal::{OperationJournal, Snapshot};
use super::mutation::{Mutation, MutationOutcome, MutationQueue};
use super::scroll::{ScrollCommand, ScrollCoordinator};

/// State engine for one open conversation
pub struct ConversationController {
    conversation_id: Uuid,
    current_user: Uuid,
    store: Arc<dyn ConversationStore>,

    messages: Vec<Message>,
    reactions: ReactionBoard,
    compose: ComposeState,

    mutations: MutationQueue,
    journal: OperationJournal,
    scroll: ScrollCoordinator,
    subscription: Option<Subscription>,

    /// Client tags whose feed echo must be dropped because the optimistic
    /// entry was deleted before confirmation. Kept for the whole session so
    /// a later history load cannot resurrect the row.
    suppressed_tags: HashSet<Uuid>,
    next_local_id: u64,
    hydrated: bool,

    pending_history: Option<Receiver<Result<Vec<MessageRow>, ChatError>>>,
    pending_reactions: Option<Receiver<Result<ReactionSnapshot, ChatError>>>,
    reaction_refresh_requested: bool,
    last_error: Option<ChatError>,
}

impl ConversationController {
    pub fn new(store: Arc<dyn ConversationStore>, conversation_id: Uuid, current_user: Uuid) -> Self {
        Self {
            conversation_id,
            current_user,
            store,
            messages: Vec::new(),
            reactions: ReactionBoard::new(),
            compose: ComposeState::new(),
            mutations: MutationQueue::new(),
            journal: OperationJournal::new(),
            scroll: ScrollCoordinator::new(),
            subscription: None,
            suppressed_tags: HashSet::new(),
            next_local_id: 0,
            hydrated: false,
            pending_history: None,
            pending_reactions: None,
            reaction_refresh_requested: false,
            last_error: None,
        }
    }

    // ===== Frame pump =====

    /// Advance all asynchronous machinery by one step.
    ///
    /// Called once per UI frame. Picks up finished store calls, dispatches
    /// the next queued mutation, drains the realtime feed, installs history
    /// and reaction snapshots that arrived, and settles scroll and read-mark
    /// effects.
    pub fn tick(&mut self) {
        self.poll_mutation_completion();
        self.mutations.pump(&self.store);
        self.drain_subscription();
        self.poll_hydration();
        self.maybe_refresh_reactions();
        self.poll_reaction_refresh();
        self.observe_list();
        self.flush_read_marks();
        self.compose.set_sending(self.mutations.has_outstanding_send());
    }

    // ===== Compose and mutations =====

    /// Send whatever the compose box holds.
    ///
    /// While an edit is active this submits the edit instead. Otherwise an
    /// empty (or whitespace) draft does nothing, and a second send while one
    /// is still unconfirmed is dropped without touching the draft. On
    /// success the optimistic entry's local id is returned, the box is
    /// cleared, and any reply target is consumed.
    pub fn send_message(&mut self) -> Option<MessageId> {
        if let Some(message_id) = self.compose.edit_target() {
            self.submit_edit(message_id);
            return None;
        }

        let content = self.compose.draft().trim().to_string();
        if content.is_empty() {
            return None;
        }
        if self.mutations.has_outstanding_send() {
            tracing::debug!("[CHAT] Send dropped, previous send still unconfirmed");
            return None;
        }

        self.compose.take_draft();
        let reply = self.compose.take_reply_target();
        let client_tag = Uuid::new_v4();
        self.next_local_id += 1;
        let local_id = self.next_local_id;

        self.messages.push(Message::new_local(
            local_id,
            self.conversation_id,
            self.current_user,
            content.clone(),
            reply.clone(),
            client_tag,
        ));
        self.mutations.enqueue(Mutation::Send {
            local_id,
            payload: NewMessage {
                conversation_id: self.conversation_id,
                content,
                message_type: MessageType::Text,
                reply_to_id: reply.map(|preview| preview.id),
                client_tag,
            },
        });
        self.compose.set_sending(true);
        tracing::info!("[CHAT] Optimistic send local-{} queued", local_id);
        Some(MessageId::Local(local_id))
    }

    /// Start composing a reply to a confirmed message
    pub fn begin_reply(&mut self, id: MessageId) -> Result<(), ChatError> {
        let message = self
            .find(id)
            .ok_or_else(|| ChatError::unknown_message(id))?;
        let target_id = message
            .id
            .server_id()
            .ok_or_else(|| ChatError::pending_target(id))?;
        let preview = ReplyPreview {
            id: target_id,
            content: message.content.clone(),
            sender_id: message.sender_id,
        };
        self.compose.begin_reply(preview);
        Ok(())
    }

    /// Start editing one of the current user's confirmed messages. Prefills
    /// the compose box with its content; [`Self::send_message`] submits.
    pub fn begin_edit(&mut self, id: MessageId) -> Result<(), ChatError> {
        let message = self
            .find(id)
            .ok_or_else(|| ChatError::unknown_message(id))?;
        let target_id = message
            .id
            .server_id()
            .ok_or_else(|| ChatError::pending_target(id))?;
        if message.sender_id != self.current_user {
            return Err(ChatError::validation(
                "message_id",
                "only your own messages can be edited",
            ));
        }
        let content = message.content.clone();
        self.compose.begin_edit(target_id, content);
        Ok(())
    }

    /// Delete a message from the timeline immediately.
    ///
    /// A confirmed message is removed, journaled for rollback, and a durable
    /// delete is queued. An unconfirmed local entry is removed and its send
    /// is either cancelled (still queued) or its feed echo suppressed
    /// (already dispatched).
    pub fn delete_message(&mut self, id: MessageId) -> Result<(), ChatError> {
        match id {
            MessageId::Local(local_id) => {
                let index = self
                    .position(id)
                    .ok_or_else(|| ChatError::unknown_message(id))?;
                let message = self.messages.remove(index);
                if self.mutations.cancel_send(local_id) {
                    tracing::info!("[CHAT] Cancelled queued send local-{}", local_id);
                } else if let Some(tag) = message.client_tag {
                    self.suppressed_tags.insert(tag);
                    tracing::info!(
                        "[CHAT] Deleted local-{}; its echo will be suppressed",
                        local_id
                    );
                }
                Ok(())
            }
            MessageId::Server(message_id) => {
                let index = self
                    .position(id)
                    .ok_or_else(|| ChatError::unknown_message(id))?;
                if self.messages[index].sender_id != self.current_user {
                    return Err(ChatError::validation(
                        "message_id",
                        "only your own messages can be deleted",
                    ));
                }
                let message = self.messages.remove(index);
                self.reactions.remove_message(message_id);
                self.drop_compose_targets(message_id);
                let mutation_id = self.mutations.enqueue(Mutation::Delete { message_id });
                self.journal
                    .record(mutation_id, Snapshot::Removed { index, message });
                tracing::info!("[CHAT] Optimistic delete of {}", message_id);
                Ok(())
            }
        }
    }

    /// Toggle the current user's reaction on a confirmed message.
    ///
    /// Applies to the board immediately and queues the durable toggle. The
    /// store never answers with reaction data; the next snapshot refetch is
    /// what settles the board.
    pub fn toggle_reaction(&mut self, id: MessageId, emoji: &str) -> Result<(), ChatError> {
        let message = self
            .find(id)
            .ok_or_else(|| ChatError::unknown_message(id))?;
        let message_id = message
            .id
            .server_id()
            .ok_or_else(|| ChatError::pending_target(id))?;
        self.reactions.toggle(message_id, emoji);
        self.mutations.enqueue(Mutation::React {
            message_id,
            emoji: emoji.to_string(),
        });
        Ok(())
    }

    // ===== Loading =====

    /// Load the conversation's history and reaction snapshot from the store.
    ///
    /// Runs in the background; [`Self::tick`] installs the results when they
    /// arrive. Calling again while a load is outstanding does nothing.
    pub fn hydrate(&mut self) {
        if self.pending_history.is_some() {
            return;
        }
        let (history_tx, history_rx) = mpsc::channel();
        let store = Arc::clone(&self.store);
        let conversation_id = self.conversation_id;
        tokio::spawn(async move {
            let result = store.list_messages(conversation_id).await;
            let _ = history_tx.send(result);
        });
        self.pending_history = Some(history_rx);
        self.reaction_refresh_requested = true;
        tracing::info!("[CHAT] Hydrating conversation {}", conversation_id);
    }

    // ===== Realtime feed =====

    /// Attach the realtime feed for this conversation, closing any previous
    /// one
    pub fn attach_subscription(&mut self, subscription: Subscription) {
        if let Some(mut previous) = self.subscription.replace(subscription) {
            previous.close();
        }
        tracing::info!(
            "[CHAT] Subscription attached for conversation {}",
            self.conversation_id
        );
    }

    /// Tear the realtime feed down
    pub fn close_subscription(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.close();
            tracing::info!("[CHAT] Subscription closed");
        }
    }

    /// Connection state of the attached feed, if one is attached
    pub fn subscription_status(&self) -> Option<&SubscriptionStatus> {
        self.subscription.as_ref().map(Subscription::status)
    }

    /// Apply one feed event to local state.
    ///
    /// Normally called by [`Self::tick`] while draining the attached
    /// subscription; public so embedders with their own transport can push
    /// events directly.
    pub fn apply_event(&mut self, event: &RowEvent) {
        match (event.table, event.operation) {
            (Table::Messages, Operation::Insert) => match event.message_row() {
                Ok(row) => self.ingest_insert(row),
                Err(error) => tracing::warn!("[CHAT] Undecodable message insert: {}", error),
            },
            (Table::Messages, Operation::Update) => match event.message_row() {
                Ok(row) => self.ingest_update(row),
                Err(error) => tracing::warn!("[CHAT] Undecodable message update: {}", error),
            },
            (Table::Messages, Operation::Delete) => match event.row_id() {
                Ok(message_id) => self.ingest_delete(message_id),
                Err(error) => tracing::warn!("[CHAT] Undecodable message delete: {}", error),
            },
            (Table::MessageReactions, Operation::Insert | Operation::Update | Operation::Delete) => {
                if let Ok(row) = event.reaction_row() {
                    tracing::debug!("[CHAT] Reaction change on message {}", row.message_id);
                }
                self.reaction_refresh_requested = true;
            }
            _ => {}
        }
    }

    // ===== Read accessors =====

    /// The timeline, oldest first
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Look a message up by timeline id
    pub fn message(&self, id: MessageId) -> Option<&Message> {
        self.find(id)
    }

    /// Reaction summaries for a message. Unconfirmed local entries never
    /// have any.
    pub fn reactions_for(&self, id: MessageId) -> &[ReactionEntry] {
        match id.server_id() {
            Some(message_id) => self.reactions.entries(message_id),
            None => &[],
        }
    }

    /// Compose box state
    pub fn compose(&self) -> &ComposeState {
        &self.compose
    }

    /// Mutable compose box state (draft editing, reply/edit cancel)
    pub fn compose_mut(&mut self) -> &mut ComposeState {
        &mut self.compose
    }

    /// Whether the initial history load has completed
    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    pub fn conversation_id(&self) -> Uuid {
        self.conversation_id
    }

    pub fn current_user(&self) -> Uuid {
        self.current_user
    }

    /// Take the most recent surfaced failure, if any
    pub fn take_error(&mut self) -> Option<ChatError> {
        self.last_error.take()
    }

    /// Take the pending scroll command for the list view, if any
    pub fn take_scroll_command(&mut self) -> Option<ScrollCommand> {
        self.scroll.take_scroll_command()
    }

    /// Durable writes confirmed or failed so far
    pub fn applied_mutations(&self) -> u64 {
        self.mutations.completed()
    }

    /// Durable writes still queued behind the in-flight one
    pub fn queued_mutations(&self) -> usize {
        self.mutations.queued_len()
    }

    /// Whether no store work is queued, in flight, or being installed
    pub fn is_idle(&self) -> bool {
        self.mutations.is_idle()
            && self.pending_history.is_none()
            && self.pending_reactions.is_none()
            && !self.reaction_refresh_requested
    }

    // ===== Internals =====

    fn submit_edit(&mut self, message_id: Uuid) {
        let content = self.compose.draft().trim().to_string();
        if content.is_empty() {
            return;
        }
        self.compose.take_edit_target();
        self.compose.take_draft();

        let Some(index) = self
            .messages
            .iter()
            .position(|message| message.id.server_id() == Some(message_id))
        else {
            tracing::warn!("[CHAT] Edit target {} vanished before submit", message_id);
            return;
        };

        let previous_content = self.messages[index].content.clone();
        let previous_edited_at = self.messages[index].edited_at;
        let mutation_id = self.mutations.enqueue(Mutation::Edit {
            message_id,
            content: content.clone(),
        });
        self.journal.record(
            mutation_id,
            Snapshot::Edited {
                message_id,
                content: previous_content,
                edited_at: previous_edited_at,
            },
        );
        self.messages[index].content = content;
        self.messages[index].edited_at = Some(Utc::now());
        tracing::info!("[CHAT] Optimistic edit applied to {}", message_id);
    }

    fn poll_mutation_completion(&mut self) {
        let Some(outcome) = self.mutations.poll_completion() else {
            return;
        };
        let MutationOutcome {
            mutation_id,
            mutation,
            result,
        } = outcome;
        match result {
            Ok(()) => {
                self.journal.confirm(mutation_id);
                tracing::debug!(
                    "[CHAT] {} for {} confirmed",
                    mutation.kind(),
                    mutation.entity_key()
                );
            }
            Err(error) => self.handle_mutation_failure(mutation_id, mutation, error),
        }
    }

    fn handle_mutation_failure(&mut self, mutation_id: u64, mutation: Mutation, error: ChatError) {
        let kind = mutation.kind();
        match mutation {
            Mutation::Send { local_id, payload } => {
                self.messages
                    .retain(|message| message.id != MessageId::Local(local_id));
                self.suppressed_tags.remove(&payload.client_tag);
                tracing::warn!("[CHAT] Send local-{} failed: {}", local_id, error);
                self.last_error = Some(error);
            }
            Mutation::Delete { message_id } | Mutation::Edit { message_id, .. } => {
                if let Some(snapshot) = self.journal.rollback(mutation_id) {
                    self.restore_snapshot(snapshot);
                }
                tracing::warn!("[CHAT] {} of {} failed: {}", kind, message_id, error);
                self.last_error = Some(error);
            }
            Mutation::React { message_id, emoji } => {
                // The optimistic toggle stays on screen; the next snapshot
                // refetch settles the board either way
                tracing::warn!(
                    "[CHAT] Reaction toggle {} on {} failed: {}",
                    emoji,
                    message_id,
                    error
                );
            }
        }
    }

    fn restore_snapshot(&mut self, snapshot: Snapshot) {
        match snapshot {
            Snapshot::Removed { index, message } => {
                let index = index.min(self.messages.len());
                self.messages.insert(index, message);
                // Its board entries were dropped with the optimistic delete
                self.reaction_refresh_requested = true;
            }
            Snapshot::Edited {
                message_id,
                content,
                edited_at,
            } => {
                if let Some(message) = self
                    .messages
                    .iter_mut()
                    .find(|message| message.id.server_id() == Some(message_id))
                {
                    message.content = content;
                    message.edited_at = edited_at;
                }
            }
        }
    }

    fn drain_subscription(&mut self) {
        let (events, status) = match &mut self.subscription {
            Some(subscription) => (subscription.poll(), subscription.poll_status()),
            None => return,
        };
        if let Some(status) = status {
            tracing::debug!("[CHAT] Feed status changed: {:?}", status);
        }
        for event in events {
            self.apply_event(&event);
        }
    }

    fn ingest_insert(&mut self, row: MessageRow) {
        if row.conversation_id != self.conversation_id {
            tracing::warn!(
                "[CHAT] Dropping insert for foreign conversation {}",
                row.conversation_id
            );
            return;
        }
        if let Some(tag) = row.client_tag {
            if self.suppressed_tags.contains(&tag) {
                tracing::debug!("[CHAT] Suppressed echo {}", row.id);
                return;
            }
            let pending = self
                .messages
                .iter()
                .position(|message| message.is_pending() && message.client_tag == Some(tag));
            if let Some(index) = pending {
                let reply = self
                    .resolve_reply(row.reply_to_id)
                    .or_else(|| self.messages[index].reply.clone());
                self.messages[index] = Message::from_row(row, reply);
                tracing::debug!("[CHAT] Echo replaced local entry in place");
                return;
            }
        }
        if self
            .messages
            .iter()
            .any(|message| message.id.server_id() == Some(row.id))
        {
            return;
        }
        let reply = self.resolve_reply(row.reply_to_id);
        self.messages.push(Message::from_row(row, reply));
    }

    fn ingest_update(&mut self, row: MessageRow) {
        if row.conversation_id != self.conversation_id {
            tracing::warn!(
                "[CHAT] Dropping update for foreign conversation {}",
                row.conversation_id
            );
            return;
        }
        if let Some(message) = self
            .messages
            .iter_mut()
            .find(|message| message.id.server_id() == Some(row.id))
        {
            message.content = row.content;
            message.edited_at = row.edited_at;
        }
    }

    fn ingest_delete(&mut self, message_id: Uuid) {
        self.messages
            .retain(|message| message.id.server_id() != Some(message_id));
        self.reactions.remove_message(message_id);
        // A confirmed delete outranks any pending local restore
        self.journal.discard_for_message(message_id);
        self.drop_compose_targets(message_id);
    }

    fn drop_compose_targets(&mut self, message_id: Uuid) {
        if self.compose.edit_target() == Some(message_id) {
            self.compose.cancel_edit();
        }
        if self
            .compose
            .reply_target()
            .map(|preview| preview.id == message_id)
            .unwrap_or(false)
        {
            self.compose.cancel_reply();
        }
    }

    fn resolve_reply(&self, reply_to_id: Option<Uuid>) -> Option<ReplyPreview> {
        let target_id = reply_to_id?;
        let target = self
            .messages
            .iter()
            .find(|message| message.id.server_id() == Some(target_id))?;
        Some(ReplyPreview {
            id: target_id,
            content: target.content.clone(),
            sender_id: target.sender_id,
        })
    }

    fn poll_hydration(&mut self) {
        let Some(receiver) = &self.pending_history else {
            return;
        };
        match receiver.try_recv() {
            Ok(Ok(rows)) => {
                self.pending_history = None;
                self.install_history(rows);
            }
            Ok(Err(error)) => {
                self.pending_history = None;
                tracing::warn!("[CHAT] History load failed: {}", error);
                self.last_error = Some(error);
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.pending_history = None;
                self.last_error = Some(ChatError::store("history task dropped without a result"));
            }
        }
    }

    fn install_history(&mut self, mut rows: Vec<MessageRow>) {
        rows.sort_by_key(|row| row.created_at);

        let previews: HashMap<Uuid, (String, Uuid)> = rows
            .iter()
            .map(|row| (row.id, (row.content.clone(), row.sender_id)))
            .collect();

        let pending: Vec<Message> = {
            let drained = std::mem::take(&mut self.messages);
            drained.into_iter().filter(Message::is_pending).collect()
        };

        let mut list: Vec<Message> = Vec::with_capacity(rows.len() + pending.len());
        for row in rows {
            if let Some(tag) = row.client_tag {
                if self.suppressed_tags.contains(&tag) {
                    continue;
                }
            }
            let reply = row.reply_to_id.and_then(|target_id| {
                previews.get(&target_id).map(|(content, sender_id)| ReplyPreview {
                    id: target_id,
                    content: content.clone(),
                    sender_id: *sender_id,
                })
            });
            list.push(Message::from_row(row, reply));
        }

        // Still-unconfirmed sends stay at the tail unless the history
        // already holds their echo
        for message in pending {
            let confirmed = message
                .client_tag
                .map(|tag| list.iter().any(|entry| entry.client_tag == Some(tag)))
                .unwrap_or(false);
            if !confirmed {
                list.push(message);
            }
        }

        self.messages = list;
        if !self.hydrated {
            self.hydrated = true;
            self.scroll.note_hydrated(self.messages.len());
        }
        tracing::info!("[CHAT] Loaded {} messages", self.messages.len());
    }

    fn maybe_refresh_reactions(&mut self) {
        if !self.reaction_refresh_requested || self.pending_reactions.is_some() {
            return;
        }
        self.reaction_refresh_requested = false;
        let (snapshot_tx, snapshot_rx) = mpsc::channel();
        let store = Arc::clone(&self.store);
        let conversation_id = self.conversation_id;
        tokio::spawn(async move {
            let result = store.reactions(conversation_id).await;
            let _ = snapshot_tx.send(result);
        });
        self.pending_reactions = Some(snapshot_rx);
        tracing::debug!("[CHAT] Refreshing reaction snapshot");
    }

    fn poll_reaction_refresh(&mut self) {
        let Some(receiver) = &self.pending_reactions else {
            return;
        };
        match receiver.try_recv() {
            Ok(Ok(snapshot)) => {
                self.pending_reactions = None;
                self.reactions.replace_all(snapshot);
            }
            Ok(Err(error)) => {
                // The board keeps its optimistic state until a later
                // refetch succeeds
                self.pending_reactions = None;
                tracing::warn!("[CHAT] Reaction snapshot load failed: {}", error);
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.pending_reactions = None;
                tracing::warn!("[CHAT] Reaction snapshot task dropped without a result");
            }
        }
    }

    fn observe_list(&mut self) {
        let newest_sender = self.messages.last().map(|message| message.sender_id);
        self.scroll
            .observe(self.messages.len(), newest_sender, self.current_user);
    }

    fn flush_read_marks(&mut self) {
        let due = self.scroll.take_due_read_marks();
        for _ in 0..due {
            let store = Arc::clone(&self.store);
            let conversation_id = self.conversation_id;
            tokio::spawn(async move {
                if let Err(error) = store.mark_as_read(conversation_id).await {
                    tracing::warn!("[CHAT] Mark-as-read failed: {}", error);
                }
            });
        }
    }

    fn find(&self, id: MessageId) -> Option<&Message> {
        self.messages.iter().find(|message| message.id == id)
    }

    fn position(&self, id: MessageId) -> Option<usize> {
        self.messages.iter().position(|message| message.id == id)
    }
}
