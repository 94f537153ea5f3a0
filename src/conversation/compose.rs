//! Compose-Area State
//!
//! Ephemeral input state for the message box: the draft text, at most one
//! reply target, at most one edit target, and the send-in-flight flag.
//! None of this is persisted.
//!
//! Reply and edit are mutually exclusive: beginning one clears the other.
//! Beginning an edit stashes the draft that was being typed and prefills the
//! box with the message's current content; cancelling the edit brings the
//! stashed draft back.

use uuid::Uuid;

use crate::shared::messaging::ReplyPreview;

#[derive(Debug, Clone)]
struct EditInProgress {
    message_id: Uuid,
    stashed_draft: String,
}

/// State of the message input box
#[derive(Debug, Clone, Default)]
pub struct ComposeState {
    draft: String,
    reply_target: Option<ReplyPreview>,
    edit_target: Option<EditInProgress>,
    sending: bool,
}

impl ComposeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current input text
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replace the input text
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Take the input text, leaving the box empty
    pub fn take_draft(&mut self) -> String {
        std::mem::take(&mut self.draft)
    }

    /// Start composing a reply. Clears any edit in progress (restoring the
    /// draft stashed when it began).
    pub fn begin_reply(&mut self, target: ReplyPreview) {
        if self.edit_target.is_some() {
            self.cancel_edit();
        }
        self.reply_target = Some(target);
    }

    /// Start editing a message. Clears any reply target, stashes the current
    /// draft, and prefills the box with the message's content.
    pub fn begin_edit(&mut self, message_id: Uuid, current_content: impl Into<String>) {
        self.reply_target = None;
        let stashed_draft = std::mem::take(&mut self.draft);
        self.draft = current_content.into();
        self.edit_target = Some(EditInProgress {
            message_id,
            stashed_draft,
        });
    }

    /// Message currently targeted by a reply
    pub fn reply_target(&self) -> Option<&ReplyPreview> {
        self.reply_target.as_ref()
    }

    /// Message currently being edited
    pub fn edit_target(&self) -> Option<Uuid> {
        self.edit_target.as_ref().map(|edit| edit.message_id)
    }

    /// Take and clear the reply target (consumed by a send)
    pub fn take_reply_target(&mut self) -> Option<ReplyPreview> {
        self.reply_target.take()
    }

    /// Clear the edit target without restoring the stashed draft (consumed
    /// by an edit submission)
    pub fn take_edit_target(&mut self) -> Option<Uuid> {
        self.edit_target.take().map(|edit| edit.message_id)
    }

    /// Abandon the reply
    pub fn cancel_reply(&mut self) {
        self.reply_target = None;
    }

    /// Abandon the edit and bring the stashed draft back
    pub fn cancel_edit(&mut self) {
        if let Some(edit) = self.edit_target.take() {
            self.draft = edit.stashed_draft;
        }
    }

    /// Whether a send is outstanding
    pub fn is_sending(&self) -> bool {
        self.sending
    }

    pub(crate) fn set_sending(&mut self, sending: bool) {
        self.sending = sending;
    }
}
