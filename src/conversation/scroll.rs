//! Scroll and read-state coordination for the message list.
//!
//! The coordinator watches the message count from frame to frame and turns
//! changes into UI-facing effects: a scroll command for the list view and a
//! counted number of read marks owed to the store. It never touches the
//! list itself.

use uuid::Uuid;

/// How the list view should move on the next frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollCommand {
    /// Snap to the newest message without animation
    JumpToBottom,
    /// Smoothly scroll to the newest message
    AnimateToBottom,
}

/// Turns message-count changes into scroll commands and read marks
#[derive(Debug, Default)]
pub struct ScrollCoordinator {
    last_count: Option<usize>,
    command: Option<ScrollCommand>,
    due_read_marks: u32,
}

impl ScrollCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that history finished loading: snap to the bottom and owe
    /// exactly one read mark, regardless of how many rows arrived.
    pub fn note_hydrated(&mut self, count: usize) {
        self.last_count = Some(count);
        self.command = Some(ScrollCommand::JumpToBottom);
        self.due_read_marks += 1;
    }

    /// Compare the current list against the last observed frame.
    ///
    /// The first call after construction only sets the baseline. Afterwards
    /// every count change owes a read mark, and growth whose newest message
    /// belongs to `current_user` also queues an animated scroll. An
    /// unchanged count (covering in-place echo replacement) does nothing.
    pub fn observe(&mut self, count: usize, newest_sender: Option<Uuid>, current_user: Uuid) {
        let Some(previous) = self.last_count else {
            self.last_count = Some(count);
            return;
        };
        if count == previous {
            return;
        }

        self.due_read_marks += 1;
        if count > previous && newest_sender == Some(current_user) {
            self.push_command(ScrollCommand::AnimateToBottom);
        }
        self.last_count = Some(count);
    }

    /// Take the pending scroll command, if any
    pub fn take_scroll_command(&mut self) -> Option<ScrollCommand> {
        self.command.take()
    }

    /// Take the number of read marks owed since the last call
    pub fn take_due_read_marks(&mut self) -> u32 {
        std::mem::take(&mut self.due_read_marks)
    }

    fn push_command(&mut self, command: ScrollCommand) {
        // A pending jump outranks an animation queued in the same frame
        match (self.command, command) {
            (Some(ScrollCommand::JumpToBottom), ScrollCommand::AnimateToBottom) => {}
            _ => self.command = Some(command),
        }
    }
}
