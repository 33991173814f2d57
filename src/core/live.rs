//! Live chat monitor state: the polled conversation list, the selected
//! conversation's message history, and the staleness guards.
//!
//! Polling ticks are independent requests with no cancellation, so two can be
//! in flight at once. Every list response carries the sequence number stamped
//! when its request was spawned; a response only applies if its seq is newer
//! than the last applied one. Conversation loads use a selection epoch the
//! same way, so a slow fetch for a previously selected user is dropped.

use crate::api::{ConversationSummary, Message};

#[derive(Debug, Default)]
pub struct LiveState {
    /// Full replacement copy of the latest accepted list response.
    pub conversations: Vec<ConversationSummary>,
    pub selected_user_id: Option<String>,
    /// Message history of the selected conversation.
    pub messages: Vec<Message>,
    /// Seq of the last applied list response.
    last_list_seq: u64,
    /// Bumped on every selection; stale message loads are dropped.
    selection_epoch: u64,
}

impl LiveState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection_epoch(&self) -> u64 {
        self.selection_epoch
    }

    /// Replaces the conversation list if this response is newer than the last
    /// applied one. Returns false for stale responses.
    pub fn apply_conversations(&mut self, seq: u64, conversations: Vec<ConversationSummary>) -> bool {
        if seq <= self.last_list_seq && self.last_list_seq != 0 {
            return false;
        }
        self.last_list_seq = seq;
        self.conversations = conversations;
        true
    }

    /// Selects a conversation and bumps the epoch. Returns the new epoch for
    /// the fetch that the caller is about to spawn.
    pub fn select(&mut self, user_id: String) -> u64 {
        self.selected_user_id = Some(user_id);
        self.messages.clear();
        self.selection_epoch += 1;
        self.selection_epoch
    }

    /// Replaces the message history if the response belongs to the current
    /// selection. Returns false if the selection has moved on since.
    pub fn apply_messages(&mut self, epoch: u64, messages: Vec<Message>) -> bool {
        if epoch != self.selection_epoch {
            return false;
        }
        self.messages = messages;
        true
    }
}
