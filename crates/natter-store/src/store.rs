//! The [`ChatStore`] state container.
//!
//! One value of [`ChatStore`] holds every piece of chat state for a single
//! user session.  All operations are synchronous, run to completion without
//! suspension, and perform no I/O; persistence is layered on top by
//! [`crate::session::ChatSession`].

use chrono::{DateTime, Utc};

use crate::models::{Conversation, Message, Thread};

/// Central chat state for one user session.
///
/// Construct with [`ChatStore::new`] and pass by reference, or hand it to a
/// [`crate::session::ChatSession`]; the crate deliberately provides no
/// global instance.
///
/// Mutators that look up a record by id and find nothing are silent no-ops,
/// not errors.  The store performs no field validation either; that is the
/// caller's responsibility.
#[derive(Debug, Clone)]
pub struct ChatStore {
    /// Whether the widget panel is open.
    pub is_open: bool,

    /// Current free-text search input.
    pub search_query: String,

    /// Caller-owned error banner text.  Callers set and clear it; the store
    /// itself never writes this field.
    pub error: Option<String>,

    /// Top-level message list (the active transcript).
    pub messages: Vec<Message>,

    /// Every known conversation, in insertion order.
    pub conversations: Vec<Conversation>,

    /// Threaded side-discussions.
    pub threads: Vec<Thread>,

    /// Id of the conversation currently on screen, if any.  Stored as
    /// given and not checked against the conversation list.
    pub active_conversation: Option<String>,

    /// When the user last marked a conversation as read.
    pub last_read_timestamp: Option<DateTime<Utc>>,

    /// Running unread badge count.  Tracked independently of the
    /// per-conversation `unread` flags; the two are never reconciled.
    pub unread_count: u32,
}

impl ChatStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            is_open: false,
            search_query: String::new(),
            error: None,
            messages: Vec::new(),
            conversations: Vec::new(),
            threads: Vec::new(),
            active_conversation: None,
            last_read_timestamp: None,
            unread_count: 0,
        }
    }

    /// Restore the initial empty configuration (sign-out / demo-reset).
    pub fn reset(&mut self) {
        tracing::debug!("resetting chat state");
        *self = Self::new();
    }

    /// Open or close the widget panel.
    pub fn set_open(&mut self, open: bool) {
        self.is_open = open;
    }

    /// Replace the search input.
    pub fn set_search_query(&mut self, query: &str) {
        self.search_query = query.to_string();
    }

    /// Set or clear the caller-owned error banner.
    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    /// Point the view at a conversation.
    pub fn set_active_conversation(&mut self, id: Option<String>) {
        self.active_conversation = id;
    }
}

impl Default for ChatStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_store_is_empty() {
        let store = ChatStore::new();
        assert!(!store.is_open);
        assert!(store.search_query.is_empty());
        assert!(store.error.is_none());
        assert!(store.messages.is_empty());
        assert!(store.conversations.is_empty());
        assert!(store.threads.is_empty());
        assert!(store.active_conversation.is_none());
        assert!(store.last_read_timestamp.is_none());
        assert_eq!(store.unread_count, 0);
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut store = ChatStore::new();
        store.set_open(true);
        store.set_search_query("refund");
        store.set_error(Some("backend unreachable".to_string()));
        store.set_active_conversation(Some("c-1".to_string()));
        store.unread_count = 7;

        store.reset();

        assert!(!store.is_open);
        assert!(store.search_query.is_empty());
        assert!(store.error.is_none());
        assert!(store.active_conversation.is_none());
        assert_eq!(store.unread_count, 0);
    }

    #[test]
    fn error_is_caller_owned() {
        let mut store = ChatStore::new();
        store.set_error(Some("timeout".to_string()));
        assert_eq!(store.error.as_deref(), Some("timeout"));

        store.set_error(None);
        assert!(store.error.is_none());
    }
}
