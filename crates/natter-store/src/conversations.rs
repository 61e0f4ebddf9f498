//! Conversation operations and the derived recent-conversations view.

use chrono::Utc;

use crate::models::{Conversation, ConversationPriority, ConversationStatus};
use crate::store::ChatStore;

/// How many conversations the recent view returns.
pub const RECENT_CONVERSATION_LIMIT: usize = 2;

impl ChatStore {
    // ------------------------------------------------------------------
    // Membership
    // ------------------------------------------------------------------

    /// Append a conversation to the collection.
    pub fn add_conversation(&mut self, conversation: Conversation) {
        self.conversations.push(conversation);
    }

    /// Remove every conversation with the given id, preserving the
    /// relative order of the survivors.
    pub fn delete_conversation(&mut self, id: &str) {
        self.conversations.retain(|c| c.id != id);
    }

    // ------------------------------------------------------------------
    // Field updates
    // ------------------------------------------------------------------

    /// Set the lifecycle status.
    pub fn update_conversation_status(&mut self, id: &str, status: ConversationStatus) {
        if let Some(conversation) = self.conversation_mut(id) {
            conversation.status = status;
        }
    }

    /// Set the triage priority.
    pub fn update_conversation_priority(&mut self, id: &str, priority: ConversationPriority) {
        if let Some(conversation) = self.conversation_mut(id) {
            conversation.priority = priority;
        }
    }

    /// Rename the conversation.
    pub fn update_conversation_title(&mut self, id: &str, title: &str) {
        if let Some(conversation) = self.conversation_mut(id) {
            conversation.title = title.to_string();
        }
    }

    /// Assign the conversation to an agent.
    pub fn assign_conversation(&mut self, id: &str, assignee: &str) {
        if let Some(conversation) = self.conversation_mut(id) {
            conversation.assignee = Some(assignee.to_string());
        }
    }

    /// Add a tag.  Adding a tag the conversation already carries is a
    /// no-op.
    pub fn add_tag_to_conversation(&mut self, id: &str, tag: &str) {
        if let Some(conversation) = self.conversation_mut(id) {
            let tags = conversation.tags.get_or_insert_with(Vec::new);
            if !tags.iter().any(|t| t == tag) {
                tags.push(tag.to_string());
            }
        }
    }

    /// Remove every occurrence of a tag.
    pub fn remove_tag_from_conversation(&mut self, id: &str, tag: &str) {
        if let Some(conversation) = self.conversation_mut(id) {
            if let Some(tags) = conversation.tags.as_mut() {
                tags.retain(|t| t != tag);
            }
        }
    }

    // ------------------------------------------------------------------
    // Read state
    // ------------------------------------------------------------------

    /// Clear the unread flag and decrement the badge count, floored at
    /// zero.
    ///
    /// The counter adjusts even when the id is unknown; it is tracked
    /// independently of the per-conversation flags.
    pub fn mark_conversation_as_read(&mut self, id: &str) {
        if let Some(conversation) = self.conversation_mut(id) {
            conversation.unread = false;
        }
        self.unread_count = self.unread_count.saturating_sub(1);
        self.last_read_timestamp = Some(Utc::now());
    }

    /// Set the unread flag and increment the badge count
    /// unconditionally.
    pub fn mark_conversation_as_unread(&mut self, id: &str) {
        if let Some(conversation) = self.conversation_mut(id) {
            conversation.unread = true;
        }
        self.unread_count = self.unread_count.saturating_add(1);
    }

    // ------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------

    /// The most recently active conversations, newest first.
    ///
    /// Derived from the full list on every call, so it cannot drift from
    /// its source: sorted descending by timestamp (stable, so ties keep
    /// insertion order) and cut to [`RECENT_CONVERSATION_LIMIT`].  With
    /// fewer conversations than the limit, all of them are returned.
    pub fn recent_conversations(&self) -> Vec<&Conversation> {
        let mut recent: Vec<&Conversation> = self.conversations.iter().collect();
        recent.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        recent.truncate(RECENT_CONVERSATION_LIMIT);
        recent
    }

    /// Fetch a conversation by id (first match).
    pub fn conversation(&self, id: &str) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == id)
    }

    fn conversation_mut(&mut self, id: &str) -> Option<&mut Conversation> {
        self.conversations.iter_mut().find(|c| c.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn conversation(id: &str, timestamp: DateTime<Utc>) -> Conversation {
        Conversation {
            id: id.to_string(),
            title: format!("Conversation {id}"),
            last_message: String::new(),
            timestamp,
            unread: false,
            messages: Vec::new(),
            status: ConversationStatus::Active,
            priority: ConversationPriority::default(),
            assignee: None,
            tags: None,
        }
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn delete_removes_every_match_and_keeps_order() {
        let mut store = ChatStore::new();
        store.add_conversation(conversation("c-1", at(1)));
        store.add_conversation(conversation("c-2", at(2)));
        store.add_conversation(conversation("c-1", at(3)));
        store.add_conversation(conversation("c-3", at(4)));

        store.delete_conversation("c-1");

        let ids: Vec<&str> = store.conversations.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c-2", "c-3"]);
    }

    #[test]
    fn recent_is_top_two_by_descending_timestamp() {
        let mut store = ChatStore::new();
        store.add_conversation(conversation("old", at(1)));
        store.add_conversation(conversation("newest", at(9)));
        store.add_conversation(conversation("middle", at(5)));

        let recent = store.recent_conversations();
        let ids: Vec<&str> = recent.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["newest", "middle"]);
    }

    #[test]
    fn recent_keeps_insertion_order_on_ties() {
        let mut store = ChatStore::new();
        store.add_conversation(conversation("first", at(3)));
        store.add_conversation(conversation("second", at(3)));
        store.add_conversation(conversation("third", at(3)));

        let recent = store.recent_conversations();
        let ids: Vec<&str> = recent.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second"]);
    }

    #[test]
    fn recent_returns_all_when_fewer_than_limit() {
        let mut store = ChatStore::new();
        assert!(store.recent_conversations().is_empty());

        store.add_conversation(conversation("only", at(1)));
        let recent = store.recent_conversations();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].id, "only");
    }

    #[test]
    fn recent_tracks_every_mutation() {
        let mut store = ChatStore::new();
        store.add_conversation(conversation("a", at(1)));
        store.add_conversation(conversation("b", at(2)));
        store.add_conversation(conversation("c", at(3)));

        store.delete_conversation("c");

        let ids: Vec<&str> = store
            .recent_conversations()
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn field_updates_touch_only_the_target() {
        let mut store = ChatStore::new();
        store.add_conversation(conversation("c-1", at(1)));
        store.add_conversation(conversation("c-2", at(2)));

        store.update_conversation_status("c-1", ConversationStatus::Archived);
        store.update_conversation_priority("c-1", ConversationPriority::Urgent);
        store.update_conversation_title("c-1", "Escalated");
        store.assign_conversation("c-1", "agent-7");

        let touched = store.conversation("c-1").unwrap();
        assert_eq!(touched.status, ConversationStatus::Archived);
        assert_eq!(touched.priority, ConversationPriority::Urgent);
        assert_eq!(touched.title, "Escalated");
        assert_eq!(touched.assignee.as_deref(), Some("agent-7"));

        let untouched = store.conversation("c-2").unwrap();
        assert_eq!(untouched.status, ConversationStatus::Active);
        assert_eq!(untouched.priority, ConversationPriority::Medium);
        assert_eq!(untouched.title, "Conversation c-2");
        assert!(untouched.assignee.is_none());
    }

    #[test]
    fn deleted_is_a_status_not_a_removal() {
        let mut store = ChatStore::new();
        store.add_conversation(conversation("c-1", at(1)));

        store.update_conversation_status("c-1", ConversationStatus::Deleted);

        assert_eq!(store.conversations.len(), 1);
        assert_eq!(
            store.conversation("c-1").unwrap().status,
            ConversationStatus::Deleted
        );
    }

    #[test]
    fn tag_add_is_idempotent() {
        let mut store = ChatStore::new();
        store.add_conversation(conversation("c-1", at(1)));

        store.add_tag_to_conversation("c-1", "billing");
        store.add_tag_to_conversation("c-1", "billing");
        store.add_tag_to_conversation("c-1", "refund");

        let tags = store.conversation("c-1").unwrap().tags.as_ref().unwrap();
        assert_eq!(tags, &vec!["billing".to_string(), "refund".to_string()]);

        store.remove_tag_from_conversation("c-1", "billing");
        let tags = store.conversation("c-1").unwrap().tags.as_ref().unwrap();
        assert_eq!(tags, &vec!["refund".to_string()]);
    }

    #[test]
    fn mark_read_floors_the_badge_at_zero() {
        let mut store = ChatStore::new();
        store.add_conversation(conversation("c-1", at(1)));
        store.unread_count = 1;

        store.mark_conversation_as_read("c-1");
        store.mark_conversation_as_read("c-1");
        store.mark_conversation_as_read("c-1");

        assert_eq!(store.unread_count, 0);
        assert!(!store.conversation("c-1").unwrap().unread);
        assert!(store.last_read_timestamp.is_some());
    }

    #[test]
    fn badge_count_is_independent_of_the_flags() {
        let mut store = ChatStore::new();
        store.add_conversation(conversation("c-1", at(1)));

        // Counter moves even when the id matches nothing.
        store.mark_conversation_as_unread("ghost");
        assert_eq!(store.unread_count, 1);
        assert!(!store.conversation("c-1").unwrap().unread);

        store.mark_conversation_as_read("ghost");
        assert_eq!(store.unread_count, 0);
    }

    #[test]
    fn mark_unread_sets_flag_and_increments() {
        let mut store = ChatStore::new();
        store.add_conversation(conversation("c-1", at(1)));

        store.mark_conversation_as_unread("c-1");
        store.mark_conversation_as_unread("c-1");

        assert_eq!(store.unread_count, 2);
        assert!(store.conversation("c-1").unwrap().unread);
    }
}
