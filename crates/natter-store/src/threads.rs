//! Thread operations.

use chrono::Utc;
use uuid::Uuid;

use crate::models::{Message, Thread, ThreadPatch};
use crate::store::ChatStore;

impl ChatStore {
    /// Open a new thread under a parent message and return its generated
    /// id.
    ///
    /// The parent id is stored as given and never checked against the
    /// message list.
    pub fn create_thread(&mut self, message_id: &str, title: &str) -> String {
        let now = Utc::now();
        let thread = Thread {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            message_id: message_id.to_string(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
            participants: Vec::new(),
        };

        let id = thread.id.clone();
        self.threads.push(thread);
        id
    }

    /// Append a message to a thread and refresh its update timestamp.
    pub fn add_message_to_thread(&mut self, thread_id: &str, message: Message) {
        if let Some(thread) = self.thread_mut(thread_id) {
            thread.messages.push(message);
            thread.updated_at = Utc::now();
        }
    }

    /// Merge a patch into a thread.  The update timestamp refreshes
    /// whenever the thread exists, patch content or not.
    pub fn update_thread(&mut self, thread_id: &str, patch: ThreadPatch) {
        if let Some(thread) = self.thread_mut(thread_id) {
            if let Some(title) = patch.title {
                thread.title = title;
            }
            if let Some(participants) = patch.participants {
                thread.participants = participants;
            }
            thread.updated_at = Utc::now();
        }
    }

    /// Remove every thread with the given id.
    pub fn delete_thread(&mut self, thread_id: &str) {
        self.threads.retain(|t| t.id != thread_id);
    }

    /// Fetch a thread by id (first match).
    pub fn thread(&self, id: &str) -> Option<&Thread> {
        self.threads.iter().find(|t| t.id == id)
    }

    fn thread_mut(&mut self, id: &str) -> Option<&mut Thread> {
        self.threads.iter_mut().find(|t| t.id == id)
    }
}
