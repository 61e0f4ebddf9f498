use crate::models::{Message, MessagePatch, MessageStatus};
use crate::store::ChatStore;

impl ChatStore {
    // Ids are not checked for uniqueness; duplicates are accepted silently.
    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn update_message(&mut self, id: &str, patch: MessagePatch) {
        if let Some(message) = self.messages.iter_mut().find(|m| m.id == id) {
            if let Some(content) = patch.content {
                message.content = content;
            }
            if let Some(status) = patch.status {
                message.status = status;
            }
            if let Some(timestamp) = patch.timestamp {
                message.timestamp = timestamp;
            }
            if let Some(attachments) = patch.attachments {
                message.attachments = Some(attachments);
            }
            if let Some(thread_id) = patch.thread_id {
                message.thread_id = Some(thread_id);
            }
            if let Some(reactions) = patch.reactions {
                message.reactions = Some(reactions);
            }
            if let Some(error) = patch.error {
                message.error = Some(error);
            }
        }
    }

    pub fn update_message_status(&mut self, id: &str, status: MessageStatus) {
        self.update_message(
            id,
            MessagePatch {
                status: Some(status),
                ..MessagePatch::default()
            },
        );
    }

    pub fn message(&self, id: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }
}
