use crate::models::Reaction;
use crate::store::ChatStore;

impl ChatStore {
    // The reaction is appended verbatim; `count` is not reconciled with the
    // user list.
    pub fn add_reaction(&mut self, message_id: &str, reaction: Reaction) {
        if let Some(message) = self.messages.iter_mut().find(|m| m.id == message_id) {
            message
                .reactions
                .get_or_insert_with(Vec::new)
                .push(reaction);
        }
    }

    pub fn remove_reaction(&mut self, message_id: &str, emoji: &str, user_id: &str) {
        if let Some(message) = self.messages.iter_mut().find(|m| m.id == message_id) {
            if let Some(reactions) = message.reactions.as_mut() {
                for reaction in reactions.iter_mut() {
                    if reaction.emoji == emoji {
                        reaction.users.retain(|u| u != user_id);
                        // Counts are caller-supplied and may already sit at
                        // i64::MIN; saturate instead of wrapping.
                        reaction.count = reaction.count.saturating_sub(1);
                    }
                }
                // A reaction whose count reaches zero disappears entirely.
                reactions.retain(|r| r.count > 0);
            }
        }
    }
}
