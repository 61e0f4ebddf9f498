//! The persisted snapshot and its on-disk store.
//!
//! A deliberately narrow subset of [`ChatStore`] state is mirrored to a
//! single JSON document so a reload restores conversation history without
//! restoring transient UI state.  The document is overwritten on every
//! save; it is not an append log.  On load, an absent or malformed
//! document falls back to the built-in initial state — that path is
//! mandatory and never panics.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::models::{flexible_timestamp, Conversation, Message, Thread};
use crate::store::ChatStore;

/// The serialized subset of store state that survives a reload.
///
/// Field names match the storage document: `conversations`,
/// `recentConversations`, `threads`, `messages`, `activeConversation`,
/// `lastReadTimestamp`, `unreadCount`.  All instants are written as RFC
/// 3339 text.  Transient UI state (panel open flag, search input, error
/// banner) is excluded by design.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub conversations: Vec<Conversation>,
    /// The derived recent view at capture time.  Written for compatibility
    /// with the storage document; ignored on load, since the view is
    /// rederived from `conversations` on read.
    pub recent_conversations: Vec<Conversation>,
    pub threads: Vec<Thread>,
    pub messages: Vec<Message>,
    pub active_conversation: Option<String>,
    #[serde(default, with = "flexible_timestamp::option")]
    pub last_read_timestamp: Option<DateTime<Utc>>,
    pub unread_count: u32,
}

impl Snapshot {
    /// Capture the mirrored fields from a store.
    pub fn capture(store: &ChatStore) -> Self {
        Self {
            conversations: store.conversations.clone(),
            recent_conversations: store
                .recent_conversations()
                .into_iter()
                .cloned()
                .collect(),
            threads: store.threads.clone(),
            messages: store.messages.clone(),
            active_conversation: store.active_conversation.clone(),
            last_read_timestamp: store.last_read_timestamp,
            unread_count: store.unread_count,
        }
    }

    /// Build a store from the snapshot.  Transient UI state starts at its
    /// defaults.
    pub fn into_store(self) -> ChatStore {
        let mut store = ChatStore::new();
        store.conversations = self.conversations;
        store.threads = self.threads;
        store.messages = self.messages;
        store.active_conversation = self.active_conversation;
        store.last_read_timestamp = self.last_read_timestamp;
        store.unread_count = self.unread_count;
        store
    }
}

/// On-disk home of the snapshot document.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Open the default snapshot store.
    ///
    /// The document is placed in the platform-appropriate data directory:
    /// - Linux:   `~/.local/share/natter/chat-storage.json`
    /// - macOS:   `~/Library/Application Support/com.natter.natter/chat-storage.json`
    /// - Windows: `{FOLDERID_RoamingAppData}\natter\natter\data\chat-storage.json`
    pub fn open_default() -> Result<Self> {
        Self::from_config(&StoreConfig::from_env())
    }

    /// Open the snapshot store described by a configuration.
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        let data_dir = match &config.data_dir {
            Some(dir) => dir.clone(),
            None => ProjectDirs::from("com", "natter", "natter")
                .ok_or(StoreError::NoDataDir)?
                .data_dir()
                .to_path_buf(),
        };
        std::fs::create_dir_all(&data_dir)?;

        let path = data_dir.join(config.storage_file_name());
        tracing::info!(path = %path.display(), "opening snapshot store");

        Ok(Self::open_at(path))
    }

    /// Use an explicit document path.
    ///
    /// This is useful for tests and for embedding the store inside custom
    /// directory layouts.
    pub fn open_at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Filesystem path of the snapshot document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist the mirrored subset of a store, overwriting the previous
    /// record.  Failures are logged and swallowed; use [`Self::try_save`]
    /// when the caller needs the error.
    pub fn save(&self, store: &ChatStore) {
        if let Err(error) = self.try_save(store) {
            tracing::warn!(
                path = %self.path.display(),
                error = %error,
                "failed to persist snapshot"
            );
        }
    }

    /// Fallible core of [`Self::save`].
    ///
    /// The replacement is atomic: the snapshot is written to a sibling
    /// temp file and renamed over the document, so an interrupted save
    /// leaves the previous record intact.
    pub fn try_save(&self, store: &ChatStore) -> Result<()> {
        let snapshot = Snapshot::capture(store);
        let json = serde_json::to_string(&snapshot)?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        if let Err(error) = std::fs::rename(&tmp, &self.path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(error.into());
        }
        Ok(())
    }

    /// Read the snapshot document.  `Ok(None)` when no record exists yet.
    pub fn load(&self) -> Result<Option<Snapshot>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };
        let snapshot = serde_json::from_str(&raw)?;
        Ok(Some(snapshot))
    }

    /// Read the snapshot and build the initial store.
    ///
    /// Absent and malformed documents both yield the built-in initial
    /// state; a malformed document is reported and left in place.
    pub fn load_or_default(&self) -> ChatStore {
        match self.load() {
            Ok(Some(snapshot)) => snapshot.into_store(),
            Ok(None) => ChatStore::new(),
            Err(error) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %error,
                    "unreadable snapshot, starting with empty state"
                );
                ChatStore::new()
            }
        }
    }
}
