//! Store configuration loaded from environment variables.
//!
//! All settings have sensible defaults so embedders can open a session
//! with zero configuration.

use std::path::PathBuf;

/// Default file stem of the snapshot record.
pub const DEFAULT_STORAGE_KEY: &str = "chat-storage";

/// Snapshot storage configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding the snapshot document.
    /// Env: `NATTER_DATA_DIR`
    /// Default: the platform data directory (`~/.local/share/natter` on
    /// Linux).
    pub data_dir: Option<PathBuf>,

    /// File stem of the snapshot record; `.json` is appended.
    /// Env: `NATTER_STORAGE_KEY`
    /// Default: `"chat-storage"`
    pub storage_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var("NATTER_DATA_DIR") {
            if dir.is_empty() {
                tracing::warn!("Empty NATTER_DATA_DIR, using platform default");
            } else {
                config.data_dir = Some(PathBuf::from(dir));
            }
        }

        if let Ok(key) = std::env::var("NATTER_STORAGE_KEY") {
            if valid_storage_key(&key) {
                config.storage_key = key;
            } else {
                tracing::warn!(value = %key, "Invalid NATTER_STORAGE_KEY, using default");
            }
        }

        config
    }

    /// File name of the snapshot record.
    pub fn storage_file_name(&self) -> String {
        format!("{}.json", self.storage_key)
    }
}

/// A storage key must be non-empty and must stay inside the data
/// directory: no path separators, no `.` or `..`.
fn valid_storage_key(key: &str) -> bool {
    !key.is_empty() && !key.contains('/') && !key.contains('\\') && key != "." && key != ".."
}
