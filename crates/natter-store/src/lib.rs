//! # natter-store
//!
//! Client-side conversation state for the Natter chat widget.
//!
//! The crate revolves around a synchronous [`ChatStore`] value that holds
//! every piece of chat state for one user session — messages,
//! conversations, threads, reactions and a handful of UI flags — together
//! with a [`SnapshotStore`] that mirrors the history subset of that state
//! to a single JSON document on disk.  [`ChatSession`] glues the two:
//! it loads the snapshot on startup and rewrites it after every mutation.

pub mod config;
pub mod conversations;
pub mod messages;
pub mod models;
pub mod reactions;
pub mod session;
pub mod snapshot;
pub mod store;
pub mod threads;

mod error;

pub use config::StoreConfig;
pub use error::StoreError;
pub use models::*;
pub use session::ChatSession;
pub use snapshot::{Snapshot, SnapshotStore};
pub use store::ChatStore;
