//! # Usage Tracking Module
//!
//! Tracks which tools a profile has marked as favorites and which it has
//! opened recently.
//!
//! ## Overview
//!
//! - **Favorites**: tool ids the signed-in user pinned. Deduplicated, kept in
//!   the order they were added, unbounded. Anonymous viewers cannot change
//!   them.
//! - **Recent**: tool ids opened most recently, newest first, deduplicated
//!   (re-opening a tool moves it to the front) and capped at
//!   [`MAX_RECENT_TOOLS`].
//!
//! The state belongs to the local profile, not to an account. It may refer to
//! tools that have since left the catalog; those ids are skipped when
//! resolved with [`crate::catalog::resolve`].
//!
//! ## Storage
//!
//! Two independent keys, each a JSON array of tool id strings:
//!
//! ```json
//! favorites   -> ["json-formatter", "calculator"]
//! recentTools -> ["calculator", "base64-encoder"]
//! ```
//!
//! Every mutation writes its key through immediately. There is no locking
//! across processes: two concurrent sessions overwrite each other's writes.

mod storage;
mod tracker;

pub use storage::{FileStore, KeyValueStore, MemoryStore, FAVORITES_KEY, RECENT_KEY};
pub use tracker::{ToolStats, UsageState, UsageTracker, MAX_RECENT_TOOLS};
