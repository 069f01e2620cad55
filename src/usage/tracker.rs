use super::storage::{FileStore, KeyValueStore, FAVORITES_KEY, RECENT_KEY};
use crate::identity::CurrentUser;
use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::{debug, error, warn};

/// Maximum number of entries kept in the recently used list
pub const MAX_RECENT_TOOLS: usize = 10;

/// Favorites and recently used tool ids for one profile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageState {
    /// Deduplicated, in the order they were added
    favorites: Vec<String>,
    /// Deduplicated, most recent first, at most [`MAX_RECENT_TOOLS`]
    recent: Vec<String>,
}

impl UsageState {
    /// Build a state from raw lists, restoring the dedup and cap invariants
    pub fn from_lists(favorites: Vec<String>, recent: Vec<String>) -> Self {
        let mut recent = dedup_keep_first(recent);
        recent.truncate(MAX_RECENT_TOOLS);
        Self {
            favorites: dedup_keep_first(favorites),
            recent,
        }
    }

    pub fn favorites(&self) -> &[String] {
        &self.favorites
    }

    pub fn recent(&self) -> &[String] {
        &self.recent
    }

    /// Remove `id` if present, append it otherwise. Returns the new membership.
    pub fn toggle_favorite(&mut self, id: &str) -> bool {
        if let Some(pos) = self.favorites.iter().position(|f| f == id) {
            self.favorites.remove(pos);
            false
        } else {
            self.favorites.push(id.to_string());
            true
        }
    }

    /// Move `id` to the front of the recent list, evicting the oldest entry
    /// past the cap
    pub fn add_to_recent(&mut self, id: &str) {
        self.recent.retain(|r| r != id);
        self.recent.insert(0, id.to_string());
        self.recent.truncate(MAX_RECENT_TOOLS);
    }

    pub fn clear_favorites(&mut self) {
        self.favorites.clear();
    }

    pub fn clear_recent(&mut self) {
        self.recent.clear();
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.iter().any(|f| f == id)
    }

    pub fn is_recent(&self, id: &str) -> bool {
        self.recent.iter().any(|r| r == id)
    }

    pub fn stats(&self) -> ToolStats {
        let favorites_count = self.favorites.len();
        let recent_count = self.recent.len();
        ToolStats {
            favorites_count,
            recent_count,
            total_interactions: favorites_count + recent_count,
        }
    }
}

fn dedup_keep_first(ids: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(ids.len());
    for id in ids {
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}

/// Read-only usage summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToolStats {
    pub favorites_count: usize,
    pub recent_count: usize,
    pub total_interactions: usize,
}

/// Decode a stored id list. Valid JSON of the wrong shape yields an empty
/// list; invalid JSON is an error.
fn parse_id_list(key: &str, raw: &str) -> Result<Vec<String>> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .with_context(|| format!("Failed to parse stored '{}' list", key))?;

    let serde_json::Value::Array(items) = value else {
        warn!(key, "stored list is not an array, resetting it");
        return Ok(Vec::new());
    };

    let total = items.len();
    let ids: Vec<String> = items
        .into_iter()
        .filter_map(|item| match item {
            serde_json::Value::String(id) => Some(id),
            _ => None,
        })
        .collect();
    if ids.len() != total {
        warn!(key, dropped = total - ids.len(), "ignoring non-string entries");
    }
    Ok(ids)
}

/// A missing or blank value means the key was never saved
fn read_id_list<S: KeyValueStore>(store: &S, key: &str) -> Result<Vec<String>> {
    match store.get(key)? {
        Some(raw) if !raw.trim().is_empty() => parse_id_list(key, &raw),
        _ => Ok(Vec::new()),
    }
}

fn read_state<S: KeyValueStore>(store: &S) -> Result<UsageState> {
    let favorites = read_id_list(store, FAVORITES_KEY)?;
    let recent = read_id_list(store, RECENT_KEY)?;
    Ok(UsageState::from_lists(favorites, recent))
}

/// Keeps a [`UsageState`] in sync with a [`KeyValueStore`]
///
/// Every mutation is written through immediately. Write failures are logged
/// and swallowed: the in-memory state stays authoritative for the session.
#[derive(Debug)]
pub struct UsageTracker<S: KeyValueStore = FileStore> {
    store: S,
    state: UsageState,
}

impl UsageTracker<FileStore> {
    /// Tracker backed by the platform data directory
    pub fn open_default() -> Result<Self> {
        Ok(Self::load(FileStore::new()?))
    }
}

impl<S: KeyValueStore> UsageTracker<S> {
    /// Create a tracker, loading whatever the store holds
    ///
    /// Unreadable or corrupt data never fails: the affected state starts
    /// empty instead.
    pub fn load(store: S) -> Self {
        let state = Self::read_or_default(&store);
        Self { store, state }
    }

    /// Re-read persisted state, e.g. after the signed-in identity changed
    pub fn reload(&mut self) {
        self.state = Self::read_or_default(&self.store);
    }

    fn read_or_default(store: &S) -> UsageState {
        match read_state(store) {
            Ok(state) => {
                debug!(
                    favorites = state.favorites.len(),
                    recent = state.recent.len(),
                    "loaded usage state"
                );
                state
            }
            Err(e) => {
                warn!("Error loading tool tracking data, starting empty: {:#}", e);
                UsageState::default()
            }
        }
    }

    /// Toggle a favorite for a signed-in user
    ///
    /// Anonymous viewers cannot keep favorites: with `user == None` nothing
    /// changes and `None` is returned. Otherwise returns whether `id` is now a
    /// favorite.
    pub fn toggle_favorite(&mut self, user: Option<&CurrentUser>, id: &str) -> Option<bool> {
        if user.is_none() {
            debug!(tool_id = id, "ignoring favorite toggle from anonymous viewer");
            return None;
        }
        let now_favorite = self.state.toggle_favorite(id);
        self.persist(FAVORITES_KEY);
        Some(now_favorite)
    }

    pub fn add_to_recent(&mut self, id: &str) {
        self.state.add_to_recent(id);
        self.persist(RECENT_KEY);
    }

    pub fn clear_favorites(&mut self) {
        self.state.clear_favorites();
        self.persist(FAVORITES_KEY);
    }

    pub fn clear_recent(&mut self) {
        self.state.clear_recent();
        self.persist(RECENT_KEY);
    }

    pub fn favorites(&self) -> &[String] {
        self.state.favorites()
    }

    pub fn recent(&self) -> &[String] {
        self.state.recent()
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.state.is_favorite(id)
    }

    pub fn is_recent(&self, id: &str) -> bool {
        self.state.is_recent(id)
    }

    pub fn stats(&self) -> ToolStats {
        self.state.stats()
    }

    pub fn state(&self) -> &UsageState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn persist(&self, key: &str) {
        if let Err(e) = self.save_key(key) {
            error!("Error saving {}: {:#}", key, e);
        }
    }

    fn save_key(&self, key: &str) -> Result<()> {
        let ids = match key {
            FAVORITES_KEY => self.state.favorites(),
            RECENT_KEY => self.state.recent(),
            other => bail!("Unknown usage key: {}", other),
        };
        let json = serde_json::to_string(ids).context("Failed to serialize usage data")?;
        self.store.set(key, &json)
    }
}
