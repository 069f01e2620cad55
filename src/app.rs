//! # Toolbox Session
//!
//! [`Toolbox`] ties the catalog, the usage tracker and the current identity
//! together into the operations the CLI exposes: search, open a tool,
//! toggle favorites and show the dashboard.
//!
//! Opening a tool follows one flow:
//!
//! 1. Look the id up in the catalog (unknown ids are an error).
//! 2. Run the premium access gate against the current identity.
//! 3. If access is granted, record the tool as recently used, then run it.
//!    If not, report why and record nothing.

use crate::access::{check_access, Access};
use crate::catalog::{self, Catalog, CategoryFilter, ToolDescriptor};
use crate::identity::CurrentUser;
use crate::tools::ToolInput;
use crate::usage::{FileStore, KeyValueStore, ToolStats, UsageTracker};
use anyhow::{anyhow, Result};
use tracing::{debug, info};

/// Result of trying to open a tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolRun {
    Output(String),
    Denied(Access),
}

/// Everything the dashboard view shows
#[derive(Debug)]
pub struct Dashboard<'a> {
    pub favorites: Vec<&'a ToolDescriptor>,
    pub recent: Vec<&'a ToolDescriptor>,
    pub free_tools: usize,
    pub premium_tools: usize,
    pub stats: ToolStats,
}

pub struct Toolbox<S: KeyValueStore = FileStore> {
    catalog: Catalog,
    tracker: UsageTracker<S>,
    user: Option<CurrentUser>,
}

impl<S: KeyValueStore> Toolbox<S> {
    pub fn new(catalog: Catalog, tracker: UsageTracker<S>, user: Option<CurrentUser>) -> Self {
        Self {
            catalog,
            tracker,
            user,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn tracker(&self) -> &UsageTracker<S> {
        &self.tracker
    }

    pub fn user(&self) -> Option<&CurrentUser> {
        self.user.as_ref()
    }

    /// Swap the current identity and reload usage state for it
    pub fn set_user(&mut self, user: Option<CurrentUser>) {
        info!(
            user = user.as_ref().map(|u| u.email.as_str()).unwrap_or("anonymous"),
            "identity changed"
        );
        self.user = user;
        self.tracker.reload();
    }

    fn tool(&self, id: &str) -> Result<&ToolDescriptor> {
        self.catalog
            .find(id)
            .ok_or_else(|| anyhow!("Tool not found: {}", id))
    }

    pub fn search(&self, query: &str, category: CategoryFilter) -> Vec<&ToolDescriptor> {
        catalog::filter(self.catalog.tools(), query, category)
    }

    pub fn access(&self, id: &str) -> Result<Access> {
        let tool = self.tool(id)?;
        Ok(check_access(tool, self.user.as_ref()))
    }

    /// Open a tool: gate, record, run
    pub fn open(&mut self, id: &str, input: &ToolInput) -> Result<ToolRun> {
        let tool = self.tool(id)?;
        let access = check_access(tool, self.user.as_ref());
        if !access.is_granted() {
            debug!(tool_id = id, ?access, "tool access denied");
            return Ok(ToolRun::Denied(access));
        }

        let kind = tool.kind;
        self.tracker.add_to_recent(id);
        kind.run(input).map(ToolRun::Output)
    }

    /// Toggle a favorite for the current identity
    ///
    /// Returns the new membership, or `None` when the viewer is anonymous and
    /// nothing changed.
    pub fn toggle_favorite(&mut self, id: &str) -> Result<Option<bool>> {
        self.tool(id)?;
        Ok(self.tracker.toggle_favorite(self.user.as_ref(), id))
    }

    pub fn clear_favorites(&mut self) {
        self.tracker.clear_favorites();
    }

    pub fn clear_recent(&mut self) {
        self.tracker.clear_recent();
    }

    pub fn favorite_tools(&self) -> Vec<&ToolDescriptor> {
        catalog::resolve(&self.catalog, self.tracker.favorites())
    }

    pub fn recent_tools(&self) -> Vec<&ToolDescriptor> {
        catalog::resolve(&self.catalog, self.tracker.recent())
    }

    pub fn dashboard(&self) -> Dashboard<'_> {
        let all: Vec<&ToolDescriptor> = self.catalog.tools().iter().collect();
        let (free, premium) = catalog::partition_premium(&all);
        Dashboard {
            favorites: self.favorite_tools(),
            recent: self.recent_tools(),
            free_tools: free.len(),
            premium_tools: premium.len(),
            stats: self.tracker.stats(),
        }
    }
}
