use crate::tools::ToolKind;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// The fixed set of tool categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Text,
    Image,
    Developer,
    Converter,
    Utility,
    Web,
    Business,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Text,
        Category::Image,
        Category::Developer,
        Category::Converter,
        Category::Utility,
        Category::Web,
        Category::Business,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Developer => "developer",
            Self::Converter => "converter",
            Self::Utility => "utility",
            Self::Web => "web",
            Self::Business => "business",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.id() == s)
            .ok_or_else(|| anyhow::anyhow!("Unknown category: {}", s))
    }
}

/// Static description of a category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDescriptor {
    pub id: Category,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

/// Static description of a tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDescriptor {
    /// Stable key used in persisted favorites/recent lists
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: Category,
    /// Symbolic glyph name, opaque to the library
    pub icon: &'static str,
    pub is_premium: bool,
    pub kind: ToolKind,
}

/// The tool and category tables
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<CategoryDescriptor>,
    tools: Vec<ToolDescriptor>,
}

impl Catalog {
    /// Build a catalog, checking id uniqueness and category references
    pub fn new(categories: Vec<CategoryDescriptor>, tools: Vec<ToolDescriptor>) -> Result<Self> {
        let catalog = Self { categories, tools };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The catalog compiled into the binary
    pub fn builtin() -> Result<Self> {
        Self::new(
            super::data::CATEGORIES.to_vec(),
            super::data::TOOLS.to_vec(),
        )
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen_categories = HashSet::new();
        for category in &self.categories {
            if !seen_categories.insert(category.id) {
                bail!("Duplicate category id: {}", category.id);
            }
        }

        let mut seen_tools = HashSet::new();
        for tool in &self.tools {
            if !seen_tools.insert(tool.id) {
                bail!("Duplicate tool id: {}", tool.id);
            }
            if !seen_categories.contains(&tool.category) {
                bail!(
                    "Tool '{}' references undeclared category: {}",
                    tool.id,
                    tool.category
                );
            }
        }
        Ok(())
    }

    pub fn tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    pub fn categories(&self) -> &[CategoryDescriptor] {
        &self.categories
    }

    pub fn find(&self, id: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|t| t.id == id)
    }

    pub fn category(&self, id: Category) -> Option<&CategoryDescriptor> {
        self.categories.iter().find(|c| c.id == id)
    }
}
