//! Search and category filtering over the catalog

use super::descriptor::{Catalog, Category, ToolDescriptor};
use anyhow::Result;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Category restriction for [`filter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl FromStr for CategoryFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        if s == "all" {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(category) => write!(f, "{}", category),
        }
    }
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == category,
        }
    }
}

fn matches_query(tool: &ToolDescriptor, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let query = query.to_lowercase();
    tool.name.to_lowercase().contains(&query) || tool.description.to_lowercase().contains(&query)
}

/// Tools matching both the category filter and the free-text query, in
/// catalog order
pub fn filter<'a>(
    tools: &'a [ToolDescriptor],
    query: &str,
    category: CategoryFilter,
) -> Vec<&'a ToolDescriptor> {
    tools
        .iter()
        .filter(|t| category.matches(t.category))
        .filter(|t| matches_query(t, query))
        .collect()
}

/// Split into (free, premium), each keeping its relative order
pub fn partition_premium<'a>(
    tools: &[&'a ToolDescriptor],
) -> (Vec<&'a ToolDescriptor>, Vec<&'a ToolDescriptor>) {
    tools.iter().copied().partition(|t| !t.is_premium)
}

/// Resolve stored ids against the live catalog, keeping the order of `ids`.
/// Ids that no longer exist are dropped.
pub fn resolve<'a, S: AsRef<str>>(catalog: &'a Catalog, ids: &[S]) -> Vec<&'a ToolDescriptor> {
    ids.iter()
        .filter_map(|id| {
            let found = catalog.find(id.as_ref());
            if found.is_none() {
                debug!(tool_id = id.as_ref(), "skipping unknown tool id");
            }
            found
        })
        .collect()
}

/// Tool counts for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategorySummary {
    pub category: Category,
    pub total: usize,
    pub free: usize,
    pub premium: usize,
}

/// Per-category counts, in category declaration order
pub fn category_summaries(catalog: &Catalog) -> Vec<CategorySummary> {
    catalog
        .categories()
        .iter()
        .map(|c| {
            let in_category = filter(catalog.tools(), "", CategoryFilter::Only(c.id));
            let premium = in_category.iter().filter(|t| t.is_premium).count();
            CategorySummary {
                category: c.id,
                total: in_category.len(),
                free: in_category.len() - premium,
                premium,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::descriptor::CategoryDescriptor;
    use crate::tools::ToolKind;

    fn sample_tools() -> Vec<ToolDescriptor> {
        vec![
            ToolDescriptor {
                id: "t1",
                name: "Base64 Encoder",
                description: "Encode and decode Base64 strings",
                category: Category::Developer,
                icon: "Binary",
                is_premium: false,
                kind: ToolKind::Base64,
            },
            ToolDescriptor {
                id: "t2",
                name: "Calculator",
                description: "Basic calculator for mathematical operations",
                category: Category::Utility,
                icon: "Calculator",
                is_premium: false,
                kind: ToolKind::Calculator,
            },
            ToolDescriptor {
                id: "t3",
                name: "JSON Formatter",
                description: "Format, validate, and minify JSON data",
                category: Category::Developer,
                icon: "Braces",
                is_premium: true,
                kind: ToolKind::JsonFormatter,
            },
        ]
    }

    fn ids(tools: &[&ToolDescriptor]) -> Vec<&'static str> {
        tools.iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_filter_by_query() {
        let tools = sample_tools();
        assert_eq!(ids(&filter(&tools[..2], "calc", CategoryFilter::All)), vec!["t2"]);
        assert_eq!(ids(&filter(&tools, "CALC", CategoryFilter::All)), vec!["t2"]);
        assert!(filter(&tools[..2], "zzz", CategoryFilter::All).is_empty());
    }

    #[test]
    fn test_filter_by_category() {
        let tools = sample_tools();
        let developer = CategoryFilter::Only(Category::Developer);
        assert_eq!(ids(&filter(&tools[..2], "", developer)), vec!["t1"]);
        assert_eq!(ids(&filter(&tools, "", developer)), vec!["t1", "t3"]);
        assert!(filter(&tools, "", CategoryFilter::Only(Category::Business)).is_empty());
    }

    #[test]
    fn test_filter_matches_description() {
        let tools = sample_tools();
        assert_eq!(ids(&filter(&tools, "minify", CategoryFilter::All)), vec!["t3"]);
    }

    #[test]
    fn test_filter_empty_query_keeps_catalog_order() {
        let tools = sample_tools();
        assert_eq!(
            ids(&filter(&tools, "", CategoryFilter::All)),
            vec!["t1", "t2", "t3"]
        );
    }

    #[test]
    fn test_partition_premium() {
        let tools = sample_tools();
        let all = filter(&tools, "", CategoryFilter::All);
        let (free, premium) = partition_premium(&all);
        assert_eq!(ids(&free), vec!["t1", "t2"]);
        assert_eq!(ids(&premium), vec!["t3"]);
    }

    #[test]
    fn test_category_filter_parse() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "text".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Text)
        );
        assert!("games".parse::<CategoryFilter>().is_err());
    }

    #[test]
    fn test_resolve_drops_stale_ids() {
        let catalog = Catalog::new(
            vec![
                CategoryDescriptor {
                    id: Category::Developer,
                    name: "Developer Tools",
                    description: "",
                    icon: "Code",
                },
                CategoryDescriptor {
                    id: Category::Utility,
                    name: "Utilities",
                    description: "",
                    icon: "Settings",
                },
            ],
            sample_tools(),
        )
        .unwrap();

        let resolved = resolve(&catalog, &["t3", "deleted-tool", "t1"]);
        assert_eq!(ids(&resolved), vec!["t3", "t1"]);
    }

    #[test]
    fn test_category_summaries_builtin() {
        let catalog = Catalog::builtin().unwrap();
        let summaries = category_summaries(&catalog);
        assert_eq!(summaries.len(), catalog.categories().len());

        let developer = summaries
            .iter()
            .find(|s| s.category == Category::Developer)
            .unwrap();
        assert_eq!(developer.premium, 2);
        assert_eq!(developer.free + developer.premium, developer.total);

        let total: usize = summaries.iter().map(|s| s.total).sum();
        assert_eq!(total, catalog.tools().len());
    }
}
