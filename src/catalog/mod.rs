//! # Catalog Module
//!
//! The static table of tools and categories, plus the query logic the CLI
//! uses to decide what to show.
//!
//! ## Overview
//!
//! - [`Catalog`] holds the [`CategoryDescriptor`] and [`ToolDescriptor`]
//!   tables and checks on construction that tool ids are unique and that
//!   every tool belongs to a declared category.
//! - [`filter`] narrows the tools by free-text query and [`CategoryFilter`].
//! - [`partition_premium`] splits a result into free and premium sections.
//! - [`resolve`] turns stored favorite/recent ids back into descriptors,
//!   silently skipping ids that are no longer in the catalog.
//!
//! ## Matching Rule
//!
//! A tool is shown when the category filter is `all` or equals the tool's
//! category, and the query is empty or occurs case-insensitively in the
//! tool's name or description. Results keep catalog order.

mod data;
mod descriptor;
mod filter;

pub use data::{CATEGORIES, TOOLS};
pub use descriptor::{Catalog, Category, CategoryDescriptor, ToolDescriptor};
pub use filter::{
    category_summaries, filter, partition_premium, resolve, CategoryFilter, CategorySummary,
};
