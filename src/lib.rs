//! Toolbox - a catalog of self-contained text utilities
//!
//! This library provides the tool catalog and its search filter, the tool
//! implementations, the premium access gate, and the favorites/recent usage
//! tracker with its local persistence.

pub mod access;
pub mod app;
pub mod catalog;
pub mod config;
pub mod identity;
pub mod tools;
pub mod usage;
