//! # Collection Search
//!
//! Search, filter, rank and paginate a pre-loaded collection of library
//! holdings records.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (Record, Query, PageState, QueryOutcome, etc.)
//! - [`engine`]: The record query engine: filtering, ranking, page windows
//! - [`catalog`]: Loading the JSON holdings document
//! - [`config`]: Configuration management
//! - [`ui`]: Terminal rendering of query outcomes
//! - [`utils`]: Text and number formatting helpers

pub mod catalog;
pub mod config;
pub mod engine;
pub mod models;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogError};
pub use engine::QueryEngine;
pub use models::{Category, DisplayMode, LibraryKind, PageState, Query, QueryOutcome, Record};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
