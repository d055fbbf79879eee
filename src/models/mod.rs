//! Core data models for holdings records and query operations.

mod query;
mod record;

pub use query::{
    Category, DisplayMode, PageState, PageWindow, ParseCategoryError, Query, QueryOutcome,
    DEFAULT_PAGE_SIZE, DEFAULT_WINDOW_WIDTH,
};
pub use record::{LibraryKind, Record};
