//! The record query engine.
//!
//! Pure functions over an in-memory record collection:
//!
//! - [`filter_records`]: free-text and category filtering, order-preserving
//! - [`rank_records`]: stable descending ranking by holdings, truncated to the top N
//! - [`page_window`]: which page links to show and where the "…" markers go
//! - [`QueryEngine`]: filter, optional ranking and page slicing in one call
//!
//! # Example
//!
//! ```rust
//! use collection_search::engine::QueryEngine;
//! use collection_search::models::{
//!     Category, DisplayMode, LibraryKind, PageState, Query, Record,
//! };
//!
//! let records = vec![
//!     Record::new("WSU", "Washington State University", LibraryKind::Academic)
//!         .country("US")
//!         .count("310"),
//!     Record::new("KYV", "Vernadsky National Library", LibraryKind::Government)
//!         .country("UA")
//!         .count("9000"),
//! ];
//!
//! let query = Query::new("").category(Category::UnitedStates);
//! let outcome = QueryEngine::new().execute(
//!     &records,
//!     &query,
//!     &PageState::default(),
//!     DisplayMode::Leaderboard,
//! );
//!
//! assert_eq!(outcome.total_matched, 1);
//! assert_eq!(outcome.visible[0].id, "WSU");
//! ```

mod filter;
mod query;
mod rank;
mod window;

pub use filter::filter_records;
pub use query::QueryEngine;
pub use rank::{rank_records, rank_records_by, LEADERBOARD_SIZE};
pub use window::page_window;
