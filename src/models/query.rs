//! Query, page state and result models for the record query engine.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::record::{LibraryKind, Record};

/// Default number of records per page
pub const DEFAULT_PAGE_SIZE: usize = 48;

/// Default number of page links shown in the pagination bar
pub const DEFAULT_WINDOW_WIDTH: usize = 5;

/// Category filter shared by search and leaderboard views
///
/// One predicate table for both flows: ordinary kinds match on the record's
/// kind, the derived `UnitedStates` category matches on country instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    /// Wildcard, matches every record
    #[default]
    All,
    /// Exact kind match
    Kind(LibraryKind),
    /// Records whose country is `US`
    UnitedStates,
}

impl Category {
    /// Categories offered by the leaderboard view, in button order
    pub const LEADERBOARD: [Category; 5] = [
        Category::All,
        Category::UnitedStates,
        Category::Kind(LibraryKind::Academic),
        Category::Kind(LibraryKind::PublicSchool),
        Category::Kind(LibraryKind::Government),
    ];

    /// Check whether a record belongs to this category
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Category::All => true,
            Category::Kind(kind) => record.kind == *kind,
            Category::UnitedStates => record.country.as_deref() == Some("US"),
        }
    }

    /// Returns the command-line identifier
    pub fn slug(&self) -> &'static str {
        match self {
            Category::All => "all",
            Category::Kind(kind) => kind.slug(),
            Category::UnitedStates => "us",
        }
    }

    /// Returns the label used on filter buttons
    pub fn label(&self) -> &'static str {
        match self {
            Category::All => "All Libraries",
            Category::Kind(kind) => kind.name(),
            Category::UnitedStates => "US Libraries",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}

/// Error returned when a category name is not recognized
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category '{0}' (expected all, us, or a library type)")]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.eq_ignore_ascii_case("all") {
            return Ok(Category::All);
        }
        if value.eq_ignore_ascii_case("us") {
            return Ok(Category::UnitedStates);
        }
        LibraryKind::lookup(value)
            .map(Category::Kind)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

impl Serialize for Category {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.slug())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

/// Search parameters for one engine call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Free-text term; empty matches everything
    pub search_term: String,

    /// Category filter
    pub category: Category,
}

impl Query {
    /// Create a new query for a search term
    pub fn new(search_term: impl Into<String>) -> Self {
        Self {
            search_term: search_term.into(),
            ..Default::default()
        }
    }

    /// Set the category filter
    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }
}

/// Pagination state owned by the calling layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    /// Current page, 1-based
    pub current_page: usize,

    /// Records per page
    pub page_size: usize,

    /// Number of page links in the window (odd)
    pub window_width: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            current_page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            window_width: DEFAULT_WINDOW_WIDTH,
        }
    }
}

impl PageState {
    /// Create page state for the given page with default sizes
    pub fn new(current_page: usize) -> Self {
        Self {
            current_page,
            ..Default::default()
        }
    }

    /// Set the page size
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the window width
    pub fn window_width(mut self, window_width: usize) -> Self {
        self.window_width = window_width;
        self
    }

    /// Page size used for arithmetic; zero is treated as one
    pub fn effective_page_size(&self) -> usize {
        self.page_size.max(1)
    }

    /// Clamp the current page into `[1, max(total_pages, 1)]`.
    ///
    /// The engine never clamps; callers do this before querying.
    pub fn clamped(mut self, total_pages: usize) -> Self {
        self.current_page = self.current_page.clamp(1, total_pages.max(1));
        self
    }
}

/// Which view the engine is serving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Filtered records in input order
    #[default]
    Search,
    /// Filtered records ranked by holdings and truncated to the top N
    Leaderboard,
}

/// Page numbers to render plus truncation markers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    pub pages: Vec<usize>,
    pub show_left_ellipsis: bool,
    pub show_right_ellipsis: bool,
}

/// Result of one engine call
#[derive(Debug, Clone, Serialize)]
pub struct QueryOutcome<'a> {
    /// Records on the current page
    pub visible: Vec<&'a Record>,

    /// Number of records that passed the filter, before ranking and paging
    pub total_matched: usize,

    /// Number of records pages are cut from; the top-N size in leaderboard mode
    pub working_len: usize,

    /// Number of pages over the working set
    pub total_pages: usize,

    /// Offset of the first visible record in the working set
    pub start_index: usize,

    /// Pagination window for the current page
    pub window: PageWindow,
}

impl<'a> QueryOutcome<'a> {
    /// 1-based `(first, last)` positions for a "Showing X to Y" footer
    pub fn showing_range(&self) -> Option<(usize, usize)> {
        if self.visible.is_empty() {
            None
        } else {
            Some((self.start_index + 1, self.start_index + self.visible.len()))
        }
    }

    /// Whether a previous page exists
    pub fn has_previous(&self, current_page: usize) -> bool {
        current_page > 1 && self.total_pages > 0
    }

    /// Whether a next page exists
    pub fn has_next(&self, current_page: usize) -> bool {
        current_page < self.total_pages
    }

    /// Position of a visible record within the working set (1-based)
    pub fn rank_of(&self, index: usize) -> usize {
        self.start_index + index + 1
    }
}
