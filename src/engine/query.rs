//! Query engine composing filter, optional ranking and pagination.

use crate::models::{DisplayMode, PageState, Query, QueryOutcome, Record};

use super::filter::filter_records;
use super::rank::{rank_records, LEADERBOARD_SIZE};
use super::window::page_window;

/// Stateless entry point for search and leaderboard views
///
/// Every call recomputes its result from the full record set. The engine
/// holds only its leaderboard size, so one instance can serve any number of
/// overlapping queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryEngine {
    leaderboard_size: usize,
}

impl Default for QueryEngine {
    fn default() -> Self {
        Self {
            leaderboard_size: LEADERBOARD_SIZE,
        }
    }
}

impl QueryEngine {
    /// Create an engine with the default leaderboard size
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how many records a leaderboard keeps
    pub fn leaderboard_size(mut self, size: usize) -> Self {
        self.leaderboard_size = size;
        self
    }

    /// Run a query over the full record set.
    ///
    /// In [`DisplayMode::Leaderboard`] the filtered records are ranked and
    /// truncated before paging, so pages cover the top-N set only.
    /// `total_matched` is always the filtered count and `working_len` the
    /// size of the paged set. Pages past the end yield an empty `visible`
    /// list.
    pub fn execute<'a>(
        &self,
        records: &'a [Record],
        query: &Query,
        page: &PageState,
        mode: DisplayMode,
    ) -> QueryOutcome<'a> {
        let filtered = filter_records(records, query);
        let total_matched = filtered.len();

        let working = match mode {
            DisplayMode::Search => filtered,
            DisplayMode::Leaderboard => rank_records(filtered, self.leaderboard_size),
        };

        let page_size = page.effective_page_size();
        let total_pages = working.len().div_ceil(page_size);

        let start_index = page.current_page.saturating_sub(1).saturating_mul(page_size);
        let visible: Vec<&Record> = working
            .iter()
            .skip(start_index)
            .take(page_size)
            .copied()
            .collect();

        let window = page_window(page.current_page, total_pages, page.window_width);

        tracing::debug!(
            mode = ?mode,
            total_matched,
            working = working.len(),
            total_pages,
            page = page.current_page,
            visible = visible.len(),
            "Executed query"
        );

        QueryOutcome {
            visible,
            total_matched,
            working_len: working.len(),
            total_pages,
            start_index,
            window,
        }
    }

    /// Number of pages a query produces, for clamping before [`execute`](Self::execute)
    pub fn page_count(
        &self,
        records: &[Record],
        query: &Query,
        page_size: usize,
        mode: DisplayMode,
    ) -> usize {
        let matched = filter_records(records, query).len();
        let working = match mode {
            DisplayMode::Search => matched,
            DisplayMode::Leaderboard => matched.min(self.leaderboard_size),
        };
        working.div_ceil(page_size.max(1))
    }
}
