//! Page-number window calculation for pagination controls.
//!
//! Given the current page, the total page count and a window width, decides
//! which page links to render and whether a "…" marker belongs on either
//! side. The window slides with the current page and pins to the first or
//! last `width` pages near either end.

use crate::models::PageWindow;

/// Compute the pagination window.
///
/// `current_page` is 1-based and must already be clamped to
/// `[1, max(total_pages, 1)]` by the caller. `width` is expected to be odd.
///
/// Both ellipsis flags are always computed, including when every page fits
/// in the window.
///
/// # Examples
///
/// ```
/// use collection_search::engine::page_window;
///
/// let window = page_window(5, 20, 5);
/// assert_eq!(window.pages, vec![3, 4, 5, 6, 7]);
/// assert!(window.show_left_ellipsis);
/// assert!(window.show_right_ellipsis);
/// ```
pub fn page_window(current_page: usize, total_pages: usize, width: usize) -> PageWindow {
    let half = width / 2;

    let show_left_ellipsis = current_page > half + 1;
    // current < total - half, without underflow when total < half
    let show_right_ellipsis = current_page.saturating_add(half) < total_pages;

    let pages = if total_pages <= width {
        range(1, total_pages)
    } else if !show_left_ellipsis && show_right_ellipsis {
        range(1, width)
    } else if show_left_ellipsis && !show_right_ellipsis {
        range(total_pages - width + 1, total_pages)
    } else {
        range(
            current_page.saturating_sub(half),
            current_page.saturating_add(half),
        )
    };

    debug_assert!(
        pages.iter().all(|&p| p >= 1 && p <= total_pages),
        "page window {:?} escapes [1, {}]",
        pages,
        total_pages
    );

    PageWindow {
        pages,
        show_left_ellipsis,
        show_right_ellipsis,
    }
}

/// Inclusive range; empty when `end < start`
fn range(start: usize, end: usize) -> Vec<usize> {
    (start..=end).collect()
}
