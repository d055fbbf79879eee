//! Terminal display utilities for CLI output formatting.
//!
//! This module provides utilities for formatting CLI output that handles
//! different screen sizes, Unicode text, and holdings-count wording.

use std::io::{self, IsTerminal};
use std::sync::OnceLock;
use terminal_size::terminal_size;
use unicode_width::UnicodeWidthChar;

/// Terminal information with cached size and capabilities.
#[derive(Debug, Clone)]
pub struct Terminal {
    width: usize,
    is_tty: bool,
}

static TERMINAL_INFO: OnceLock<Terminal> = OnceLock::new();

/// Default width when terminal size cannot be determined.
pub const DEFAULT_WIDTH: usize = 100;

/// Get the global terminal information, initialized on first call.
pub fn terminal_info() -> &'static Terminal {
    TERMINAL_INFO.get_or_init(|| {
        let width = terminal_size()
            .map(|(w, _)| w.0 as usize)
            .unwrap_or(DEFAULT_WIDTH);

        Terminal {
            width,
            is_tty: io::stdout().is_terminal(),
        }
    })
}

/// Get the current terminal width in characters.
#[inline]
pub fn terminal_width() -> usize {
    terminal_info().width
}

/// Check if stdout is a terminal.
#[inline]
pub fn is_terminal() -> bool {
    terminal_info().is_tty
}

fn display_width(text: &str) -> usize {
    text.chars().map(|c| c.width().unwrap_or(1)).sum()
}

/// Truncate text to fit within the specified width using unicode-aware truncation.
///
/// # Examples
///
/// ```
/// use collection_search::utils::truncate_with_ellipsis;
///
/// assert_eq!(truncate_with_ellipsis("Hello World", 8), "Hello...");
/// assert_eq!(truncate_with_ellipsis("Hi", 8), "Hi");
/// ```
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    if display_width(text) <= max_width {
        return text.to_string();
    }

    let budget = max_width.saturating_sub(3);
    let mut current_width = 0;
    let mut truncated = String::new();

    for c in text.chars() {
        let w = c.width().unwrap_or(1);
        if current_width + w > budget {
            break;
        }
        current_width += w;
        truncated.push(c);
    }

    format!("{}...", truncated)
}

/// Truncate text at word boundaries to fit within the specified width.
///
/// Falls back to [`truncate_with_ellipsis`] when no word boundary fits.
pub fn truncate_at_word(text: &str, max_width: usize) -> String {
    if display_width(text) <= max_width {
        return text.to_string();
    }

    let budget = max_width.saturating_sub(3);
    let prefix = truncate_with_ellipsis(text, max_width);
    let prefix = prefix.trim_end_matches("...");

    match prefix.rfind(' ') {
        Some(last_space) if last_space > 0 && display_width(&prefix[..last_space]) <= budget => {
            format!("{}...", prefix[..last_space].trim_end())
        }
        _ => truncate_with_ellipsis(text, max_width),
    }
}

/// Format a number with thousands separators.
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    out
}

/// Describe a raw holdings count the way record cards do.
///
/// Unparsable counts are shown as-is rather than coerced.
pub fn format_book_count(count: Option<&str>) -> String {
    let raw = count.unwrap_or("").trim();
    match raw.parse::<u64>() {
        Ok(1) => "1 Ukrainian book".to_string(),
        Ok(n) => format!("Ukrainian books: {}", format_number(n)),
        Err(_) => raw.to_string(),
    }
}

/// Column width configuration for table display.
#[derive(Debug, Clone, Copy)]
pub struct ColumnConfig {
    pub min_width: usize,
    pub max_width: usize,
    pub weight: usize,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        ColumnConfig {
            min_width: 1,
            max_width: usize::MAX,
            weight: 1,
        }
    }
}

impl ColumnConfig {
    /// Create a new column config with minimum width.
    pub fn new(min_width: usize) -> Self {
        ColumnConfig {
            min_width,
            ..Default::default()
        }
    }

    /// Set the maximum width.
    pub fn max(mut self, max_width: usize) -> Self {
        self.max_width = max_width;
        self
    }

    /// Set the weight for space distribution.
    pub fn weight(mut self, weight: usize) -> Self {
        self.weight = weight;
        self
    }
}

/// Calculate column widths from a list of column configurations.
///
/// Every column gets its minimum; leftover space is handed out by weight,
/// never pushing a column past its maximum.
pub fn calculate_column_widths(terminal_width: usize, configs: &[ColumnConfig]) -> Vec<usize> {
    let mut widths: Vec<usize> = configs.iter().map(|c| c.min_width).collect();
    if configs.is_empty() {
        return widths;
    }

    // Three characters of border/padding per column plus the closing border
    let chrome = configs.len() * 3 + 1;
    let available = terminal_width.saturating_sub(chrome);
    let min_sum: usize = widths.iter().sum();
    if min_sum >= available {
        return widths;
    }

    let mut remaining = available - min_sum;
    loop {
        let open: Vec<usize> = (0..configs.len())
            .filter(|&i| configs[i].weight > 0 && widths[i] < configs[i].max_width)
            .collect();
        let total_weight: usize = open.iter().map(|&i| configs[i].weight).sum();
        if remaining == 0 || total_weight == 0 {
            break;
        }

        let mut handed_out = 0;
        for &i in &open {
            let share = (remaining * configs[i].weight / total_weight).max(1);
            let room = configs[i].max_width.saturating_sub(widths[i]);
            let take = share.min(room).min(remaining - handed_out);
            widths[i] += take;
            handed_out += take;
        }

        if handed_out == 0 {
            break;
        }
        remaining -= handed_out;
    }

    widths
}

/// Column widths for the search table.
///
/// Returns (name_width, type_width, location_width, count_width).
pub fn get_search_table_columns(terminal_width: usize) -> (usize, usize, usize, usize) {
    let configs = [
        ColumnConfig::new(24).max(70).weight(3),
        ColumnConfig::new(10).max(28).weight(1),
        ColumnConfig::new(12).max(40).weight(2),
        ColumnConfig::new(7).max(12).weight(0),
    ];

    let widths = calculate_column_widths(terminal_width, &configs);
    (widths[0], widths[1], widths[2], widths[3])
}
