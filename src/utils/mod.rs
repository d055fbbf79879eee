//! Utility modules supporting CLI output.
//!
//! - [`truncate_with_ellipsis`] / [`truncate_at_word`]: unicode-aware truncation for table cells
//! - [`format_number`]: thousands separators for holdings counts
//! - [`format_book_count`]: the "Ukrainian books: N" wording used on record cards
//! - [`calculate_column_widths`]: distribute terminal width across table columns
//!
//! # Formatting
//!
//! ```rust
//! use collection_search::utils::{format_book_count, format_number};
//!
//! assert_eq!(format_number(12500), "12,500");
//! assert_eq!(format_book_count(Some("1")), "1 Ukrainian book");
//! ```

mod display;

pub use display::{
    calculate_column_widths, format_book_count, format_number, get_search_table_columns,
    is_terminal, terminal_info, terminal_width, truncate_at_word, truncate_with_ellipsis,
    ColumnConfig, Terminal, DEFAULT_WIDTH,
};
