//! CLI rendering for query outcomes.
//!
//! This module turns engine output into terminal output: record tables,
//! leaderboard tables, plain-text cards, and the pagination bar with its
//! "…" markers.

use comfy_table::{presets, Attribute, Cell, CellAlignment, ContentArrangement, Table};
use owo_colors::OwoColorize;

use crate::models::{Category, LibraryKind, QueryOutcome, Record};
use crate::utils::{
    format_book_count, format_number, get_search_table_columns, truncate_at_word,
    truncate_with_ellipsis,
};

/// Icon for a library kind.
pub fn kind_icon(kind: LibraryKind) -> &'static str {
    match kind {
        LibraryKind::Academic => "🎓",
        LibraryKind::PublicSchool => "🏫",
        LibraryKind::Government => "🏛",
        LibraryKind::Vendor => "📦",
        LibraryKind::MuseumsArchives => "🗄",
        LibraryKind::Special => "⭐",
        LibraryKind::Other => "📚",
    }
}

/// Status icons for different messages.
pub fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Success => "✓",
        Status::Error => "✗",
        Status::Warning => "⚠",
        Status::Info => "ℹ",
        Status::Search => "🔍",
    }
}

/// Status types for colored output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Error,
    Warning,
    Info,
    Search,
}

/// Print a styled status message.
pub fn print_status(status: Status, msg: &str) {
    let icon = status_icon(status);
    match status {
        Status::Success => println!("{} {}", icon.green().bold(), msg),
        Status::Error => println!("{} {}", icon.red().bold(), msg),
        Status::Warning => println!("{} {}", icon.yellow().bold(), msg),
        Status::Info => println!("{} {}", icon.cyan().bold(), msg),
        Status::Search => println!("{} {}", icon.yellow(), msg),
    }
}

/// Print a section header.
pub fn print_section(title: &str) {
    println!();
    println!("{}", format!("━━━ {} ━━━", title).bold().cyan());
}

/// Print the header above search results.
pub fn print_search_header(term: &str, category: Category, matched: usize) {
    println!();
    if term.is_empty() {
        println!(
            "{} All libraries",
            status_icon(Status::Search).yellow().bold()
        );
    } else {
        println!(
            "{} Search results for: \"{}\"",
            status_icon(Status::Search).yellow().bold(),
            term.cyan().bold()
        );
    }
    if category != Category::All {
        println!("  Filtering by: {}", category.label().green());
    }
    println!(
        "{} Found {} libraries",
        "─".repeat(30).dimmed(),
        format_number(matched as u64).green().bold()
    );
    println!();
}

/// Build the search results table.
pub fn search_table(outcome: &QueryOutcome<'_>, terminal_width: usize) -> Table {
    let (name_w, kind_w, location_w, _) = get_search_table_columns(terminal_width);

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Disabled)
        .set_header(vec!["Institution", "Type", "Location", "Books"]);

    for record in &outcome.visible {
        let name = format!("{} ({})", record.name, record.id);
        table.add_row(vec![
            Cell::new(truncate_at_word(&name, name_w)).add_attribute(Attribute::Bold),
            Cell::new(truncate_with_ellipsis(record.kind.name(), kind_w)),
            Cell::new(truncate_with_ellipsis(&record.short_location(), location_w)),
            Cell::new(format_number(record.holdings())).set_alignment(CellAlignment::Right),
        ]);
    }

    table
}

/// Build the leaderboard table with rank numbers.
pub fn leaderboard_table(outcome: &QueryOutcome<'_>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Rank", "Institution", "Type", "Location", "Books"]);

    for (index, record) in outcome.visible.iter().enumerate() {
        table.add_row(vec![
            Cell::new(format!("#{}", outcome.rank_of(index))),
            Cell::new(&record.name),
            Cell::new(record.kind.label()),
            Cell::new(record.location()),
            Cell::new(format_number(record.holdings())).set_alignment(CellAlignment::Right),
        ]);
    }

    table
}

/// Format a record as a plain-text card.
pub fn record_card(record: &Record) -> String {
    let mut lines = vec![format!(
        "{} ({}) [{}]",
        record.name,
        record.id,
        record.kind.label()
    )];

    let location = record.short_location();
    if !location.is_empty() {
        lines.push(format!("  Location: {}", location));
    }

    let books = format_book_count(record.count.as_deref());
    if !books.is_empty() {
        lines.push(format!("  {}", books));
    }
    lines.push(format!("  OCLC ID: {}", record.id));

    if let Some(url) = record.map_url() {
        lines.push(format!("  Map: {}", url));
    }

    lines.join("\n")
}

/// Print a record as a colored card.
pub fn print_record_card(record: &Record) {
    println!();
    println!(
        "{} {} {}",
        kind_icon(record.kind),
        record.name.blue().bold(),
        format!("({})", record.id).dimmed()
    );
    for line in record_card(record).lines().skip(1) {
        println!("{}", line);
    }
}

/// Pagination bar items in display order.
///
/// Produces "‹ Prev", the window's page numbers with the current page in
/// brackets, "…" markers where the window flags them, and "Next ›".
/// Previous/next are omitted at the ends.
pub fn pagination_items(outcome: &QueryOutcome<'_>, current_page: usize) -> Vec<String> {
    let window = &outcome.window;
    let mut items = Vec::with_capacity(window.pages.len() + 4);

    if outcome.has_previous(current_page) {
        items.push("‹ Prev".to_string());
    }
    if window.show_left_ellipsis {
        items.push("…".to_string());
    }
    for &page in &window.pages {
        if page == current_page {
            items.push(format!("[{}]", page));
        } else {
            items.push(page.to_string());
        }
    }
    if window.show_right_ellipsis {
        items.push("…".to_string());
    }
    if outcome.has_next(current_page) {
        items.push("Next ›".to_string());
    }

    items
}

/// Print the pagination bar and "Showing X to Y of Z" line.
pub fn print_pagination(outcome: &QueryOutcome<'_>, current_page: usize, noun: &str) {
    if outcome.total_pages > 1 {
        let bar = pagination_items(outcome, current_page)
            .into_iter()
            .map(|item| {
                if item.starts_with('[') {
                    item.cyan().bold().to_string()
                } else if item == "…" {
                    item.dimmed().to_string()
                } else {
                    item
                }
            })
            .collect::<Vec<_>>()
            .join("  ");
        println!("{}", bar);
    }

    if let Some(line) = showing_line(outcome, noun) {
        println!("{}", line.dimmed());
    }
}

/// "Showing X to Y of Z libraries" for the current page, if anything is visible.
///
/// Z counts the paged set, so a leaderboard footer ends at its top-N size.
pub fn showing_line(outcome: &QueryOutcome<'_>, noun: &str) -> Option<String> {
    outcome.showing_range().map(|(first, last)| {
        format!(
            "Showing {} to {} of {} {}",
            format_number(first as u64),
            format_number(last as u64),
            format_number(outcome.working_len as u64),
            noun
        )
    })
}
