//! Integration tests for Collection Search
//!
//! These tests drive the public API end to end: load a document, run search
//! and leaderboard queries, and check pagination metadata.

use collection_search::catalog::Catalog;
use collection_search::engine::{filter_records, page_window, rank_records, QueryEngine};
use collection_search::models::{Category, DisplayMode, LibraryKind, PageState, Query};
use std::fmt::Write;

/// Build a document with `n` libraries, alternating types and countries
fn document(n: usize) -> String {
    let mut entries = Vec::new();
    for i in 0..n {
        let kind = match i % 4 {
            0 => "Academic",
            1 => "Public & School (K-12)",
            2 => "Government, State & National",
            _ => "Special",
        };
        let country = if i % 5 == 0 { "UA" } else { "US" };
        let mut entry = String::new();
        write!(
            entry,
            r#"{{"institutionName": "Library {i}", "institutionIdentifier": "L{i}", "n": "{}", "City": "City {}", "Country": "{country}", "libraryType": "{kind}"}}"#,
            (i * 7) % 113,
            i % 9
        )
        .unwrap();
        entries.push(entry);
    }
    // One malformed entry that the loader must drop
    entries.push(r#"{"institutionName": "Broken"}"#.to_string());

    format!(r#"{{"Updated Data": [{}]}}"#, entries.join(","))
}

#[test]
fn test_catalog_to_search_pages() {
    let catalog = Catalog::from_json(&document(250)).unwrap();
    assert_eq!(catalog.len(), 250);
    assert_eq!(catalog.skipped, 1);

    let engine = QueryEngine::new();
    let query = Query::default();

    let first = engine.execute(&catalog.records, &query, &PageState::new(1), DisplayMode::Search);
    assert_eq!(first.total_matched, 250);
    assert_eq!(first.total_pages, 6);
    assert_eq!(first.visible.len(), 48);
    assert_eq!(first.window.pages, vec![1, 2, 3, 4, 5]);
    assert!(!first.window.show_left_ellipsis);
    assert!(first.window.show_right_ellipsis);

    let last = engine.execute(&catalog.records, &query, &PageState::new(6), DisplayMode::Search);
    assert_eq!(last.visible.len(), 250 - 5 * 48);
    assert_eq!(last.window.pages, vec![2, 3, 4, 5, 6]);
    assert!(last.window.show_left_ellipsis);
    assert!(!last.window.show_right_ellipsis);
}

#[test]
fn test_search_term_and_kind_combine() {
    let catalog = Catalog::from_json(&document(40)).unwrap();
    let query = Query::new("city 3").category(Category::Kind(LibraryKind::Academic));

    let matched = filter_records(&catalog.records, &query);
    assert!(!matched.is_empty());
    for record in &matched {
        assert_eq!(record.kind, LibraryKind::Academic);
        assert_eq!(record.city.as_deref(), Some("City 3"));
    }

    let outcome = QueryEngine::new().execute(
        &catalog.records,
        &query,
        &PageState::default(),
        DisplayMode::Search,
    );
    assert_eq!(outcome.total_matched, matched.len());
}

#[test]
fn test_search_preserves_document_order() {
    let catalog = Catalog::from_json(&document(30)).unwrap();
    let query = Query::new("").category(Category::UnitedStates);

    let matched = filter_records(&catalog.records, &query);
    let positions: Vec<usize> = matched
        .iter()
        .map(|r| catalog.records.iter().position(|c| c.id == r.id).unwrap())
        .collect();

    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted);
}

#[test]
fn test_leaderboard_us_top_n() {
    let catalog = Catalog::from_json(&document(300)).unwrap();
    let query = Query::new("").category(Category::UnitedStates);
    let page = PageState::new(1).page_size(100);

    let outcome = QueryEngine::new().execute(&catalog.records, &query, &page, DisplayMode::Leaderboard);

    assert_eq!(outcome.total_matched, 240);
    assert_eq!(outcome.working_len, 100);
    assert_eq!(outcome.total_pages, 1);
    assert_eq!(outcome.visible.len(), 100);
    assert!(outcome
        .visible
        .iter()
        .all(|r| r.country.as_deref() == Some("US")));
    assert!(outcome
        .visible
        .windows(2)
        .all(|pair| pair[0].holdings() >= pair[1].holdings()));
}

#[test]
fn test_leaderboard_matches_direct_ranking() {
    let catalog = Catalog::from_json(&document(120)).unwrap();
    let query = Query::new("").category(Category::Kind(LibraryKind::Government));

    let direct = rank_records(filter_records(&catalog.records, &query), 100);
    let outcome = QueryEngine::new().execute(
        &catalog.records,
        &query,
        &PageState::new(1).page_size(1000),
        DisplayMode::Leaderboard,
    );

    let direct_ids: Vec<&str> = direct.iter().map(|r| r.id.as_str()).collect();
    let engine_ids: Vec<&str> = outcome.visible.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(direct_ids, engine_ids);
}

#[test]
fn test_caller_clamps_page_before_query() {
    let catalog = Catalog::from_json(&document(10)).unwrap();
    let engine = QueryEngine::new();
    let query = Query::new("library 1");

    let total_pages = engine.page_count(&catalog.records, &query, 48, DisplayMode::Search);
    assert_eq!(total_pages, 1);

    let page = PageState::new(12).clamped(total_pages);
    let outcome = engine.execute(&catalog.records, &query, &page, DisplayMode::Search);
    assert_eq!(page.current_page, 1);
    assert_eq!(outcome.visible.len(), 1);
    assert_eq!(outcome.window, page_window(1, 1, 5));
}

#[test]
fn test_outcome_serializes_to_json() {
    let catalog = Catalog::from_json(&document(3)).unwrap();
    let outcome = QueryEngine::new().execute(
        &catalog.records,
        &Query::default(),
        &PageState::default(),
        DisplayMode::Search,
    );

    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["total_matched"], 3);
    assert_eq!(json["visible"][0]["institutionIdentifier"], "L0");
    assert_eq!(json["window"]["pages"], serde_json::json!([1]));
}
