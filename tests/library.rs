//! Facade-level coverage: store discovery, the single-result lookups and
//! their not-found messages, and the flag-based book shortcuts.

mod common;

use common::Fixture;
use marginalia::{Library, MarginaliaError};

#[test]
fn opens_via_container_directory_discovery() {
    let fixture = Fixture::seeded();
    let library = fixture.open();
    assert_eq!(library.books().unwrap().len(), 3);
    assert_eq!(library.collections().unwrap().len(), 2);
    assert_eq!(library.annotations().unwrap().len(), 3);
}

#[test]
fn open_fails_when_a_container_is_empty() {
    let fixture = Fixture::seeded();
    let empty = tempfile::tempdir().unwrap();
    let err = Library::open(fixture.book_dir.path(), empty.path()).unwrap_err();
    assert!(matches!(err, MarginaliaError::Connection(_)));
}

#[test]
fn single_result_lookups_name_the_missed_key() {
    let fixture = Fixture::seeded();
    let library = fixture.open();

    assert_eq!(library.collection_by_id(1).unwrap().title, "Favorites");
    assert_eq!(library.book_by_id(2).unwrap().title, "Emma");

    let err = library.collection_by_name("Archive").unwrap_err();
    assert_eq!(err.to_string(), "Collection not found: name Archive");

    let err = library.book_by_asset_id("asset-9").unwrap_err();
    assert_eq!(err.to_string(), "Book not found: asset id asset-9");

    let err = library.annotation_by_id(99).unwrap_err();
    assert_eq!(err.to_string(), "Annotation not found: id 99");
}

#[test]
fn text_lookups_match_substrings() {
    let fixture = Fixture::seeded();
    let library = fixture.open();

    let hits = library.books_by_title("yper").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Hyperion");

    let hits = library.books_by_author("herbert").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].author, "Frank Herbert");
}

#[test]
fn finished_and_unfinished_partition_the_library() {
    let fixture = Fixture::seeded();
    let library = fixture.open();

    let finished = library.finished_books().unwrap();
    assert_eq!(finished.len(), 1);
    assert_eq!(finished[0].title, "Dune");

    let unfinished = library.unfinished_books().unwrap();
    assert_eq!(unfinished.len(), 2);
    assert_eq!(
        finished.len() + unfinished.len(),
        library.books().unwrap().len()
    );

    assert!(library.sample_books().unwrap().is_empty());
}

#[test]
fn facade_results_carry_resolved_relations() {
    let fixture = Fixture::seeded();
    let library = fixture.open();

    let dune = library.books_by_title("Dune").unwrap().remove(0);
    assert_eq!(dune.annotations.unwrap().len(), 3);
    let collections: Vec<String> = dune
        .collections
        .unwrap()
        .into_iter()
        .map(|c| c.title)
        .collect();
    assert_eq!(collections.len(), 2);
    assert!(collections.contains(&"Favorites".to_string()));
}
