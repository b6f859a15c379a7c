//! Annotation variant dispatch and the annotation-specific library lookups.

mod common;

use common::{Fixture, seed_annotation};
use marginalia::MarginaliaError;
use marginalia::models::{AnnotationColor, AnnotationKind};

#[test]
fn rows_dispatch_to_underline_highlight_or_note() {
    let fixture = Fixture::seeded();
    let library = fixture.open();

    // style 3, not underlined
    assert_eq!(
        library.annotation_by_id(1).unwrap().kind,
        AnnotationKind::Highlight(AnnotationColor::Yellow)
    );
    // underline flag set; its style code is ignored
    assert_eq!(
        library.annotation_by_id(2).unwrap().kind,
        AnnotationKind::Underline
    );
    // style outside the color enumeration
    assert_eq!(library.annotation_by_id(3).unwrap().kind, AnnotationKind::Note);
}

#[test]
fn underline_flag_beats_a_color_style() {
    let fixture = Fixture::seeded();
    seed_annotation(
        &fixture.annotation_conn(),
        4,
        "asset-2",
        true,
        5,
        None,
        None,
        None,
    );

    let library = fixture.open();
    assert_eq!(
        library.annotation_by_id(4).unwrap().kind,
        AnnotationKind::Underline
    );
}

#[test]
fn highlights_are_colored_and_not_underlined() {
    let fixture = Fixture::seeded();
    let library = fixture.open();

    let highlights = library.highlights().unwrap();
    assert_eq!(highlights.len(), 1);
    assert_eq!(highlights[0].id, 1);

    let underlines = library.underlines().unwrap();
    assert_eq!(underlines.len(), 1);
    assert_eq!(underlines[0].id, 2);
}

#[test]
fn notes_require_note_text() {
    let fixture = Fixture::seeded();
    let library = fixture.open();

    let notes = library.notes().unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].note.as_deref(), Some("the spice must flow"));
}

#[test]
fn color_lookup_is_case_insensitive_and_closed() {
    let fixture = Fixture::seeded();
    let library = fixture.open();

    let yellow = library.annotations_by_color("yellow").unwrap();
    assert_eq!(yellow.len(), 1);
    assert_eq!(
        yellow[0].kind.color(),
        Some(AnnotationColor::Yellow)
    );

    assert!(library.annotations_by_color("green").unwrap().is_empty());
    assert!(matches!(
        library.annotations_by_color("mauve").unwrap_err(),
        MarginaliaError::UnknownColor(_)
    ));
}

#[test]
fn chapter_lookup_matches_exactly() {
    let fixture = Fixture::seeded();
    let library = fixture.open();

    let ch1 = library.annotations_by_chapter("ch1").unwrap();
    assert_eq!(ch1.len(), 1);
    assert_eq!(ch1[0].id, 1);
    assert!(library.annotations_by_chapter("ch9").unwrap().is_empty());
}

#[test]
fn search_spans_note_selected_and_representative_text() {
    let fixture = Fixture::seeded();
    let library = fixture.open();

    // matches the note field
    let hits = library.search_annotations("spice").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, 1);

    // matches selected and representative text
    let hits = library.search_annotations("mind-killer").unwrap();
    assert_eq!(hits.len(), 1);

    assert!(library.search_annotations("whale").unwrap().is_empty());
}
