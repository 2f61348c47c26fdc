use std::collections::BTreeSet;

use sessia_reports::classify::{NoteCategory, classify_note};

#[test]
fn empty_note_has_no_categories() {
    assert!(classify_note("").is_empty());
    assert!(classify_note("Routine check-in, nothing notable.").is_empty());
}

#[test]
fn one_note_can_land_in_several_buckets() {
    let categories =
        classify_note("We made real progress but faced a difficulty with homework");

    let expected: BTreeSet<_> = [NoteCategory::Progress, NoteCategory::Challenge]
        .into_iter()
        .collect();
    assert_eq!(categories, expected);
}

#[test]
fn matching_is_case_insensitive() {
    assert!(classify_note("A real BREAKTHROUGH today").contains(&NoteCategory::Significant));
    assert!(classify_note("Client IMPROVED markedly").contains(&NoteCategory::Progress));
}

#[test]
fn matching_is_substring_not_word_boundary() {
    // "progressive" contains "progress"; the heuristic matches it on purpose.
    assert!(classify_note("progressive muscle relaxation").contains(&NoteCategory::Progress));
    assert!(classify_note("critically low engagement").contains(&NoteCategory::Significant));
}

#[test]
fn significant_markers_all_trigger() {
    for marker in ["breakthrough", "significant", "critical"] {
        assert!(
            classify_note(marker).contains(&NoteCategory::Significant),
            "{marker} should flag as significant"
        );
    }
}
