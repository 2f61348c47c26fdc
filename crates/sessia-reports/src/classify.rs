//! Keyword classification of session notes.
//!
//! The single source of truth for the trigger-word lists and the matching
//! rule: case-insensitive substring, not word-boundary. "progressive" or
//! "critically" therefore match. Categories are not mutually exclusive —
//! one note can land in several buckets.
//!
//! This is a fixed heuristic, not NLP. Changing the word lists or the
//! matching rule is a behavior change to every aggregator built on it.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Trigger words that flag a session as significant.
pub const SIGNIFICANT_MARKERS: [&str; 3] = ["breakthrough", "significant", "critical"];

/// Trigger words that classify a note as a progress update.
pub const PROGRESS_MARKERS: [&str; 2] = ["progress", "improved"];

/// Trigger words that classify a note as a challenge.
pub const CHALLENGE_MARKERS: [&str; 2] = ["challenge", "difficulty"];

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum NoteCategory {
    Significant,
    Progress,
    Challenge,
}

/// Classify a free-text note into zero or more categories.
pub fn classify_note(text: &str) -> BTreeSet<NoteCategory> {
    let lowered = text.to_lowercase();
    let mut categories = BTreeSet::new();

    if SIGNIFICANT_MARKERS.iter().any(|m| lowered.contains(m)) {
        categories.insert(NoteCategory::Significant);
    }
    if PROGRESS_MARKERS.iter().any(|m| lowered.contains(m)) {
        categories.insert(NoteCategory::Progress);
    }
    if CHALLENGE_MARKERS.iter().any(|m| lowered.contains(m)) {
        categories.insert(NoteCategory::Challenge);
    }

    categories
}
