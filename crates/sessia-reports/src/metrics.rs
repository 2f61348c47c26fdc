//! Derived scalar metrics over sessions and progress reports.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use sessia_core::models::ai_report::InterventionEffectiveness;
use sessia_core::models::session::Session;

/// An intervention whose mean effectiveness reaches this value is a
/// "key intervention". Inclusive bound.
pub const KEY_INTERVENTION_THRESHOLD: f64 = 0.70;

/// An effectiveness rating below this value is surfaced as a critical
/// event. Strict bound.
pub const LOW_EFFECTIVENESS_THRESHOLD: f64 = 0.30;

/// Arithmetic mean of the mood ratings across the given sessions.
///
/// `None` when no session carries a rating — never NaN.
pub fn average_mood(sessions: &[Session]) -> Option<f64> {
    let ratings: Vec<f64> = sessions
        .iter()
        .filter_map(|s| s.mood_rating)
        .map(f64::from)
        .collect();

    if ratings.is_empty() {
        return None;
    }

    Some(ratings.iter().sum::<f64>() / ratings.len() as f64)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodTrend {
    Improving,
    Stable,
    Declining,
}

/// Mood direction over the window: last rated session minus first, in
/// chronological order. Deltas inside ±1 point count as stable. `None`
/// with fewer than two rated sessions.
pub fn mood_trend(sessions: &[Session]) -> Option<MoodTrend> {
    let ratings: Vec<f64> = sessions
        .iter()
        .filter_map(|s| s.mood_rating)
        .map(f64::from)
        .collect();

    if ratings.len() < 2 {
        return None;
    }

    let delta = ratings[ratings.len() - 1] - ratings[0];
    if delta.abs() < 1.0 {
        Some(MoodTrend::Stable)
    } else if delta > 0.0 {
        Some(MoodTrend::Improving)
    } else {
        Some(MoodTrend::Declining)
    }
}

/// Per-intervention mean effectiveness, ordered by intervention name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterventionAverage {
    pub intervention: String,
    pub average_effectiveness: f64,
    pub samples: usize,
}

/// Fold effectiveness entries from any number of progress reports into
/// per-name means.
pub fn intervention_averages<'a>(
    entries: impl IntoIterator<Item = &'a InterventionEffectiveness>,
) -> Vec<InterventionAverage> {
    let mut sums: BTreeMap<&str, (f64, usize)> = BTreeMap::new();

    for entry in entries {
        let slot = sums.entry(entry.intervention.as_str()).or_insert((0.0, 0));
        slot.0 += entry.effectiveness;
        slot.1 += 1;
    }

    sums.into_iter()
        .map(|(name, (sum, count))| InterventionAverage {
            intervention: name.to_string(),
            average_effectiveness: sum / count as f64,
            samples: count,
        })
        .collect()
}

/// Names of the interventions whose mean effectiveness is at or above
/// [`KEY_INTERVENTION_THRESHOLD`].
pub fn key_interventions(averages: &[InterventionAverage]) -> Vec<String> {
    averages
        .iter()
        .filter(|a| a.average_effectiveness >= KEY_INTERVENTION_THRESHOLD)
        .map(|a| a.intervention.clone())
        .collect()
}
