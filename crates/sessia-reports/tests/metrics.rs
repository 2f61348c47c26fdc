use jiff::Timestamp;
use uuid::Uuid;

use sessia_core::models::ai_report::InterventionEffectiveness;
use sessia_core::models::session::{Session, SessionStatus};
use sessia_reports::metrics::{
    MoodTrend, average_mood, intervention_averages, key_interventions, mood_trend,
};

fn session(scheduled_at: &str, mood_rating: Option<u8>) -> Session {
    let ts: Timestamp = scheduled_at.parse().unwrap();
    Session {
        id: Uuid::new_v4(),
        client_id: Uuid::new_v4(),
        counselor_sub: "counselor-1".to_string(),
        scheduled_at: ts,
        duration_minutes: 50,
        status: SessionStatus::Completed,
        notes: None,
        mood_rating,
        ai_content: None,
        created_at: ts,
        updated_at: ts,
    }
}

fn entry(intervention: &str, effectiveness: f64) -> InterventionEffectiveness {
    InterventionEffectiveness {
        intervention: intervention.to_string(),
        effectiveness,
        notes: None,
    }
}

#[test]
fn average_mood_of_no_sessions_is_none() {
    assert_eq!(average_mood(&[]), None);
}

#[test]
fn average_mood_ignores_unrated_sessions() {
    let sessions = vec![
        session("2024-01-01T10:00:00Z", None),
        session("2024-01-08T10:00:00Z", None),
    ];
    assert_eq!(average_mood(&sessions), None);
}

#[test]
fn average_mood_of_4_6_8_is_6() {
    let sessions = vec![
        session("2024-01-01T10:00:00Z", Some(4)),
        session("2024-01-08T10:00:00Z", Some(6)),
        session("2024-01-15T10:00:00Z", Some(8)),
    ];
    assert_eq!(average_mood(&sessions), Some(6.0));
}

#[test]
fn mood_trend_needs_two_rated_sessions() {
    assert_eq!(mood_trend(&[session("2024-01-01T10:00:00Z", Some(5))]), None);
}

#[test]
fn mood_trend_directions() {
    let improving = vec![
        session("2024-01-01T10:00:00Z", Some(3)),
        session("2024-01-15T10:00:00Z", Some(7)),
    ];
    assert_eq!(mood_trend(&improving), Some(MoodTrend::Improving));

    let declining = vec![
        session("2024-01-01T10:00:00Z", Some(8)),
        session("2024-01-15T10:00:00Z", Some(4)),
    ];
    assert_eq!(mood_trend(&declining), Some(MoodTrend::Declining));

    let stable = vec![
        session("2024-01-01T10:00:00Z", Some(6)),
        session("2024-01-15T10:00:00Z", Some(6)),
    ];
    assert_eq!(mood_trend(&stable), Some(MoodTrend::Stable));
}

#[test]
fn intervention_mean_is_sum_over_count() {
    let entries = vec![entry("CBT", 0.6), entry("CBT", 0.8), entry("EMDR", 0.5)];
    let averages = intervention_averages(&entries);

    assert_eq!(averages.len(), 2);
    let cbt = averages.iter().find(|a| a.intervention == "CBT").unwrap();
    assert_eq!(cbt.average_effectiveness, (0.6 + 0.8) / 2.0);
    assert_eq!(cbt.samples, 2);
    let emdr = averages.iter().find(|a| a.intervention == "EMDR").unwrap();
    assert_eq!(emdr.average_effectiveness, 0.5);
    assert_eq!(emdr.samples, 1);
}

#[test]
fn key_intervention_boundary_is_inclusive_at_070() {
    let entries = vec![entry("CBT", 0.70), entry("EMDR", 0.699999)];
    let averages = intervention_averages(&entries);
    let keys = key_interventions(&averages);

    assert_eq!(keys, vec!["CBT".to_string()]);
}
