//! Progress rollup: mood, goal movement, and intervention effectiveness.

use aws_sdk_s3::Client as S3Client;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use sessia_core::models::ai_report::{AiReport, GoalProgress, ReportKind};
use sessia_core::models::client::Client;
use sessia_core::models::session::Session;

use crate::Attribution;
use crate::classify::{NoteCategory, classify_note};
use crate::common::{ClientInfo, ReportMetadata, Timeframe, progress_contents};
use crate::error::ReportsError;
use crate::fetch;
use crate::metrics::{self, InterventionAverage, MoodTrend};
use crate::window::DateWindow;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressReport {
    pub metadata: ReportMetadata,
    pub client_info: ClientInfo,
    pub timeframe: Timeframe,
    pub mood: MoodSummary,
    /// From the latest progress report only.
    pub goal_progress: Vec<GoalProgress>,
    /// Per-intervention means across every progress report in the window.
    pub intervention_effectiveness: Vec<InterventionAverage>,
    pub key_interventions: Vec<String>,
    /// Session notes bucketed by the keyword classifier. A note can appear
    /// in both buckets.
    pub progress_updates: Vec<NoteEntry>,
    pub challenges: Vec<NoteEntry>,
    /// Flattened across every progress report in the window.
    pub improvements: Vec<String>,
    pub setbacks: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodSummary {
    pub average_rating: Option<f64>,
    pub trend: Option<MoodTrend>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteEntry {
    pub session_id: Uuid,
    pub date: Timestamp,
    pub note: String,
}

pub async fn generate_progress_report(
    s3: &S3Client,
    bucket: &str,
    client_id: Uuid,
    window: DateWindow,
    user: &Attribution,
) -> Result<ProgressReport, ReportsError> {
    let (client, sessions, reports) = tokio::try_join!(
        fetch::fetch_client(s3, bucket, client_id),
        fetch::fetch_sessions(s3, bucket, client_id, window),
        fetch::fetch_reports(s3, bucket, client_id, &[ReportKind::Progress], window),
    )?;

    info!(
        client_id = %client_id,
        session_count = sessions.len(),
        report_count = reports.len(),
        "generating progress rollup"
    );

    Ok(build_progress_report(
        &client, &sessions, &reports, window, user,
    ))
}

/// Pure fold over already-fetched data.
pub fn build_progress_report(
    client: &Client,
    sessions: &[Session],
    reports: &[AiReport],
    window: DateWindow,
    user: &Attribution,
) -> ProgressReport {
    let contents = progress_contents(reports);

    let mood = MoodSummary {
        average_rating: metrics::average_mood(sessions),
        trend: metrics::mood_trend(sessions),
    };

    let goal_progress = contents
        .first()
        .and_then(|(_, c)| c.treatment_progress.as_ref())
        .map(|tp| tp.goal_progress.clone())
        .unwrap_or_default();

    let effectiveness_entries = contents
        .iter()
        .filter_map(|(_, c)| c.treatment_progress.as_ref())
        .flat_map(|tp| tp.intervention_effectiveness.iter());
    let intervention_effectiveness = metrics::intervention_averages(effectiveness_entries);
    let key_interventions = metrics::key_interventions(&intervention_effectiveness);

    let progress_updates = notes_in_category(sessions, NoteCategory::Progress);
    let challenges = notes_in_category(sessions, NoteCategory::Challenge);

    let improvements = contents
        .iter()
        .flat_map(|(_, c)| c.improvements.iter().cloned())
        .collect();

    let setbacks = contents
        .iter()
        .flat_map(|(_, c)| c.setbacks.iter().cloned())
        .collect();

    ProgressReport {
        metadata: ReportMetadata::new(client.id, window, user),
        client_info: ClientInfo::from(client),
        timeframe: Timeframe::new(window, sessions, reports),
        mood,
        goal_progress,
        intervention_effectiveness,
        key_interventions,
        progress_updates,
        challenges,
        improvements,
        setbacks,
    }
}

fn notes_in_category(sessions: &[Session], category: NoteCategory) -> Vec<NoteEntry> {
    sessions
        .iter()
        .filter_map(|s| {
            let note = s.notes.as_deref()?;
            classify_note(note).contains(&category).then(|| NoteEntry {
                session_id: s.id,
                date: s.scheduled_at,
                note: note.to_string(),
            })
        })
        .collect()
}
