//! Treatment rollup: the current plan and how it evolved.
//!
//! Reads two kinds: treatment reports carry the plan itself, progress
//! reports carry the effectiveness ratings that decide which interventions
//! count as key. An empty window of treatment reports is an error; missing
//! progress reports just mean no effectiveness data.

use aws_sdk_s3::Client as S3Client;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use sessia_core::models::ai_report::{AiReport, ReportKind, TreatmentGoal};
use sessia_core::models::client::Client;
use sessia_core::models::session::Session;

use crate::Attribution;
use crate::common::{ClientInfo, ReportMetadata, Timeframe, progress_contents, treatment_contents};
use crate::error::ReportsError;
use crate::fetch;
use crate::metrics;
use crate::window::DateWindow;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreatmentReport {
    pub metadata: ReportMetadata,
    pub client_info: ClientInfo,
    pub timeframe: Timeframe,
    /// From the latest treatment report only.
    pub current_plan: CurrentPlan,
    /// One entry per treatment report in the window, newest first.
    pub plan_history: Vec<PlanHistoryEntry>,
    /// Flattened across every treatment report in the window.
    pub recommendations: Vec<String>,
    /// Interventions whose mean effectiveness across the window's progress
    /// reports reaches the key threshold.
    pub key_interventions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentPlan {
    pub goals: Vec<TreatmentGoal>,
    pub interventions: Vec<String>,
    pub modalities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanHistoryEntry {
    pub date: Timestamp,
    pub goal_titles: Vec<String>,
}

pub async fn generate_treatment_report(
    s3: &S3Client,
    bucket: &str,
    client_id: Uuid,
    window: DateWindow,
    user: &Attribution,
) -> Result<TreatmentReport, ReportsError> {
    let (client, sessions, reports) = tokio::try_join!(
        fetch::fetch_client(s3, bucket, client_id),
        fetch::fetch_sessions(s3, bucket, client_id, window),
        fetch::fetch_reports(
            s3,
            bucket,
            client_id,
            &[ReportKind::Treatment, ReportKind::Progress],
            window,
        ),
    )?;

    info!(
        client_id = %client_id,
        session_count = sessions.len(),
        report_count = reports.len(),
        "generating treatment rollup"
    );

    build_treatment_report(&client, &sessions, &reports, window, user)
}

/// Pure fold over already-fetched data. Fails when the window holds no
/// treatment reports.
pub fn build_treatment_report(
    client: &Client,
    sessions: &[Session],
    reports: &[AiReport],
    window: DateWindow,
    user: &Attribution,
) -> Result<TreatmentReport, ReportsError> {
    let treatment = treatment_contents(reports);

    let Some((_, latest)) = treatment.first() else {
        return Err(ReportsError::EmptyWindow {
            kind: ReportKind::Treatment,
        });
    };

    let current_plan = CurrentPlan {
        goals: latest.goals.clone(),
        interventions: latest.interventions.clone(),
        modalities: latest.modalities.clone(),
    };

    let plan_history = treatment
        .iter()
        .map(|(report, c)| PlanHistoryEntry {
            date: report.created_at,
            goal_titles: c.goals.iter().map(|g| g.title.clone()).collect(),
        })
        .collect();

    let recommendations = treatment
        .iter()
        .flat_map(|(_, c)| c.recommendations.iter().cloned())
        .collect();

    let effectiveness_entries = progress_contents(reports)
        .into_iter()
        .filter_map(|(_, c)| c.treatment_progress.as_ref())
        .flat_map(|tp| tp.intervention_effectiveness.iter())
        .collect::<Vec<_>>();
    let averages = metrics::intervention_averages(effectiveness_entries);
    let key_interventions = metrics::key_interventions(&averages);

    Ok(TreatmentReport {
        metadata: ReportMetadata::new(client.id, window, user).with_total_reports(treatment.len()),
        client_info: ClientInfo::from(client),
        timeframe: Timeframe::new(window, sessions, reports),
        current_plan,
        plan_history,
        recommendations,
        key_interventions,
    })
}
