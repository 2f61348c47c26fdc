//! Assessment rollup: current clinical picture plus assessment history.

use aws_sdk_s3::Client as S3Client;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use sessia_core::models::ai_report::{AiReport, ReportKind};
use sessia_core::models::client::{Client, RiskLevel};
use sessia_core::models::session::Session;

use crate::Attribution;
use crate::common::{
    ClientInfo, CriticalEvent, CriticalEventKind, ReportMetadata, SignificantSession, Timeframe,
    assessment_contents, significant_sessions,
};
use crate::error::ReportsError;
use crate::fetch;
use crate::metrics;
use crate::window::DateWindow;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentReport {
    pub metadata: ReportMetadata,
    pub client_info: ClientInfo,
    pub timeframe: Timeframe,
    /// From the latest assessment only. Absent when the window holds none.
    pub current_status: Option<AssessmentStatus>,
    /// One entry per assessment in the window, newest first.
    pub history: Vec<AssessmentHistoryEntry>,
    /// Flattened across every assessment in the window.
    pub findings: Vec<String>,
    pub recommendations: Vec<String>,
    pub session_overview: SessionOverview,
    pub critical_events: Vec<CriticalEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentStatus {
    pub summary: Option<String>,
    pub risk_level: Option<RiskLevel>,
    pub presenting_concerns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentHistoryEntry {
    pub date: Timestamp,
    pub summary: Option<String>,
    pub risk_level: Option<RiskLevel>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionOverview {
    pub total_sessions: usize,
    pub average_mood_rating: Option<f64>,
    pub significant_sessions: Vec<SignificantSession>,
}

pub async fn generate_assessment_report(
    s3: &S3Client,
    bucket: &str,
    client_id: Uuid,
    window: DateWindow,
    user: &Attribution,
) -> Result<AssessmentReport, ReportsError> {
    let (client, sessions, reports) = tokio::try_join!(
        fetch::fetch_client(s3, bucket, client_id),
        fetch::fetch_sessions(s3, bucket, client_id, window),
        fetch::fetch_reports(s3, bucket, client_id, &[ReportKind::Assessment], window),
    )?;

    info!(
        client_id = %client_id,
        session_count = sessions.len(),
        report_count = reports.len(),
        "generating assessment rollup"
    );

    Ok(build_assessment_report(
        &client, &sessions, &reports, window, user,
    ))
}

/// Pure fold over already-fetched data.
pub fn build_assessment_report(
    client: &Client,
    sessions: &[Session],
    reports: &[AiReport],
    window: DateWindow,
    user: &Attribution,
) -> AssessmentReport {
    let contents = assessment_contents(reports);

    let current_status = contents.first().map(|(_, c)| AssessmentStatus {
        summary: c.summary.clone(),
        risk_level: c.risk_assessment.as_ref().map(|r| r.level),
        presenting_concerns: c.presenting_concerns.clone(),
    });

    let history = contents
        .iter()
        .map(|(report, c)| AssessmentHistoryEntry {
            date: report.created_at,
            summary: c.summary.clone(),
            risk_level: c.risk_assessment.as_ref().map(|r| r.level),
        })
        .collect();

    let findings = contents
        .iter()
        .flat_map(|(_, c)| c.findings.iter().cloned())
        .collect();

    let recommendations = contents
        .iter()
        .flat_map(|(_, c)| c.recommendations.iter().cloned())
        .collect();

    let session_overview = SessionOverview {
        total_sessions: sessions.len(),
        average_mood_rating: metrics::average_mood(sessions),
        significant_sessions: significant_sessions(sessions),
    };

    let critical_events = contents
        .iter()
        .filter_map(|(report, c)| {
            let risk = c.risk_assessment.as_ref()?;
            risk.level.is_critical().then(|| CriticalEvent {
                date: report.created_at,
                category: CriticalEventKind::Risk,
                description: format!("Elevated risk level: {}", risk.level),
            })
        })
        .collect();

    AssessmentReport {
        metadata: ReportMetadata::new(client.id, window, user),
        client_info: ClientInfo::from(client),
        timeframe: Timeframe::new(window, sessions, reports),
        current_status,
        history,
        findings,
        recommendations,
        session_overview,
        critical_events,
    }
}
