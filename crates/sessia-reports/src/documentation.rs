//! Documentation rollup: the full chronological record for a window.
//!
//! Reads every report kind — risk entries live in assessments, low
//! effectiveness ratings in progress reports, and the report log covers
//! all five.

use aws_sdk_s3::Client as S3Client;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use sessia_core::models::ai_report::{AiReport, AiReportContent, ReportKind};
use sessia_core::models::client::Client;
use sessia_core::models::session::{Session, SessionStatus};

use crate::Attribution;
use crate::classify::{NoteCategory, classify_note};
use crate::common::{
    ClientInfo, CriticalEvent, CriticalEventKind, ReportMetadata, SignificantSession, Timeframe,
    headline, significant_sessions,
};
use crate::error::ReportsError;
use crate::fetch;
use crate::metrics::LOW_EFFECTIVENESS_THRESHOLD;
use crate::window::DateWindow;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentationReport {
    pub metadata: ReportMetadata,
    pub client_info: ClientInfo,
    pub timeframe: Timeframe,
    /// One entry per session in the window, chronological.
    pub session_records: Vec<SessionRecord>,
    /// One entry per AI report of any kind in the window, chronological.
    pub report_log: Vec<ReportLogEntry>,
    pub critical_events: Vec<CriticalEvent>,
    pub significant_sessions: Vec<SignificantSession>,
    /// Completed sessions with no documentation report generated since.
    pub undocumented_session_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub session_id: Uuid,
    pub date: Timestamp,
    pub status: SessionStatus,
    pub mood_rating: Option<u8>,
    pub note_categories: Vec<NoteCategory>,
    pub ai_summary: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportLogEntry {
    pub date: Timestamp,
    pub kind: ReportKind,
    pub headline: Option<String>,
}

pub async fn generate_documentation_report(
    s3: &S3Client,
    bucket: &str,
    client_id: Uuid,
    window: DateWindow,
    user: &Attribution,
) -> Result<DocumentationReport, ReportsError> {
    let (client, sessions, reports) = tokio::try_join!(
        fetch::fetch_client(s3, bucket, client_id),
        fetch::fetch_sessions(s3, bucket, client_id, window),
        fetch::fetch_reports(s3, bucket, client_id, &ReportKind::ALL, window),
    )?;

    info!(
        client_id = %client_id,
        session_count = sessions.len(),
        report_count = reports.len(),
        "generating documentation rollup"
    );

    Ok(build_documentation_report(
        &client, &sessions, &reports, window, user,
    ))
}

/// Pure fold over already-fetched data.
pub fn build_documentation_report(
    client: &Client,
    sessions: &[Session],
    reports: &[AiReport],
    window: DateWindow,
    user: &Attribution,
) -> DocumentationReport {
    let session_records = sessions
        .iter()
        .map(|s| SessionRecord {
            session_id: s.id,
            date: s.scheduled_at,
            status: s.status,
            mood_rating: s.mood_rating,
            note_categories: s
                .notes
                .as_deref()
                .map(|n| classify_note(n).into_iter().collect())
                .unwrap_or_default(),
            ai_summary: s.ai_content.as_ref().and_then(|a| a.summary.clone()),
        })
        .collect();

    // Reports arrive newest first; the log reads oldest first.
    let report_log = reports
        .iter()
        .rev()
        .map(|r| ReportLogEntry {
            date: r.created_at,
            kind: r.kind,
            headline: headline(&r.content),
        })
        .collect();

    let critical_events = collect_critical_events(reports);

    let undocumented_session_count = sessions
        .iter()
        .filter(|s| s.status == SessionStatus::Completed)
        .filter(|s| {
            !reports
                .iter()
                .any(|r| r.kind == ReportKind::Documentation && r.created_at >= s.scheduled_at)
        })
        .count();

    DocumentationReport {
        metadata: ReportMetadata::new(client.id, window, user),
        client_info: ClientInfo::from(client),
        timeframe: Timeframe::new(window, sessions, reports),
        session_records,
        report_log,
        critical_events,
        significant_sessions: significant_sessions(sessions),
        undocumented_session_count,
    }
}

/// Every critical event in the window: elevated risk entries from
/// assessments and low-effectiveness intervention ratings from progress
/// reports. One event per matching entry, newest report first.
fn collect_critical_events(reports: &[AiReport]) -> Vec<CriticalEvent> {
    let mut events = Vec::new();

    for report in reports {
        match &report.content {
            AiReportContent::Assessment(c) => {
                if let Some(risk) = &c.risk_assessment {
                    if risk.level.is_critical() {
                        events.push(CriticalEvent {
                            date: report.created_at,
                            category: CriticalEventKind::Risk,
                            description: format!("Elevated risk level: {}", risk.level),
                        });
                    }
                }
            }
            AiReportContent::Progress(c) => {
                let Some(tp) = &c.treatment_progress else {
                    continue;
                };
                for entry in &tp.intervention_effectiveness {
                    if entry.effectiveness < LOW_EFFECTIVENESS_THRESHOLD {
                        events.push(CriticalEvent {
                            date: report.created_at,
                            category: CriticalEventKind::LowEffectiveness,
                            description: format!(
                                "Low effectiveness intervention: {}",
                                entry.intervention
                            ),
                        });
                    }
                }
            }
            _ => {}
        }
    }

    events
}
