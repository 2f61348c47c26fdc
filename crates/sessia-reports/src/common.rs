//! Output sections shared by all five aggregators.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sessia_core::models::ai_report::{
    AiReport, AiReportContent, AssessmentContent, DiagnosticContent, ProgressContent,
    TreatmentContent,
};
use sessia_core::models::client::{Client, ClientStatus, RiskLevel};
use sessia_core::models::session::Session;

use crate::Attribution;
use crate::classify::{NoteCategory, classify_note};
use crate::window::DateWindow;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: Timestamp,
    pub generated_by: String,
    pub client_id: Uuid,
    pub start_date: Option<jiff::civil::Date>,
    pub end_date: Option<jiff::civil::Date>,
    /// Diagnostic and treatment rollups only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_reports: Option<usize>,
}

impl ReportMetadata {
    pub fn new(client_id: Uuid, window: DateWindow, user: &Attribution) -> Self {
        Self {
            generated_at: Timestamp::now(),
            generated_by: user.name.clone(),
            client_id,
            start_date: window.start,
            end_date: window.end,
            total_reports: None,
        }
    }

    pub fn with_total_reports(mut self, total: usize) -> Self {
        self.total_reports = Some(total);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    pub date_of_birth: Option<jiff::civil::Date>,
    pub status: ClientStatus,
    pub risk_level: Option<RiskLevel>,
}

impl From<&Client> for ClientInfo {
    fn from(client: &Client) -> Self {
        Self {
            name: client.name.clone(),
            date_of_birth: client.date_of_birth,
            status: client.status,
            risk_level: client.risk_level,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeframe {
    pub start_date: Option<jiff::civil::Date>,
    pub end_date: Option<jiff::civil::Date>,
    pub session_count: usize,
    pub report_count: usize,
}

impl Timeframe {
    pub fn new(window: DateWindow, sessions: &[Session], reports: &[AiReport]) -> Self {
        Self {
            start_date: window.start,
            end_date: window.end,
            session_count: sessions.len(),
            report_count: reports.len(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriticalEvent {
    pub date: Timestamp,
    pub category: CriticalEventKind,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriticalEventKind {
    Risk,
    LowEffectiveness,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignificantSession {
    pub session_id: Uuid,
    pub date: Timestamp,
    pub note: String,
}

/// Sessions whose notes carry a significance marker, chronological order.
pub fn significant_sessions(sessions: &[Session]) -> Vec<SignificantSession> {
    sessions
        .iter()
        .filter_map(|s| {
            let note = s.notes.as_deref()?;
            if classify_note(note).contains(&NoteCategory::Significant) {
                Some(SignificantSession {
                    session_id: s.id,
                    date: s.scheduled_at,
                    note: note.to_string(),
                })
            } else {
                None
            }
        })
        .collect()
}

/// A one-line label for a report, used in chronological logs.
pub fn headline(content: &AiReportContent) -> Option<String> {
    match content {
        AiReportContent::Assessment(c) => c.summary.clone(),
        AiReportContent::Diagnostic(c) => c.primary_diagnosis.as_ref().map(|d| d.name.clone()),
        AiReportContent::Progress(c) => c.session_summary.clone(),
        AiReportContent::Treatment(c) => c.goals.first().map(|g| g.title.clone()),
        AiReportContent::Documentation(c) => c.summary.clone(),
    }
}

/// Narrow a mixed report slice to assessment contents, preserving order.
pub fn assessment_contents(reports: &[AiReport]) -> Vec<(&AiReport, &AssessmentContent)> {
    reports
        .iter()
        .filter_map(|r| match &r.content {
            AiReportContent::Assessment(c) => Some((r, c)),
            _ => None,
        })
        .collect()
}

pub fn diagnostic_contents(reports: &[AiReport]) -> Vec<(&AiReport, &DiagnosticContent)> {
    reports
        .iter()
        .filter_map(|r| match &r.content {
            AiReportContent::Diagnostic(c) => Some((r, c)),
            _ => None,
        })
        .collect()
}

pub fn progress_contents(reports: &[AiReport]) -> Vec<(&AiReport, &ProgressContent)> {
    reports
        .iter()
        .filter_map(|r| match &r.content {
            AiReportContent::Progress(c) => Some((r, c)),
            _ => None,
        })
        .collect()
}

pub fn treatment_contents(reports: &[AiReport]) -> Vec<(&AiReport, &TreatmentContent)> {
    reports
        .iter()
        .filter_map(|r| match &r.content {
            AiReportContent::Treatment(c) => Some((r, c)),
            _ => None,
        })
        .collect()
}
