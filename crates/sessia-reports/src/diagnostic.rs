//! Diagnostic rollup: current diagnosis plus diagnosis history.
//!
//! Unlike the assessment rollup, an empty window is an error here — a
//! diagnostic summary over nothing is meaningless, and callers rely on the
//! distinct message to differentiate "client missing" from "no data".

use aws_sdk_s3::Client as S3Client;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use sessia_core::models::ai_report::{AiReport, Diagnosis, ReportKind};
use sessia_core::models::client::Client;
use sessia_core::models::session::Session;

use crate::Attribution;
use crate::common::{ClientInfo, ReportMetadata, Timeframe, diagnostic_contents};
use crate::error::ReportsError;
use crate::fetch;
use crate::window::DateWindow;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticReport {
    pub metadata: ReportMetadata,
    pub client_info: ClientInfo,
    pub timeframe: Timeframe,
    /// From the latest diagnostic report only.
    pub current_diagnosis: CurrentDiagnosis,
    /// One entry per diagnostic report in the window, newest first.
    pub history: Vec<DiagnosisHistoryEntry>,
    /// Flattened across every diagnostic report in the window.
    pub clinical_impressions: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentDiagnosis {
    pub primary: Option<Diagnosis>,
    pub differentials: Vec<Diagnosis>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosisHistoryEntry {
    pub date: Timestamp,
    pub primary: Option<String>,
}

pub async fn generate_diagnostic_report(
    s3: &S3Client,
    bucket: &str,
    client_id: Uuid,
    window: DateWindow,
    user: &Attribution,
) -> Result<DiagnosticReport, ReportsError> {
    let (client, sessions, reports) = tokio::try_join!(
        fetch::fetch_client(s3, bucket, client_id),
        fetch::fetch_sessions(s3, bucket, client_id, window),
        fetch::fetch_reports(s3, bucket, client_id, &[ReportKind::Diagnostic], window),
    )?;

    info!(
        client_id = %client_id,
        session_count = sessions.len(),
        report_count = reports.len(),
        "generating diagnostic rollup"
    );

    build_diagnostic_report(&client, &sessions, &reports, window, user)
}

/// Pure fold over already-fetched data. Fails on an empty report set.
pub fn build_diagnostic_report(
    client: &Client,
    sessions: &[Session],
    reports: &[AiReport],
    window: DateWindow,
    user: &Attribution,
) -> Result<DiagnosticReport, ReportsError> {
    let contents = diagnostic_contents(reports);

    let Some((_, latest)) = contents.first() else {
        return Err(ReportsError::EmptyWindow {
            kind: ReportKind::Diagnostic,
        });
    };

    let current_diagnosis = CurrentDiagnosis {
        primary: latest.primary_diagnosis.clone(),
        differentials: latest.differential_diagnoses.clone(),
    };

    let history = contents
        .iter()
        .map(|(report, c)| DiagnosisHistoryEntry {
            date: report.created_at,
            primary: c.primary_diagnosis.as_ref().map(|d| d.name.clone()),
        })
        .collect();

    let clinical_impressions = contents
        .iter()
        .flat_map(|(_, c)| c.clinical_impressions.iter().cloned())
        .collect();

    let recommendations = contents
        .iter()
        .flat_map(|(_, c)| c.recommendations.iter().cloned())
        .collect();

    Ok(DiagnosticReport {
        metadata: ReportMetadata::new(client.id, window, user).with_total_reports(contents.len()),
        client_info: ClientInfo::from(client),
        timeframe: Timeframe::new(window, sessions, reports),
        current_diagnosis,
        history,
        clinical_impressions,
        recommendations,
    })
}
