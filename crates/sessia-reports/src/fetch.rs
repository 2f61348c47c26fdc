//! The three reads every aggregator starts from.
//!
//! Client, sessions, and AI reports are independent, so the aggregators
//! issue them through one `tokio::try_join!`. Ordering contracts:
//! sessions come back ascending by `scheduled_at` (chronological, for
//! trend math), AI reports descending by `created_at` (index 0 is the
//! latest, for "current status" sections).

use aws_sdk_s3::Client as S3Client;
use uuid::Uuid;

use sessia_core::keys;
use sessia_core::models::ai_report::{AiReport, ReportKind};
use sessia_core::models::client::Client;
use sessia_core::models::session::Session;
use sessia_storage::docs;
use sessia_storage::error::StorageError;

use crate::error::ReportsError;
use crate::window::DateWindow;

/// Load the client document, mapping an absent key to `ClientNotFound`.
pub async fn fetch_client(
    s3: &S3Client,
    bucket: &str,
    client_id: Uuid,
) -> Result<Client, ReportsError> {
    docs::load_doc(s3, bucket, &keys::client(client_id))
        .await
        .map_err(|e| match e {
            StorageError::NotFound { .. } => ReportsError::ClientNotFound { client_id },
            other => ReportsError::Storage(other),
        })
}

/// Load the client's sessions inside the window, ascending by `scheduled_at`.
pub async fn fetch_sessions(
    s3: &S3Client,
    bucket: &str,
    client_id: Uuid,
    window: DateWindow,
) -> Result<Vec<Session>, ReportsError> {
    let mut sessions: Vec<Session> =
        docs::list_docs(s3, bucket, &keys::sessions_prefix(client_id)).await?;

    sessions.retain(|s| window.contains(s.scheduled_at));
    sessions.sort_by_key(|s| s.scheduled_at);

    Ok(sessions)
}

/// Load the client's AI reports of the given kinds inside the window,
/// descending by `created_at`.
pub async fn fetch_reports(
    s3: &S3Client,
    bucket: &str,
    client_id: Uuid,
    kinds: &[ReportKind],
    window: DateWindow,
) -> Result<Vec<AiReport>, ReportsError> {
    let mut reports = Vec::new();
    for kind in kinds {
        let prefix = keys::ai_reports_kind_prefix(client_id, *kind);
        let mut batch: Vec<AiReport> = docs::list_docs(s3, bucket, &prefix).await?;
        reports.append(&mut batch);
    }

    reports.retain(|r| window.contains(r.created_at));
    reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(reports)
}
