use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use serde::Deserialize;
use uuid::Uuid;

use sessia_audit::events::AuditEvent;
use sessia_core::keys;
use sessia_core::models::ai_report::{AiReport, AiReportContent, ReportKind};
use sessia_core::models::session::{Session, SessionAiContent};
use sessia_storage::docs;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::routes::clients::load_owned_client;
use crate::routes::record_audit;
use crate::state::AppState;

/// How many recent sessions are folded into the prompt context.
const CONTEXT_SESSION_LIMIT: usize = 10;

#[derive(Deserialize)]
pub struct GenerateRequest {
    /// Documentation runs may target one session; its record gets the
    /// generated summary attached.
    pub session_id: Option<Uuid>,
    pub instructions: Option<String>,
    pub model_id: Option<String>,
}

pub async fn generate(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((client_id, kind)): Path<(Uuid, String)>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<AiReport>, ApiError> {
    let kind: ReportKind = kind.parse()?;

    let client = load_owned_client(&state, &user, client_id).await?;

    let mut sessions: Vec<Session> =
        docs::list_docs(&state.s3, &state.bucket, &keys::sessions_prefix(client_id)).await?;
    sessions.sort_by_key(|s| s.scheduled_at);
    if sessions.len() > CONTEXT_SESSION_LIMIT {
        sessions.drain(..sessions.len() - CONTEXT_SESSION_LIMIT);
    }

    let model_id = req.model_id.as_deref().unwrap_or(&state.model_id);

    let content = sessia_bedrock::generate::generate_report_content(
        &state.aws_config,
        model_id,
        kind,
        &client,
        &sessions,
        req.instructions.as_deref(),
    )
    .await?;

    let report = AiReport {
        id: Uuid::new_v4(),
        client_id,
        counselor_sub: user.sub.clone(),
        kind,
        content,
        model_id: model_id.to_string(),
        created_at: jiff::Timestamp::now(),
    };

    docs::save_doc(
        &state.s3,
        &state.bucket,
        &keys::ai_report(client_id, kind, report.id),
        &report,
    )
    .await?;

    cache_derived_state(&state, &user, &client, &report, req.session_id).await?;

    record_audit(
        &state,
        AuditEvent::new("generate", "ai_report", report.id.to_string(), &user.sub)
            .with_details(serde_json::json!({ "kind": kind })),
    )
    .await;

    Ok(Json(report))
}

/// Write back the derived fields an agent run produces: the cached client
/// risk level after an assessment, and the per-session summary after a
/// targeted documentation run.
async fn cache_derived_state(
    state: &AppState,
    user: &AuthUser,
    client: &sessia_core::models::client::Client,
    report: &AiReport,
    session_id: Option<Uuid>,
) -> Result<(), ApiError> {
    match &report.content {
        AiReportContent::Assessment(c) => {
            if let Some(risk) = &c.risk_assessment {
                let mut updated = client.clone();
                updated.risk_level = Some(risk.level);
                updated.updated_at = jiff::Timestamp::now();
                docs::save_doc(
                    &state.s3,
                    &state.bucket,
                    &keys::client(updated.id),
                    &updated,
                )
                .await?;
            }
        }
        AiReportContent::Documentation(c) => {
            let Some(session_id) = session_id else {
                return Ok(());
            };
            let key = keys::session(client.id, session_id);
            let mut session: Session = docs::load_doc(&state.s3, &state.bucket, &key)
                .await
                .map_err(|e| {
                    if e.is_not_found() {
                        ApiError::NotFound(format!("session not found: {session_id}"))
                    } else {
                        ApiError::from(e)
                    }
                })?;
            if session.counselor_sub != user.sub {
                return Err(ApiError::NotFound(format!(
                    "session not found: {session_id}"
                )));
            }

            session.ai_content = Some(SessionAiContent {
                report_id: report.id,
                summary: c.summary.clone(),
                model_id: report.model_id.clone(),
                generated_at: report.created_at,
            });
            session.updated_at = jiff::Timestamp::now();
            docs::save_doc(&state.s3, &state.bucket, &key, &session).await?;
        }
        _ => {}
    }

    Ok(())
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub kind: Option<String>,
}

pub async fn list_reports(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(client_id): Path<Uuid>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<AiReport>>, ApiError> {
    load_owned_client(&state, &user, client_id).await?;

    let prefix = match &query.kind {
        Some(kind) => {
            let kind: ReportKind = kind.parse()?;
            keys::ai_reports_kind_prefix(client_id, kind)
        }
        None => keys::ai_reports_prefix(client_id),
    };

    let mut reports: Vec<AiReport> = docs::list_docs(&state.s3, &state.bucket, &prefix).await?;
    reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(Json(reports))
}
