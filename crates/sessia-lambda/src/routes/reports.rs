use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::Deserialize;
use uuid::Uuid;

use sessia_audit::events::AuditEvent;
use sessia_core::keys;
use sessia_core::models::ai_report::ReportKind;
use sessia_core::models::report::Report;
use sessia_reports::window::DateWindow;
use sessia_reports::{
    Attribution, generate_assessment_report, generate_diagnostic_report,
    generate_documentation_report, generate_progress_report, generate_treatment_report,
};
use sessia_storage::{docs, objects};

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::routes::clients::load_owned_client;
use crate::routes::record_audit;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateReportRequest {
    pub kind: ReportKind,
    pub start_date: Option<jiff::civil::Date>,
    pub end_date: Option<jiff::civil::Date>,
}

/// Run the aggregator for `kind` and persist the result as a Report
/// snapshot.
pub async fn create_report(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(client_id): Path<Uuid>,
    Json(req): Json<CreateReportRequest>,
) -> Result<Json<Report>, ApiError> {
    // Tenancy check up front; the aggregators themselves only know how to
    // say "client missing".
    load_owned_client(&state, &user, client_id).await?;

    let window = DateWindow::new(req.start_date, req.end_date);
    let attribution = Attribution {
        name: user.name.clone(),
    };

    let content = run_aggregator(&state, client_id, req.kind, window, &attribution).await?;

    let report = Report {
        id: Uuid::new_v4(),
        client_id,
        counselor_sub: user.sub.clone(),
        kind: req.kind,
        start_date: req.start_date,
        end_date: req.end_date,
        content,
        created_by: user.name.clone(),
        created_at: jiff::Timestamp::now(),
    };

    docs::save_doc(
        &state.s3,
        &state.bucket,
        &keys::report(client_id, report.id),
        &report,
    )
    .await?;

    record_audit(
        &state,
        AuditEvent::new("create", "report", report.id.to_string(), &user.sub)
            .with_details(serde_json::json!({ "kind": req.kind })),
    )
    .await;

    Ok(Json(report))
}

async fn run_aggregator(
    state: &AppState,
    client_id: Uuid,
    kind: ReportKind,
    window: DateWindow,
    user: &Attribution,
) -> Result<serde_json::Value, ApiError> {
    let s3 = &state.s3;
    let bucket = &state.bucket;

    let value = match kind {
        ReportKind::Assessment => {
            let report = generate_assessment_report(s3, bucket, client_id, window, user).await?;
            serde_json::to_value(report)
        }
        ReportKind::Diagnostic => {
            let report = generate_diagnostic_report(s3, bucket, client_id, window, user).await?;
            serde_json::to_value(report)
        }
        ReportKind::Progress => {
            let report = generate_progress_report(s3, bucket, client_id, window, user).await?;
            serde_json::to_value(report)
        }
        ReportKind::Treatment => {
            let report = generate_treatment_report(s3, bucket, client_id, window, user).await?;
            serde_json::to_value(report)
        }
        ReportKind::Documentation => {
            let report =
                generate_documentation_report(s3, bucket, client_id, window, user).await?;
            serde_json::to_value(report)
        }
    };

    value.map_err(|e| ApiError::Internal(e.to_string()))
}

pub async fn list_reports(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(client_id): Path<Uuid>,
) -> Result<Json<Vec<Report>>, ApiError> {
    load_owned_client(&state, &user, client_id).await?;

    let mut reports: Vec<Report> =
        docs::list_docs(&state.s3, &state.bucket, &keys::reports_prefix(client_id)).await?;
    reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(Json(reports))
}

async fn load_owned_report(
    state: &AppState,
    user: &AuthUser,
    client_id: Uuid,
    report_id: Uuid,
) -> Result<Report, ApiError> {
    let report: Report =
        docs::load_doc(&state.s3, &state.bucket, &keys::report(client_id, report_id))
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    ApiError::NotFound(format!("report not found: {report_id}"))
                } else {
                    ApiError::from(e)
                }
            })?;

    if report.counselor_sub != user.sub {
        return Err(ApiError::NotFound(format!("report not found: {report_id}")));
    }

    Ok(report)
}

pub async fn get_report(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((client_id, report_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Report>, ApiError> {
    let report = load_owned_report(&state, &user, client_id, report_id).await?;
    Ok(Json(report))
}

pub async fn delete_report(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((client_id, report_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<()>, ApiError> {
    let report = load_owned_report(&state, &user, client_id, report_id).await?;

    objects::delete_object(
        &state.s3,
        &state.bucket,
        &keys::report(client_id, report.id),
    )
    .await?;

    record_audit(
        &state,
        AuditEvent::new("delete", "report", report.id.to_string(), &user.sub),
    )
    .await;

    Ok(Json(()))
}
