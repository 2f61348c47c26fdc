use std::time::Duration;

use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sessia_audit::events::AuditEvent;
use sessia_core::keys;
use sessia_core::models::invoice::{Invoice, InvoiceStatus};
use sessia_storage::{docs, objects};

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::routes::clients::load_owned_client;
use crate::routes::record_audit;
use crate::state::AppState;

const PRESIGN_TTL: Duration = Duration::from_secs(15 * 60);

#[derive(Deserialize)]
pub struct CreateInvoiceRequest {
    pub number: String,
    pub amount_cents: i64,
    pub currency: Option<String>,
    pub due_date: Option<jiff::civil::Date>,
}

pub async fn create_invoice(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(client_id): Path<Uuid>,
    Json(req): Json<CreateInvoiceRequest>,
) -> Result<Json<Invoice>, ApiError> {
    if req.number.trim().is_empty() {
        return Err(ApiError::BadRequest("number is required".to_string()));
    }
    if req.amount_cents < 0 {
        return Err(ApiError::BadRequest(
            "amount_cents cannot be negative".to_string(),
        ));
    }

    let mut client = load_owned_client(&state, &user, client_id).await?;

    let invoice = Invoice {
        id: Uuid::new_v4(),
        number: req.number,
        amount_cents: req.amount_cents,
        currency: req.currency.unwrap_or_else(|| "usd".to_string()),
        status: InvoiceStatus::Draft,
        issued_at: jiff::Timestamp::now(),
        due_date: req.due_date,
        pdf_key: None,
    };

    client.billing.invoices.push(invoice.clone());
    client.updated_at = jiff::Timestamp::now();
    docs::save_doc(&state.s3, &state.bucket, &keys::client(client.id), &client).await?;

    record_audit(
        &state,
        AuditEvent::new("create", "invoice", invoice.id.to_string(), &user.sub),
    )
    .await;

    Ok(Json(invoice))
}

pub async fn list_invoices(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(client_id): Path<Uuid>,
) -> Result<Json<Vec<Invoice>>, ApiError> {
    let client = load_owned_client(&state, &user, client_id).await?;
    Ok(Json(client.billing.invoices))
}

#[derive(Serialize)]
pub struct PresignedUrl {
    pub url: String,
}

/// Presigned PUT for attaching the rendered PDF to an invoice.
pub async fn upload_url(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((client_id, invoice_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<PresignedUrl>, ApiError> {
    let mut client = load_owned_client(&state, &user, client_id).await?;

    let pdf_key = keys::invoice_pdf(client_id, invoice_id);
    let invoice = client
        .billing
        .invoices
        .iter_mut()
        .find(|i| i.id == invoice_id)
        .ok_or_else(|| ApiError::NotFound(format!("invoice not found: {invoice_id}")))?;

    invoice.pdf_key = Some(pdf_key.clone());
    client.updated_at = jiff::Timestamp::now();
    docs::save_doc(&state.s3, &state.bucket, &keys::client(client.id), &client).await?;

    let url = objects::presign_put(
        &state.s3,
        &state.bucket,
        &pdf_key,
        Some("application/pdf"),
        PRESIGN_TTL,
    )
    .await?;

    Ok(Json(PresignedUrl { url }))
}

/// Presigned GET for reading an invoice's PDF.
pub async fn download_url(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((client_id, invoice_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<PresignedUrl>, ApiError> {
    let client = load_owned_client(&state, &user, client_id).await?;

    let invoice = client
        .billing
        .invoices
        .iter()
        .find(|i| i.id == invoice_id)
        .ok_or_else(|| ApiError::NotFound(format!("invoice not found: {invoice_id}")))?;

    let pdf_key = invoice
        .pdf_key
        .as_deref()
        .ok_or_else(|| ApiError::NotFound("invoice has no file".to_string()))?;

    let url = objects::presign_get(&state.s3, &state.bucket, pdf_key, PRESIGN_TTL).await?;

    Ok(Json(PresignedUrl { url }))
}

/// Outcome of the file-cleanup phase of an invoice removal.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileCleanup {
    Removed,
    NoFile,
    Failed { error: String },
}

#[derive(Serialize)]
pub struct InvoiceRemoval {
    pub record_removed: bool,
    pub file_cleanup: FileCleanup,
}

/// Two-phase invoice removal.
///
/// Phase one deletes the attached PDF; a failure there is reported in the
/// response but never blocks phase two, which removes the embedded record.
pub async fn delete_invoice(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((client_id, invoice_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<InvoiceRemoval>, ApiError> {
    let mut client = load_owned_client(&state, &user, client_id).await?;

    let invoice = client
        .billing
        .invoices
        .iter()
        .find(|i| i.id == invoice_id)
        .ok_or_else(|| ApiError::NotFound(format!("invoice not found: {invoice_id}")))?;

    let file_cleanup = match invoice.pdf_key.as_deref() {
        Some(pdf_key) => {
            match objects::delete_object(&state.s3, &state.bucket, pdf_key).await {
                Ok(()) => FileCleanup::Removed,
                Err(e) => {
                    tracing::warn!(pdf_key, "invoice file cleanup failed: {e}");
                    FileCleanup::Failed {
                        error: e.to_string(),
                    }
                }
            }
        }
        None => FileCleanup::NoFile,
    };

    client.billing.invoices.retain(|i| i.id != invoice_id);
    client.updated_at = jiff::Timestamp::now();
    docs::save_doc(&state.s3, &state.bucket, &keys::client(client.id), &client).await?;

    record_audit(
        &state,
        AuditEvent::new("delete", "invoice", invoice_id.to_string(), &user.sub),
    )
    .await;

    Ok(Json(InvoiceRemoval {
        record_removed: true,
        file_cleanup,
    }))
}
