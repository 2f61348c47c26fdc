use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sessia_audit::events::AuditEvent;
use sessia_core::keys;
use sessia_core::models::consent::{ConsentForm, ConsentStatus, ConsentToken};
use sessia_storage::{docs, objects};

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::routes::clients::load_owned_client;
use crate::routes::record_audit;
use crate::state::AppState;

/// Signing tokens are valid for seven days.
const TOKEN_TTL_HOURS: i64 = 7 * 24;

#[derive(Deserialize)]
pub struct CreateConsentRequest {
    pub title: String,
}

pub async fn create_consent_form(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(client_id): Path<Uuid>,
    Json(req): Json<CreateConsentRequest>,
) -> Result<Json<ConsentForm>, ApiError> {
    if req.title.trim().is_empty() {
        return Err(ApiError::BadRequest("title is required".to_string()));
    }

    let mut client = load_owned_client(&state, &user, client_id).await?;

    let now = jiff::Timestamp::now();
    let token = Uuid::new_v4().simple().to_string();
    let expires_at = now
        .saturating_add(jiff::SignedDuration::from_hours(TOKEN_TTL_HOURS))
        .expect("saturating_add of an hours-only duration is infallible");

    let form = ConsentForm {
        id: Uuid::new_v4(),
        title: req.title,
        status: ConsentStatus::Pending,
        token: Some(token.clone()),
        token_expires_at: Some(expires_at),
        signed_at: None,
        signature_name: None,
        created_at: now,
    };

    client.consent_forms.push(form.clone());
    client.updated_at = now;
    docs::save_doc(&state.s3, &state.bucket, &keys::client(client.id), &client).await?;

    let token_doc = ConsentToken {
        token: token.clone(),
        client_id,
        form_id: form.id,
        expires_at,
    };
    docs::save_doc(
        &state.s3,
        &state.bucket,
        &keys::consent_token(&token),
        &token_doc,
    )
    .await?;

    record_audit(
        &state,
        AuditEvent::new("create", "consent_form", form.id.to_string(), &user.sub),
    )
    .await;

    Ok(Json(form))
}

pub async fn list_consent_forms(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(client_id): Path<Uuid>,
) -> Result<Json<Vec<ConsentForm>>, ApiError> {
    let client = load_owned_client(&state, &user, client_id).await?;
    Ok(Json(client.consent_forms))
}

#[derive(Deserialize)]
pub struct SignRequest {
    pub token: String,
    pub signature_name: String,
}

#[derive(Serialize)]
pub struct SignResponse {
    pub title: String,
    pub status: ConsentStatus,
    pub signed_at: Option<jiff::Timestamp>,
}

/// Public endpoint: the client signs through the emailed link, outside any
/// counselor session. The token is single-use and expires.
pub async fn sign_consent_form(
    State(state): State<AppState>,
    Json(req): Json<SignRequest>,
) -> Result<Json<SignResponse>, ApiError> {
    if req.signature_name.trim().is_empty() {
        return Err(ApiError::BadRequest("signature_name is required".to_string()));
    }

    let token_key = keys::consent_token(&req.token);
    let token_doc: ConsentToken = docs::load_doc(&state.s3, &state.bucket, &token_key)
        .await
        .map_err(|e| {
            if e.is_not_found() {
                ApiError::NotFound("unknown signing token".to_string())
            } else {
                ApiError::from(e)
            }
        })?;

    let mut client: sessia_core::models::client::Client =
        docs::load_doc(&state.s3, &state.bucket, &keys::client(token_doc.client_id)).await?;

    let now = jiff::Timestamp::now();
    let form = client
        .consent_forms
        .iter_mut()
        .find(|f| f.id == token_doc.form_id)
        .ok_or_else(|| ApiError::NotFound("consent form not found".to_string()))?;

    if token_doc.is_expired(now) {
        form.status = ConsentStatus::Expired;
        form.token = None;
        form.token_expires_at = None;
        client.updated_at = now;
        docs::save_doc(&state.s3, &state.bucket, &keys::client(client.id), &client).await?;
        objects::delete_object(&state.s3, &state.bucket, &token_key).await?;
        return Err(ApiError::BadRequest("signing token expired".to_string()));
    }

    form.status = ConsentStatus::Signed;
    form.signed_at = Some(now);
    form.signature_name = Some(req.signature_name);
    form.token = None;
    form.token_expires_at = None;

    let response = SignResponse {
        title: form.title.clone(),
        status: form.status,
        signed_at: form.signed_at,
    };
    let form_id = form.id;

    client.updated_at = now;
    docs::save_doc(&state.s3, &state.bucket, &keys::client(client.id), &client).await?;
    objects::delete_object(&state.s3, &state.bucket, &token_key).await?;

    record_audit(
        &state,
        AuditEvent::new(
            "sign",
            "consent_form",
            form_id.to_string(),
            &client.counselor_sub,
        ),
    )
    .await;

    Ok(Json(response))
}
