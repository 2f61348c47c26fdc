use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::Deserialize;
use uuid::Uuid;

use sessia_audit::events::AuditEvent;
use sessia_core::keys;
use sessia_core::models::client::{Client, ClientStatus};
use sessia_storage::{docs, objects};

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::routes::record_audit;
use crate::state::AppState;

/// Load a client and enforce tenancy. A client owned by another counselor
/// is indistinguishable from a missing one.
pub async fn load_owned_client(
    state: &AppState,
    user: &AuthUser,
    client_id: Uuid,
) -> Result<Client, ApiError> {
    let client: Client = docs::load_doc(&state.s3, &state.bucket, &keys::client(client_id))
        .await
        .map_err(|e| {
            if e.is_not_found() {
                ApiError::NotFound(format!("client not found: {client_id}"))
            } else {
                ApiError::from(e)
            }
        })?;

    if client.counselor_sub != user.sub {
        return Err(ApiError::NotFound(format!("client not found: {client_id}")));
    }

    Ok(client)
}

pub async fn list_clients(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Client>>, ApiError> {
    let mut clients: Vec<Client> =
        docs::list_docs(&state.s3, &state.bucket, keys::CLIENTS_PREFIX).await?;

    clients.retain(|c| c.counselor_sub == user.sub);
    clients.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(Json(clients))
}

#[derive(Deserialize)]
pub struct CreateClientRequest {
    pub name: String,
    pub date_of_birth: Option<jiff::civil::Date>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

pub async fn create_client(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateClientRequest>,
) -> Result<Json<Client>, ApiError> {
    if req.name.trim().is_empty() {
        return Err(ApiError::BadRequest("name is required".to_string()));
    }

    let now = jiff::Timestamp::now();
    let client = Client {
        id: Uuid::new_v4(),
        counselor_sub: user.sub.clone(),
        name: req.name,
        date_of_birth: req.date_of_birth,
        email: req.email,
        phone: req.phone,
        status: ClientStatus::Active,
        risk_level: None,
        consent_forms: Vec::new(),
        billing: Default::default(),
        created_at: now,
        updated_at: now,
    };

    docs::save_doc(&state.s3, &state.bucket, &keys::client(client.id), &client).await?;

    record_audit(
        &state,
        AuditEvent::new("create", "client", client.id.to_string(), &user.sub),
    )
    .await;

    Ok(Json(client))
}

pub async fn get_client(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(client_id): Path<Uuid>,
) -> Result<Json<Client>, ApiError> {
    let client = load_owned_client(&state, &user, client_id).await?;
    Ok(Json(client))
}

#[derive(Deserialize)]
pub struct UpdateClientRequest {
    pub name: Option<String>,
    pub date_of_birth: Option<jiff::civil::Date>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: Option<ClientStatus>,
}

pub async fn update_client(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(client_id): Path<Uuid>,
    Json(req): Json<UpdateClientRequest>,
) -> Result<Json<Client>, ApiError> {
    let mut client = load_owned_client(&state, &user, client_id).await?;

    if let Some(name) = req.name {
        if name.trim().is_empty() {
            return Err(ApiError::BadRequest("name cannot be empty".to_string()));
        }
        client.name = name;
    }
    if let Some(dob) = req.date_of_birth {
        client.date_of_birth = Some(dob);
    }
    if let Some(email) = req.email {
        client.email = Some(email);
    }
    if let Some(phone) = req.phone {
        client.phone = Some(phone);
    }
    if let Some(status) = req.status {
        client.status = status;
    }
    client.updated_at = jiff::Timestamp::now();

    docs::save_doc(&state.s3, &state.bucket, &keys::client(client.id), &client).await?;

    record_audit(
        &state,
        AuditEvent::new("update", "client", client.id.to_string(), &user.sub),
    )
    .await;

    Ok(Json(client))
}

/// Delete a client and everything under it.
///
/// The dependent collections are cleaned up best-effort: a failure is
/// logged and the cascade continues, so a half-failed delete leaves
/// orphaned objects rather than a half-deleted client document.
pub async fn delete_client(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(client_id): Path<Uuid>,
) -> Result<Json<()>, ApiError> {
    let client = load_owned_client(&state, &user, client_id).await?;

    let prefixes = [
        keys::sessions_prefix(client_id),
        keys::ai_reports_prefix(client_id),
        keys::reports_prefix(client_id),
        keys::invoices_prefix(client_id),
    ];
    for prefix in &prefixes {
        if let Err(e) = objects::delete_prefix(&state.s3, &state.bucket, prefix).await {
            tracing::warn!(prefix = %prefix, "cascade delete failed, continuing: {e}");
        }
    }

    objects::delete_object(&state.s3, &state.bucket, &keys::client(client.id)).await?;

    record_audit(
        &state,
        AuditEvent::new("delete", "client", client.id.to_string(), &user.sub),
    )
    .await;

    Ok(Json(()))
}
