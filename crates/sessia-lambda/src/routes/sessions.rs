use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::Deserialize;
use uuid::Uuid;

use sessia_audit::events::AuditEvent;
use sessia_core::keys;
use sessia_core::models::session::{Session, SessionStatus};
use sessia_storage::{docs, objects};

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::routes::clients::load_owned_client;
use crate::routes::record_audit;
use crate::state::AppState;

async fn load_owned_session(
    state: &AppState,
    user: &AuthUser,
    client_id: Uuid,
    session_id: Uuid,
) -> Result<Session, ApiError> {
    let session: Session =
        docs::load_doc(&state.s3, &state.bucket, &keys::session(client_id, session_id))
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

    Ok(session)
}

fn validate_mood(rating: u8) -> Result<(), ApiError> {
    if !(1..=10).contains(&rating) {
        return Err(ApiError::BadRequest(format!(
            "mood_rating must be between 1 and 10, got {rating}"
        )));
    }
    Ok(())
}

pub async fn list_sessions(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(client_id): Path<Uuid>,
) -> Result<Json<Vec<Session>>, ApiError> {
    load_owned_client(&state, &user, client_id).await?;

    let mut sessions: Vec<Session> =
        docs::list_docs(&state.s3, &state.bucket, &keys::sessions_prefix(client_id)).await?;
    sessions.sort_by_key(|s| s.scheduled_at);

    Ok(Json(sessions))
}

#[derive(Deserialize)]
pub struct CreateSessionRequest {
    pub scheduled_at: jiff::Timestamp,
    pub duration_minutes: u32,
    pub notes: Option<String>,
}

pub async fn create_session(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(client_id): Path<Uuid>,
    Json(req): Json<CreateSessionRequest>,
) -> Result<Json<Session>, ApiError> {
    load_owned_client(&state, &user, client_id).await?;

    let now = jiff::Timestamp::now();
    let session = Session {
        id: Uuid::new_v4(),
        client_id,
        counselor_sub: user.sub.clone(),
        scheduled_at: req.scheduled_at,
        duration_minutes: req.duration_minutes,
        status: SessionStatus::Scheduled,
        notes: req.notes,
        mood_rating: None,
        ai_content: None,
        created_at: now,
        updated_at: now,
    };

    docs::save_doc(
        &state.s3,
        &state.bucket,
        &keys::session(client_id, session.id),
        &session,
    )
    .await?;

    record_audit(
        &state,
        AuditEvent::new("create", "session", session.id.to_string(), &user.sub),
    )
    .await;

    Ok(Json(session))
}

pub async fn get_session(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((client_id, session_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Session>, ApiError> {
    let session = load_owned_session(&state, &user, client_id, session_id).await?;
    Ok(Json(session))
}

#[derive(Deserialize)]
pub struct UpdateSessionRequest {
    pub scheduled_at: Option<jiff::Timestamp>,
    pub duration_minutes: Option<u32>,
    pub notes: Option<String>,
    pub mood_rating: Option<u8>,
}

pub async fn update_session(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((client_id, session_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<UpdateSessionRequest>,
) -> Result<Json<Session>, ApiError> {
    let mut session = load_owned_session(&state, &user, client_id, session_id).await?;

    if let Some(scheduled_at) = req.scheduled_at {
        session.scheduled_at = scheduled_at;
    }
    if let Some(duration) = req.duration_minutes {
        session.duration_minutes = duration;
    }
    if let Some(notes) = req.notes {
        session.notes = Some(notes);
    }
    if let Some(rating) = req.mood_rating {
        validate_mood(rating)?;
        session.mood_rating = Some(rating);
    }
    session.updated_at = jiff::Timestamp::now();

    docs::save_doc(
        &state.s3,
        &state.bucket,
        &keys::session(client_id, session.id),
        &session,
    )
    .await?;

    record_audit(
        &state,
        AuditEvent::new("update", "session", session.id.to_string(), &user.sub),
    )
    .await;

    Ok(Json(session))
}

#[derive(Deserialize)]
pub struct SetStatusRequest {
    pub status: SessionStatus,
}

pub async fn set_session_status(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((client_id, session_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<SetStatusRequest>,
) -> Result<Json<Session>, ApiError> {
    let mut session = load_owned_session(&state, &user, client_id, session_id).await?;

    if !session.status.can_transition_to(req.status) {
        return Err(ApiError::BadRequest(format!(
            "invalid status transition: {} -> {}",
            session.status, req.status
        )));
    }

    session.status = req.status;
    session.updated_at = jiff::Timestamp::now();

    docs::save_doc(
        &state.s3,
        &state.bucket,
        &keys::session(client_id, session.id),
        &session,
    )
    .await?;

    record_audit(
        &state,
        AuditEvent::new(
            "set_status",
            "session",
            session.id.to_string(),
            &user.sub,
        )
        .with_details(serde_json::json!({ "status": req.status })),
    )
    .await;

    Ok(Json(session))
}

/// Hard-delete a session. Admin only — the aggregators never delete, and
/// counselors cancel instead.
pub async fn delete_session(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((client_id, session_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<()>, ApiError> {
    if !user.is_admin() {
        return Err(ApiError::Forbidden(
            "session deletion requires the admin role".to_string(),
        ));
    }

    let session = load_owned_session(&state, &user, client_id, session_id).await?;

    objects::delete_object(
        &state.s3,
        &state.bucket,
        &keys::session(client_id, session.id),
    )
    .await?;

    record_audit(
        &state,
        AuditEvent::new("delete", "session", session.id.to_string(), &user.sub),
    )
    .await;

    Ok(Json(()))
}
