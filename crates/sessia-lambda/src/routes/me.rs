use axum::extract::State;
use axum::{Extension, Json};
use serde::Deserialize;

use sessia_core::keys;
use sessia_core::models::user::User;
use sessia_storage::docs;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

async fn load_or_default(state: &AppState, user: &AuthUser) -> Result<User, ApiError> {
    match docs::load_doc(&state.s3, &state.bucket, &keys::user(&user.sub)).await {
        Ok(profile) => Ok(profile),
        Err(e) if e.is_not_found() => Ok(User {
            sub: user.sub.clone(),
            name: user.name.clone(),
            email: None,
            practice_name: None,
            updated_at: jiff::Timestamp::now(),
        }),
        Err(e) => Err(e.into()),
    }
}

pub async fn get_me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<User>, ApiError> {
    let profile = load_or_default(&state, &user).await?;
    Ok(Json(profile))
}

#[derive(Deserialize)]
pub struct UpdateMeRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub practice_name: Option<String>,
}

pub async fn update_me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<UpdateMeRequest>,
) -> Result<Json<User>, ApiError> {
    let mut profile = load_or_default(&state, &user).await?;

    if let Some(name) = req.name {
        if name.trim().is_empty() {
            return Err(ApiError::BadRequest("name cannot be empty".to_string()));
        }
        profile.name = name;
    }
    if let Some(email) = req.email {
        profile.email = Some(email);
    }
    if let Some(practice_name) = req.practice_name {
        profile.practice_name = Some(practice_name);
    }
    profile.updated_at = jiff::Timestamp::now();

    docs::save_doc(&state.s3, &state.bucket, &keys::user(&user.sub), &profile).await?;

    Ok(Json(profile))
}
