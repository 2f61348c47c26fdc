use axum::extract::{Query, State};
use axum::{Extension, Json};
use serde::Deserialize;

use sessia_audit::events::AuditRecord;
use sessia_audit::store;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

const DEFAULT_LIMIT: usize = 50;

#[derive(Deserialize)]
pub struct AuditQuery {
    pub limit: Option<usize>,
}

pub async fn list_audit(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<AuditQuery>,
) -> Result<Json<Vec<AuditRecord>>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    let records = store::list_recent(&state.s3, &state.bucket, &user.sub, limit).await?;
    Ok(Json(records))
}
