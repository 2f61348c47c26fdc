use axum::extract::State;
use axum::{Extension, Json};
use serde::Deserialize;

use sessia_audit::events::AuditEvent;
use sessia_core::keys;
use sessia_core::models::subscription::{Subscription, SubscriptionPlan, SubscriptionStatus};
use sessia_storage::docs;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::routes::record_audit;
use crate::state::AppState;

/// A counselor with no stored subscription is on an unexpired trial.
fn default_subscription(sub: &str) -> Subscription {
    Subscription {
        counselor_sub: sub.to_string(),
        plan: SubscriptionPlan::Trial,
        status: SubscriptionStatus::Trialing,
        current_period_end: None,
        updated_at: jiff::Timestamp::now(),
    }
}

async fn load_or_default(state: &AppState, sub: &str) -> Result<Subscription, ApiError> {
    match docs::load_doc(&state.s3, &state.bucket, &keys::subscription(sub)).await {
        Ok(subscription) => Ok(subscription),
        Err(e) if e.is_not_found() => Ok(default_subscription(sub)),
        Err(e) => Err(e.into()),
    }
}

pub async fn get_subscription(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Subscription>, ApiError> {
    let subscription = load_or_default(&state, &user.sub).await?;
    Ok(Json(subscription))
}

#[derive(Deserialize)]
pub struct UpdateSubscriptionRequest {
    pub plan: Option<SubscriptionPlan>,
    pub status: Option<SubscriptionStatus>,
    pub current_period_end: Option<jiff::Timestamp>,
}

/// Mirror a subscription change from the payment processor's webhook
/// relay or an admin tool. No payment logic lives here.
pub async fn update_subscription(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<UpdateSubscriptionRequest>,
) -> Result<Json<Subscription>, ApiError> {
    let mut subscription = load_or_default(&state, &user.sub).await?;

    if let Some(plan) = req.plan {
        subscription.plan = plan;
    }
    if let Some(status) = req.status {
        subscription.status = status;
    }
    if let Some(period_end) = req.current_period_end {
        subscription.current_period_end = Some(period_end);
    }
    subscription.updated_at = jiff::Timestamp::now();

    docs::save_doc(
        &state.s3,
        &state.bucket,
        &keys::subscription(&user.sub),
        &subscription,
    )
    .await?;

    record_audit(
        &state,
        AuditEvent::new("update", "subscription", &user.sub, &user.sub),
    )
    .await;

    Ok(Json(subscription))
}
