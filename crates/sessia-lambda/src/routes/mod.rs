pub mod ai;
pub mod audit;
pub mod clients;
pub mod consent;
pub mod health;
pub mod invoices;
pub mod me;
pub mod reports;
pub mod sessions;
pub mod subscriptions;

use sessia_audit::events::AuditEvent;

use crate::state::AppState;

/// Persist an audit event, logging (never failing the request) on error.
pub(crate) async fn record_audit(state: &AppState, event: AuditEvent) {
    if let Err(e) = sessia_audit::store::record(&state.s3, &state.bucket, event).await {
        tracing::warn!("audit write failed: {e}");
    }
}
