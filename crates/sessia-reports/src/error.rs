use thiserror::Error;
use uuid::Uuid;

use sessia_core::models::ai_report::ReportKind;
use sessia_storage::error::StorageError;

#[derive(Debug, Error)]
pub enum ReportsError {
    /// The client document itself is absent. Distinct from [`Self::EmptyWindow`]
    /// so callers can differentiate 404 from empty-result messaging.
    #[error("client not found: {client_id}")]
    ClientNotFound { client_id: Uuid },

    /// The client exists but the window holds no reports of the required
    /// kind. Raised by the diagnostic and treatment aggregators only.
    #[error("No {kind} reports found for the specified period")]
    EmptyWindow { kind: ReportKind },

    #[error(transparent)]
    Storage(#[from] StorageError),
}
