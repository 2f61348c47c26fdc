use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// A structured audit event for an API action.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    pub action: String,
    pub resource_type: String,
    pub resource_id: String,
    pub user_sub: String,
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(
        action: impl Into<String>,
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
        user_sub: impl Into<String>,
    ) -> Self {
        Self {
            action: action.into(),
            resource_type: resource_type.into(),
            resource_id: resource_id.into(),
            user_sub: user_sub.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Emit this audit event via tracing.
    pub fn emit(&self) {
        info!(
            audit.action = %self.action,
            audit.resource_type = %self.resource_type,
            audit.resource_id = %self.resource_id,
            audit.user_sub = %self.user_sub,
            "audit event"
        );
    }

    /// Freeze into the persisted form.
    pub fn into_record(self) -> AuditRecord {
        AuditRecord {
            id: Uuid::new_v4(),
            action: self.action,
            resource_type: self.resource_type,
            resource_id: self.resource_id,
            user_sub: self.user_sub,
            details: self.details,
            created_at: jiff::Timestamp::now(),
        }
    }
}

/// The persisted, append-only form of an audit event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: Uuid,
    pub action: String,
    pub resource_type: String,
    pub resource_id: String,
    pub user_sub: String,
    pub details: Option<serde_json::Value>,
    pub created_at: jiff::Timestamp,
}
