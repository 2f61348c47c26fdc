use aws_sdk_s3::Client;

use sessia_core::keys;
use sessia_storage::docs;

use crate::error::AuditError;
use crate::events::{AuditEvent, AuditRecord};

/// Emit an event and persist it to the audit collection.
pub async fn record(
    s3: &Client,
    bucket: &str,
    event: AuditEvent,
) -> Result<AuditRecord, AuditError> {
    event.emit();
    let record = event.into_record();
    docs::save_doc(s3, bucket, &keys::audit_record(record.id), &record).await?;
    Ok(record)
}

/// Load audit records for one counselor, newest first, capped at `limit`.
pub async fn list_recent(
    s3: &Client,
    bucket: &str,
    user_sub: &str,
    limit: usize,
) -> Result<Vec<AuditRecord>, AuditError> {
    let mut records: Vec<AuditRecord> = docs::list_docs(s3, bucket, keys::AUDIT_PREFIX).await?;

    records.retain(|r| r.user_sub == user_sub);
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    records.truncate(limit);

    Ok(records)
}
