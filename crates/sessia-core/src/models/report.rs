use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::ai_report::ReportKind;

/// A persisted, user-triggered rollup built by an aggregator.
///
/// Distinct from [`super::ai_report::AiReport`]: a Report is a derived
/// snapshot over a date window, an AiReport is the raw per-invocation log.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Report {
    pub id: Uuid,
    pub client_id: Uuid,
    pub counselor_sub: String,
    pub kind: ReportKind,
    pub start_date: Option<jiff::civil::Date>,
    pub end_date: Option<jiff::civil::Date>,
    /// The aggregator's output, stored verbatim.
    pub content: serde_json::Value,
    pub created_by: String,
    pub created_at: jiff::Timestamp,
}
