use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A counselor profile. Identity lives in Cognito; this document carries the
/// display fields the app needs for attribution.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    pub sub: String,
    pub name: String,
    pub email: Option<String>,
    pub practice_name: Option<String>,
    pub updated_at: jiff::Timestamp,
}
