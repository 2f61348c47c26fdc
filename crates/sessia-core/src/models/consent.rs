use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A consent form embedded in a client record. Signing happens out of band
/// through a time-limited token.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ConsentForm {
    pub id: Uuid,
    pub title: String,
    pub status: ConsentStatus,
    pub token: Option<String>,
    pub token_expires_at: Option<jiff::Timestamp>,
    pub signed_at: Option<jiff::Timestamp>,
    pub signature_name: Option<String>,
    pub created_at: jiff::Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ConsentStatus {
    Pending,
    Signed,
    Declined,
    Expired,
}

/// Lookup document mapping a signing token to its form.
///
/// Stored at `consent-tokens/{token}.json` and deleted once the form is
/// signed, so a token is single-use.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ConsentToken {
    pub token: String,
    pub client_id: Uuid,
    pub form_id: Uuid,
    pub expires_at: jiff::Timestamp,
}

impl ConsentToken {
    pub fn is_expired(&self, now: jiff::Timestamp) -> bool {
        now > self.expires_at
    }
}
