use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::consent::ConsentForm;
use super::invoice::ClientBilling;

/// A counseling client record. Owned by exactly one counselor.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Client {
    pub id: Uuid,
    /// Cognito sub of the owning counselor. Every query filters on this.
    pub counselor_sub: String,
    pub name: String,
    pub date_of_birth: Option<jiff::civil::Date>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: ClientStatus,
    /// Cached from the most recent assessment agent run. Not authoritative —
    /// the AiReport log is.
    pub risk_level: Option<RiskLevel>,
    #[serde(default)]
    pub consent_forms: Vec<ConsentForm>,
    #[serde(default)]
    pub billing: ClientBilling,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ClientStatus {
    Active,
    Inactive,
    Discharged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Severe,
}

impl RiskLevel {
    /// High and severe risk entries are surfaced as critical events by the
    /// report aggregators.
    pub fn is_critical(self) -> bool {
        matches!(self, RiskLevel::High | RiskLevel::Severe)
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
            RiskLevel::Severe => "severe",
        };
        f.write_str(s)
    }
}
