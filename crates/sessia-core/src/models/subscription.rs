use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A counselor's subscription state. Checkout and payment collection happen
/// in the external payment processor; this document only mirrors the result.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Subscription {
    pub counselor_sub: String,
    pub plan: SubscriptionPlan,
    pub status: SubscriptionStatus,
    pub current_period_end: Option<jiff::Timestamp>,
    pub updated_at: jiff::Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SubscriptionPlan {
    Trial,
    Solo,
    Practice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SubscriptionStatus {
    Trialing,
    Active,
    PastDue,
    Cancelled,
}
