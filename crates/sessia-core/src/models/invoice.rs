use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Billing state embedded in a client record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClientBilling {
    #[serde(default)]
    pub invoices: Vec<Invoice>,
}

/// An invoice embedded in a client's billing record. The rendered PDF, if
/// any, lives in S3 under `pdf_key`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Invoice {
    pub id: Uuid,
    pub number: String,
    pub amount_cents: i64,
    pub currency: String,
    pub status: InvoiceStatus,
    pub issued_at: jiff::Timestamp,
    pub due_date: Option<jiff::civil::Date>,
    pub pdf_key: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Void,
}
