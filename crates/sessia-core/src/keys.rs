//! S3 key/path conventions.
//!
//! Pure string functions — no AWS SDK dependency. These define the canonical
//! layout of objects in the Sessia bucket. Per-client collections nest under
//! the client id so windowed reads are a single prefix listing.

use uuid::Uuid;

use crate::models::ai_report::ReportKind;

pub fn client(id: Uuid) -> String {
    format!("clients/{id}.json")
}

pub const CLIENTS_PREFIX: &str = "clients/";

pub fn session(client_id: Uuid, session_id: Uuid) -> String {
    format!("sessions/{client_id}/{session_id}.json")
}

pub fn sessions_prefix(client_id: Uuid) -> String {
    format!("sessions/{client_id}/")
}

pub fn ai_report(client_id: Uuid, kind: ReportKind, report_id: Uuid) -> String {
    format!("ai-reports/{client_id}/{kind}/{report_id}.json")
}

pub fn ai_reports_prefix(client_id: Uuid) -> String {
    format!("ai-reports/{client_id}/")
}

pub fn ai_reports_kind_prefix(client_id: Uuid, kind: ReportKind) -> String {
    format!("ai-reports/{client_id}/{kind}/")
}

pub fn report(client_id: Uuid, report_id: Uuid) -> String {
    format!("reports/{client_id}/{report_id}.json")
}

pub fn reports_prefix(client_id: Uuid) -> String {
    format!("reports/{client_id}/")
}

pub fn consent_token(token: &str) -> String {
    format!("consent-tokens/{token}.json")
}

pub fn invoice_pdf(client_id: Uuid, invoice_id: Uuid) -> String {
    format!("invoices/{client_id}/{invoice_id}.pdf")
}

pub fn invoices_prefix(client_id: Uuid) -> String {
    format!("invoices/{client_id}/")
}

pub fn subscription(counselor_sub: &str) -> String {
    format!("subscriptions/{counselor_sub}.json")
}

pub fn user(sub: &str) -> String {
    format!("users/{sub}.json")
}

pub fn audit_record(id: Uuid) -> String {
    format!("audit/{id}.json")
}

pub const AUDIT_PREFIX: &str = "audit/";
