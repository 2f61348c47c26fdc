use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// One therapy encounter. Belongs to a client and a counselor.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Session {
    pub id: Uuid,
    pub client_id: Uuid,
    pub counselor_sub: String,
    pub scheduled_at: jiff::Timestamp,
    pub duration_minutes: u32,
    pub status: SessionStatus,
    pub notes: Option<String>,
    /// Client-reported mood, 1–10.
    pub mood_rating: Option<u8>,
    /// Populated asynchronously by the documentation agent.
    pub ai_content: Option<SessionAiContent>,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SessionStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
    NoShow,
}

impl SessionStatus {
    /// Legal lifecycle transitions. Completed, cancelled, and no-show are
    /// terminal.
    pub fn can_transition_to(self, next: SessionStatus) -> bool {
        use SessionStatus::*;
        matches!(
            (self, next),
            (Scheduled, InProgress)
                | (Scheduled, Cancelled)
                | (Scheduled, NoShow)
                | (InProgress, Completed)
                | (InProgress, Cancelled)
        )
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SessionStatus::Scheduled => "scheduled",
            SessionStatus::InProgress => "in_progress",
            SessionStatus::Completed => "completed",
            SessionStatus::Cancelled => "cancelled",
            SessionStatus::NoShow => "no_show",
        };
        f.write_str(s)
    }
}

/// AI-generated session documentation, attached after the fact.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionAiContent {
    pub report_id: Uuid,
    pub summary: Option<String>,
    pub model_id: String,
    pub generated_at: jiff::Timestamp,
}
