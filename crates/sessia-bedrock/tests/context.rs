use jiff::Timestamp;
use uuid::Uuid;

use sessia_bedrock::context::{build_client_context, build_session_context};
use sessia_core::models::client::{Client, ClientStatus, RiskLevel};
use sessia_core::models::session::{Session, SessionStatus};

fn client() -> Client {
    let ts: Timestamp = "2024-01-01T09:00:00Z".parse().unwrap();
    Client {
        id: Uuid::new_v4(),
        counselor_sub: "counselor-1".to_string(),
        name: "Jordan Reyes".to_string(),
        date_of_birth: Some("1990-04-12".parse().unwrap()),
        email: None,
        phone: None,
        status: ClientStatus::Active,
        risk_level: Some(RiskLevel::Moderate),
        consent_forms: Vec::new(),
        billing: Default::default(),
        created_at: ts,
        updated_at: ts,
    }
}

fn session(notes: Option<&str>, mood: Option<u8>) -> Session {
    let ts: Timestamp = "2024-01-10T15:00:00Z".parse().unwrap();
    Session {
        id: Uuid::new_v4(),
        client_id: Uuid::new_v4(),
        counselor_sub: "counselor-1".to_string(),
        scheduled_at: ts,
        duration_minutes: 50,
        status: SessionStatus::Completed,
        notes: notes.map(|n| n.to_string()),
        mood_rating: mood,
        ai_content: None,
        created_at: ts,
        updated_at: ts,
    }
}

#[test]
fn client_context_includes_profile_fields() {
    let block = build_client_context(&client());

    assert!(block.starts_with("<client_profile>"));
    assert!(block.ends_with("</client_profile>"));
    assert!(block.contains("name: Jordan Reyes"));
    assert!(block.contains("date_of_birth: 1990-04-12"));
    assert!(block.contains("cached_risk_level: moderate"));
}

#[test]
fn empty_session_history_returns_empty_string() {
    assert_eq!(build_session_context(&[]), "");
}

#[test]
fn session_context_includes_notes_and_mood() {
    let sessions = vec![
        session(Some("Client presented with anxiety."), Some(4)),
        session(None, None),
    ];

    let block = build_session_context(&sessions);

    assert!(block.starts_with("<session_history>"));
    assert!(block.ends_with("</session_history>"));
    assert!(block.contains("date=\"2024-01-10\""));
    assert!(block.contains("status=\"completed\""));
    assert!(block.contains("mood_rating: 4"));
    assert!(block.contains("Client presented with anxiety."));
}
