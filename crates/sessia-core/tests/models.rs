use sessia_core::keys;
use sessia_core::models::ai_report::{AiReportContent, ReportKind};
use sessia_core::models::consent::ConsentToken;
use sessia_core::models::session::SessionStatus;
use uuid::Uuid;

#[test]
fn session_status_transitions() {
    use SessionStatus::*;

    assert!(Scheduled.can_transition_to(InProgress));
    assert!(Scheduled.can_transition_to(Cancelled));
    assert!(Scheduled.can_transition_to(NoShow));
    assert!(InProgress.can_transition_to(Completed));
    assert!(InProgress.can_transition_to(Cancelled));

    // Terminal states and skips are rejected.
    assert!(!Scheduled.can_transition_to(Completed));
    assert!(!Completed.can_transition_to(InProgress));
    assert!(!Cancelled.can_transition_to(Scheduled));
    assert!(!NoShow.can_transition_to(Completed));
    assert!(!InProgress.can_transition_to(NoShow));
}

#[test]
fn report_kind_parses_and_displays() {
    for kind in ReportKind::ALL {
        let parsed: ReportKind = kind.as_str().parse().unwrap();
        assert_eq!(parsed, kind);
    }
    assert!("psychic".parse::<ReportKind>().is_err());
}

#[test]
fn content_union_round_trips_unknown_fields() {
    let json = serde_json::json!({
        "type": "progress",
        "session_summary": "Steady week",
        "clinician_mood": "optimistic"
    });

    let content: AiReportContent = serde_json::from_value(json.clone()).unwrap();
    let AiReportContent::Progress(c) = &content else {
        panic!("expected progress variant");
    };
    assert_eq!(c.session_summary.as_deref(), Some("Steady week"));
    assert!(c.extra.contains_key("clinician_mood"));

    let back = serde_json::to_value(&content).unwrap();
    assert_eq!(back, json);
}

#[test]
fn consent_token_expiry() {
    let token = ConsentToken {
        token: "abc".to_string(),
        client_id: Uuid::new_v4(),
        form_id: Uuid::new_v4(),
        expires_at: "2024-06-01T00:00:00Z".parse().unwrap(),
    };

    assert!(!token.is_expired("2024-05-31T23:59:59Z".parse().unwrap()));
    assert!(!token.is_expired("2024-06-01T00:00:00Z".parse().unwrap()));
    assert!(token.is_expired("2024-06-01T00:00:01Z".parse().unwrap()));
}

#[test]
fn key_conventions_nest_per_client() {
    let client_id: Uuid = "4f9f24a1-9d12-4c63-bd6e-2ab1c2d90b10".parse().unwrap();
    let report_id: Uuid = "8e0f1db2-7c55-4c29-a6c8-55c0ff6b6f5b".parse().unwrap();

    assert_eq!(
        keys::client(client_id),
        "clients/4f9f24a1-9d12-4c63-bd6e-2ab1c2d90b10.json"
    );
    assert_eq!(
        keys::ai_report(client_id, ReportKind::Progress, report_id),
        "ai-reports/4f9f24a1-9d12-4c63-bd6e-2ab1c2d90b10/progress/8e0f1db2-7c55-4c29-a6c8-55c0ff6b6f5b.json"
    );
    assert!(
        keys::ai_reports_kind_prefix(client_id, ReportKind::Progress)
            .starts_with(&keys::ai_reports_prefix(client_id))
    );
}
