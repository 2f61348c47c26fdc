use jiff::Timestamp;
use uuid::Uuid;

use sessia_core::models::ai_report::{
    AiReport, AiReportContent, AssessmentContent, DiagnosticContent, InterventionEffectiveness,
    ProgressContent, RiskAssessment, TreatmentContent, TreatmentGoal, TreatmentProgress,
};
use sessia_core::models::client::{Client, ClientStatus, RiskLevel};
use sessia_core::models::session::{Session, SessionStatus};
use sessia_reports::Attribution;
use sessia_reports::assessment::build_assessment_report;
use sessia_reports::common::CriticalEventKind;
use sessia_reports::diagnostic::build_diagnostic_report;
use sessia_reports::documentation::build_documentation_report;
use sessia_reports::progress::build_progress_report;
use sessia_reports::treatment::build_treatment_report;
use sessia_reports::window::DateWindow;

fn ts(s: &str) -> Timestamp {
    s.parse().unwrap()
}

fn client() -> Client {
    Client {
        id: Uuid::new_v4(),
        counselor_sub: "counselor-1".to_string(),
        name: "Jordan Reyes".to_string(),
        date_of_birth: None,
        email: None,
        phone: None,
        status: ClientStatus::Active,
        risk_level: Some(RiskLevel::Low),
        consent_forms: Vec::new(),
        billing: Default::default(),
        created_at: ts("2023-06-01T09:00:00Z"),
        updated_at: ts("2023-06-01T09:00:00Z"),
    }
}

fn session(client_id: Uuid, scheduled_at: &str, mood: Option<u8>, notes: Option<&str>) -> Session {
    Session {
        id: Uuid::new_v4(),
        client_id,
        counselor_sub: "counselor-1".to_string(),
        scheduled_at: ts(scheduled_at),
        duration_minutes: 50,
        status: SessionStatus::Completed,
        notes: notes.map(|n| n.to_string()),
        mood_rating: mood,
        ai_content: None,
        created_at: ts(scheduled_at),
        updated_at: ts(scheduled_at),
    }
}

fn ai_report(client_id: Uuid, created_at: &str, content: AiReportContent) -> AiReport {
    AiReport {
        id: Uuid::new_v4(),
        client_id,
        counselor_sub: "counselor-1".to_string(),
        kind: content.kind(),
        content,
        model_id: "us.anthropic.claude-sonnet-4-20250514-v1:0".to_string(),
        created_at: ts(created_at),
    }
}

fn user() -> Attribution {
    Attribution {
        name: "Dr. Casey Morgan".to_string(),
    }
}

fn window_jan_2024() -> DateWindow {
    DateWindow::new(
        Some("2024-01-01".parse().unwrap()),
        Some("2024-01-31".parse().unwrap()),
    )
}

#[test]
fn date_window_is_inclusive_and_excludes_outside() {
    let window = window_jan_2024();

    assert!(window.contains(ts("2024-01-01T00:00:00Z")));
    assert!(window.contains(ts("2024-01-31T23:59:59Z")));
    assert!(!window.contains(ts("2023-12-31T23:59:59Z")));
    assert!(!window.contains(ts("2024-02-01T00:00:00Z")));
}

#[test]
fn diagnostic_empty_window_has_exact_message() {
    let client = client();

    // Diagnostic reports exist for the client, but the builder only sees
    // what the window fetch returned — nothing.
    let err = build_diagnostic_report(&client, &[], &[], window_jan_2024(), &user()).unwrap_err();

    assert_eq!(
        err.to_string(),
        "No diagnostic reports found for the specified period"
    );
}

#[test]
fn treatment_empty_window_has_exact_message() {
    let client = client();

    // Progress reports alone don't satisfy the treatment aggregator.
    let progress = ai_report(
        client.id,
        "2024-01-10T12:00:00Z",
        AiReportContent::Progress(ProgressContent::default()),
    );

    let err = build_treatment_report(&client, &[], &[progress], window_jan_2024(), &user())
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "No treatment reports found for the specified period"
    );
}

#[test]
fn assessment_takes_current_status_from_latest_but_flattens_lists() {
    let client = client();

    let newer = ai_report(
        client.id,
        "2024-01-20T12:00:00Z",
        AiReportContent::Assessment(AssessmentContent {
            summary: Some("Symptoms easing".to_string()),
            findings: vec!["Improved sleep".to_string()],
            ..Default::default()
        }),
    );
    let older = ai_report(
        client.id,
        "2024-01-05T12:00:00Z",
        AiReportContent::Assessment(AssessmentContent {
            summary: Some("Initial intake".to_string()),
            findings: vec!["Poor sleep".to_string(), "Work stress".to_string()],
            ..Default::default()
        }),
    );

    // Fetch contract: newest first.
    let reports = vec![newer, older];
    let sessions = vec![
        session(client.id, "2024-01-03T10:00:00Z", Some(4), None),
        session(client.id, "2024-01-10T10:00:00Z", Some(6), None),
        session(client.id, "2024-01-17T10:00:00Z", Some(8), None),
    ];

    let report =
        build_assessment_report(&client, &sessions, &reports, window_jan_2024(), &user());

    let status = report.current_status.unwrap();
    assert_eq!(status.summary.as_deref(), Some("Symptoms easing"));

    assert_eq!(report.history.len(), 2);
    assert_eq!(
        report.findings,
        vec![
            "Improved sleep".to_string(),
            "Poor sleep".to_string(),
            "Work stress".to_string()
        ]
    );

    assert_eq!(report.session_overview.total_sessions, 3);
    assert_eq!(report.session_overview.average_mood_rating, Some(6.0));
    assert_eq!(report.metadata.generated_by, "Dr. Casey Morgan");
}

#[test]
fn assessment_surfaces_only_critical_risk_levels() {
    let client = client();

    let severe = ai_report(
        client.id,
        "2024-01-20T12:00:00Z",
        AiReportContent::Assessment(AssessmentContent {
            risk_assessment: Some(RiskAssessment {
                level: RiskLevel::Severe,
                factors: vec!["Ideation".to_string()],
                notes: None,
            }),
            ..Default::default()
        }),
    );
    let moderate = ai_report(
        client.id,
        "2024-01-05T12:00:00Z",
        AiReportContent::Assessment(AssessmentContent {
            risk_assessment: Some(RiskAssessment {
                level: RiskLevel::Moderate,
                factors: Vec::new(),
                notes: None,
            }),
            ..Default::default()
        }),
    );

    let report = build_assessment_report(
        &client,
        &[],
        &[severe, moderate],
        window_jan_2024(),
        &user(),
    );

    assert_eq!(report.critical_events.len(), 1);
    assert_eq!(report.critical_events[0].category, CriticalEventKind::Risk);
    assert!(report.critical_events[0].description.contains("severe"));
}

#[test]
fn progress_buckets_are_not_mutually_exclusive() {
    let client = client();
    let sessions = vec![session(
        client.id,
        "2024-01-10T10:00:00Z",
        Some(5),
        Some("We made real progress but faced a difficulty with homework"),
    )];

    let report = build_progress_report(&client, &sessions, &[], window_jan_2024(), &user());

    assert_eq!(report.progress_updates.len(), 1);
    assert_eq!(report.challenges.len(), 1);
    assert_eq!(
        report.progress_updates[0].session_id,
        report.challenges[0].session_id
    );
}

#[test]
fn progress_key_interventions_honor_the_threshold() {
    let client = client();

    let reports = vec![
        ai_report(
            client.id,
            "2024-01-20T12:00:00Z",
            AiReportContent::Progress(ProgressContent {
                treatment_progress: Some(TreatmentProgress {
                    intervention_effectiveness: vec![
                        InterventionEffectiveness {
                            intervention: "CBT".to_string(),
                            effectiveness: 0.80,
                            notes: None,
                        },
                        InterventionEffectiveness {
                            intervention: "EMDR".to_string(),
                            effectiveness: 0.60,
                            notes: None,
                        },
                    ],
                    ..Default::default()
                }),
                ..Default::default()
            }),
        ),
        ai_report(
            client.id,
            "2024-01-05T12:00:00Z",
            AiReportContent::Progress(ProgressContent {
                treatment_progress: Some(TreatmentProgress {
                    intervention_effectiveness: vec![InterventionEffectiveness {
                        intervention: "CBT".to_string(),
                        effectiveness: 0.60,
                        notes: None,
                    }],
                    ..Default::default()
                }),
                ..Default::default()
            }),
        ),
    ];

    let report = build_progress_report(&client, &[], &reports, window_jan_2024(), &user());

    // CBT mean = 0.70 exactly: inclusive boundary, so it is key.
    let cbt = report
        .intervention_effectiveness
        .iter()
        .find(|a| a.intervention == "CBT")
        .unwrap();
    assert_eq!(cbt.average_effectiveness, (0.80 + 0.60) / 2.0);
    assert_eq!(report.key_interventions, vec!["CBT".to_string()]);
}

#[test]
fn documentation_flags_low_effectiveness_intervention_once() {
    let client = client();

    let progress = ai_report(
        client.id,
        "2024-01-12T12:00:00Z",
        AiReportContent::Progress(ProgressContent {
            treatment_progress: Some(TreatmentProgress {
                intervention_effectiveness: vec![InterventionEffectiveness {
                    intervention: "CBT".to_string(),
                    effectiveness: 0.25,
                    notes: None,
                }],
                ..Default::default()
            }),
            ..Default::default()
        }),
    );

    let report =
        build_documentation_report(&client, &[], &[progress], window_jan_2024(), &user());

    assert_eq!(report.critical_events.len(), 1);
    let event = &report.critical_events[0];
    assert_eq!(event.category, CriticalEventKind::LowEffectiveness);
    assert!(
        event
            .description
            .contains("Low effectiveness intervention: CBT")
    );
}

#[test]
fn documentation_effectiveness_boundary_is_strict() {
    let client = client();

    let progress = ai_report(
        client.id,
        "2024-01-12T12:00:00Z",
        AiReportContent::Progress(ProgressContent {
            treatment_progress: Some(TreatmentProgress {
                intervention_effectiveness: vec![InterventionEffectiveness {
                    intervention: "CBT".to_string(),
                    effectiveness: 0.30,
                    notes: None,
                }],
                ..Default::default()
            }),
            ..Default::default()
        }),
    );

    let report =
        build_documentation_report(&client, &[], &[progress], window_jan_2024(), &user());

    // Exactly 0.30 is not "low": the bound is strict.
    assert!(report.critical_events.is_empty());
}

#[test]
fn treatment_reads_effectiveness_from_progress_reports() {
    let client = client();

    let treatment = ai_report(
        client.id,
        "2024-01-18T12:00:00Z",
        AiReportContent::Treatment(TreatmentContent {
            goals: vec![TreatmentGoal {
                title: "Reduce panic attacks".to_string(),
                objectives: vec!["Daily breathing practice".to_string()],
                target_date: None,
                status: Some("active".to_string()),
            }],
            interventions: vec!["CBT".to_string()],
            ..Default::default()
        }),
    );
    let progress = ai_report(
        client.id,
        "2024-01-10T12:00:00Z",
        AiReportContent::Progress(ProgressContent {
            treatment_progress: Some(TreatmentProgress {
                intervention_effectiveness: vec![InterventionEffectiveness {
                    intervention: "CBT".to_string(),
                    effectiveness: 0.85,
                    notes: None,
                }],
                ..Default::default()
            }),
            ..Default::default()
        }),
    );

    let report = build_treatment_report(
        &client,
        &[],
        &[treatment, progress],
        window_jan_2024(),
        &user(),
    )
    .unwrap();

    assert_eq!(report.metadata.total_reports, Some(1));
    assert_eq!(report.current_plan.goals.len(), 1);
    assert_eq!(report.key_interventions, vec!["CBT".to_string()]);
}

#[test]
fn aggregator_output_round_trips_through_json() {
    let client = client();
    let sessions = vec![session(
        client.id,
        "2024-01-10T10:00:00Z",
        Some(7),
        Some("A significant breakthrough on boundaries"),
    )];
    let reports = vec![ai_report(
        client.id,
        "2024-01-12T12:00:00Z",
        AiReportContent::Assessment(AssessmentContent {
            summary: Some("Making headway".to_string()),
            findings: vec!["Better affect regulation".to_string()],
            ..Default::default()
        }),
    )];

    let report =
        build_assessment_report(&client, &sessions, &reports, window_jan_2024(), &user());

    // Persisting as Report.content and re-reading must be lossless.
    let value = serde_json::to_value(&report).unwrap();
    let reread: sessia_reports::assessment::AssessmentReport =
        serde_json::from_value(value.clone()).unwrap();
    let revalue = serde_json::to_value(&reread).unwrap();

    assert_eq!(value, revalue);
}
