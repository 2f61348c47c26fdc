use sessia_bedrock::error::AgentError;
use sessia_bedrock::parse::parse_content;
use sessia_core::models::ai_report::{AiReportContent, ReportKind};

#[test]
fn parses_bare_json_assessment() {
    let text = r#"{
        "summary": "Client shows reduced anxiety.",
        "findings": ["Sleep improved"],
        "risk_assessment": {"level": "low", "factors": []}
    }"#;

    let content = parse_content(ReportKind::Assessment, text).unwrap();
    let AiReportContent::Assessment(c) = content else {
        panic!("expected assessment content");
    };
    assert_eq!(c.summary.as_deref(), Some("Client shows reduced anxiety."));
    assert_eq!(c.findings, vec!["Sleep improved".to_string()]);
}

#[test]
fn strips_markdown_code_fences() {
    let text = "```json\n{\"summary\": \"Fenced response\"}\n```";

    let content = parse_content(ReportKind::Documentation, text).unwrap();
    let AiReportContent::Documentation(c) = content else {
        panic!("expected documentation content");
    };
    assert_eq!(c.summary.as_deref(), Some("Fenced response"));
}

#[test]
fn unknown_fields_survive_in_the_side_map() {
    let text = r#"{"summary": "ok", "novel_field": {"nested": true}}"#;

    let content = parse_content(ReportKind::Assessment, text).unwrap();
    let AiReportContent::Assessment(c) = content else {
        panic!("expected assessment content");
    };
    assert!(c.extra.contains_key("novel_field"));

    // And they round-trip through serialization.
    let value = serde_json::to_value(&c).unwrap();
    assert_eq!(value["novel_field"]["nested"], serde_json::json!(true));
}

#[test]
fn partially_populated_content_is_legal() {
    let content = parse_content(ReportKind::Progress, "{}").unwrap();
    let AiReportContent::Progress(c) = content else {
        panic!("expected progress content");
    };
    assert!(c.treatment_progress.is_none());
    assert!(c.improvements.is_empty());
}

#[test]
fn non_json_response_is_a_schema_violation() {
    let err = parse_content(ReportKind::Diagnostic, "I'm sorry, I cannot do that.").unwrap_err();

    match err {
        AgentError::SchemaViolation(msg) => {
            assert!(msg.contains("diagnostic"));
            assert!(msg.contains("I'm sorry"));
        }
        other => panic!("expected schema violation, got: {other}"),
    }
}
