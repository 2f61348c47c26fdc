//! Parsing of model responses into typed report content.

use sessia_core::models::ai_report::{
    AiReportContent, AssessmentContent, DiagnosticContent, DocumentationContent, ProgressContent,
    ReportKind, TreatmentContent,
};

use crate::error::AgentError;

/// Parse the model's response text as the content variant for `kind`.
///
/// Models occasionally wrap JSON in a markdown code fence despite the
/// system prompt; fences are stripped before parsing. A response that
/// doesn't deserialize is a schema violation carrying the raw text for
/// diagnosis.
pub fn parse_content(kind: ReportKind, text: &str) -> Result<AiReportContent, AgentError> {
    let body = strip_code_fences(text);

    let violation = |e: serde_json::Error| {
        AgentError::SchemaViolation(format!(
            "failed to parse {kind} content: {e}. Response: {text}"
        ))
    };

    let content = match kind {
        ReportKind::Assessment => {
            let c: AssessmentContent = serde_json::from_str(body).map_err(violation)?;
            AiReportContent::Assessment(c)
        }
        ReportKind::Diagnostic => {
            let c: DiagnosticContent = serde_json::from_str(body).map_err(violation)?;
            AiReportContent::Diagnostic(c)
        }
        ReportKind::Progress => {
            let c: ProgressContent = serde_json::from_str(body).map_err(violation)?;
            AiReportContent::Progress(c)
        }
        ReportKind::Treatment => {
            let c: TreatmentContent = serde_json::from_str(body).map_err(violation)?;
            AiReportContent::Treatment(c)
        }
        ReportKind::Documentation => {
            let c: DocumentationContent = serde_json::from_str(body).map_err(violation)?;
            AiReportContent::Documentation(c)
        }
    };

    Ok(content)
}

/// Strip a surrounding markdown code fence, if present.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}
