//! Per-kind prompt assembly.
//!
//! Each report kind has a fixed system prompt naming the JSON fields the
//! parser expects. The user message is the assembled record context plus
//! any counselor instructions.

use sessia_core::models::ai_report::ReportKind;
use sessia_core::models::client::Client;
use sessia_core::models::session::Session;

use crate::context::{build_client_context, build_session_context};

const SHARED_PREAMBLE: &str = "\
You are a clinical documentation assistant for a licensed mental-health \
counselor. Respond with a single JSON object and nothing else — no prose, \
no markdown fences. Omit fields you cannot ground in the provided record \
rather than inventing content.";

const ASSESSMENT_SCHEMA: &str = "\
Fields: summary (string), presenting_concerns (string[]), findings \
(string[]), risk_assessment ({level: one of low|moderate|high|severe, \
factors: string[], notes: string}), recommendations (string[]).";

const DIAGNOSTIC_SCHEMA: &str = "\
Fields: primary_diagnosis ({code: string, name: string, rationale: \
string}), differential_diagnoses (same shape, array), clinical_impressions \
(string[]), recommendations (string[]).";

const PROGRESS_SCHEMA: &str = "\
Fields: session_summary (string), treatment_progress ({overall: string, \
goal_progress: [{goal: string, status: string, note: string}], \
intervention_effectiveness: [{intervention: string, effectiveness: number \
between 0 and 1, notes: string}]}), improvements (string[]), setbacks \
(string[]).";

const TREATMENT_SCHEMA: &str = "\
Fields: goals ([{title: string, objectives: string[], target_date: \
YYYY-MM-DD, status: string}]), interventions (string[]), modalities \
(string[]), recommendations (string[]).";

const DOCUMENTATION_SCHEMA: &str = "\
Fields: summary (string), subjective (string), objective (string), \
assessment (string), plan (string), key_points (string[]).";

/// The system prompt for one report kind.
pub fn system_prompt(kind: ReportKind) -> String {
    let (task, schema) = match kind {
        ReportKind::Assessment => (
            "Write a clinical assessment of the client's current presentation.",
            ASSESSMENT_SCHEMA,
        ),
        ReportKind::Diagnostic => (
            "Summarize diagnostic impressions supported by the record.",
            DIAGNOSTIC_SCHEMA,
        ),
        ReportKind::Progress => (
            "Evaluate treatment progress across the recorded sessions.",
            PROGRESS_SCHEMA,
        ),
        ReportKind::Treatment => (
            "Draft or revise the treatment plan for this client.",
            TREATMENT_SCHEMA,
        ),
        ReportKind::Documentation => (
            "Produce session documentation in SOAP structure.",
            DOCUMENTATION_SCHEMA,
        ),
    };

    format!("{SHARED_PREAMBLE}\n\nTask: {task}\n{schema}")
}

/// The user message: record context blocks plus optional counselor
/// instructions.
pub fn user_message(client: &Client, sessions: &[Session], instructions: Option<&str>) -> String {
    let mut message = build_client_context(client);

    let history = build_session_context(sessions);
    if !history.is_empty() {
        message.push_str("\n\n");
        message.push_str(&history);
    }

    if let Some(instructions) = instructions {
        message.push_str("\n\n<counselor_instructions>\n");
        message.push_str(instructions);
        if !instructions.ends_with('\n') {
            message.push('\n');
        }
        message.push_str("</counselor_instructions>");
    }

    message
}
