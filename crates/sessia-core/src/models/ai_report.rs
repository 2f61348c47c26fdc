use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;

use super::client::RiskLevel;

/// An immutable record of one AI agent invocation.
///
/// Many per client. The report aggregators treat the per-client collection
/// as a time-ordered event log: always latest-N or a date-bounded window,
/// sorted descending by `created_at`. AiReports are never updated in place.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AiReport {
    pub id: Uuid,
    pub client_id: Uuid,
    pub counselor_sub: String,
    pub kind: ReportKind,
    pub content: AiReportContent,
    pub model_id: String,
    pub created_at: jiff::Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ReportKind {
    Assessment,
    Diagnostic,
    Progress,
    Treatment,
    Documentation,
}

impl ReportKind {
    pub const ALL: [ReportKind; 5] = [
        ReportKind::Assessment,
        ReportKind::Diagnostic,
        ReportKind::Progress,
        ReportKind::Treatment,
        ReportKind::Documentation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ReportKind::Assessment => "assessment",
            ReportKind::Diagnostic => "diagnostic",
            ReportKind::Progress => "progress",
            ReportKind::Treatment => "treatment",
            ReportKind::Documentation => "documentation",
        }
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReportKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "assessment" => Ok(ReportKind::Assessment),
            "diagnostic" => Ok(ReportKind::Diagnostic),
            "progress" => Ok(ReportKind::Progress),
            "treatment" => Ok(ReportKind::Treatment),
            "documentation" => Ok(ReportKind::Documentation),
            other => Err(CoreError::InvalidReportKind(other.to_string())),
        }
    }
}

/// The structured output of one agent invocation, tagged by report kind.
///
/// Every known field is optional or defaulted — the model contract is
/// passthrough, so partially populated responses are legal. Unknown fields
/// land in each variant's `extra` map and round-trip losslessly; absent
/// fields are not written back as nulls.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum AiReportContent {
    Assessment(AssessmentContent),
    Diagnostic(DiagnosticContent),
    Progress(ProgressContent),
    Treatment(TreatmentContent),
    Documentation(DocumentationContent),
}

impl AiReportContent {
    pub fn kind(&self) -> ReportKind {
        match self {
            AiReportContent::Assessment(_) => ReportKind::Assessment,
            AiReportContent::Diagnostic(_) => ReportKind::Diagnostic,
            AiReportContent::Progress(_) => ReportKind::Progress,
            AiReportContent::Treatment(_) => ReportKind::Treatment,
            AiReportContent::Documentation(_) => ReportKind::Documentation,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub presenting_concerns: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub findings: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_assessment: Option<RiskAssessment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<String>,
    #[serde(flatten)]
    #[ts(skip)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub factors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiagnosticContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_diagnosis: Option<Diagnosis>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub differential_diagnoses: Vec<Diagnosis>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clinical_impressions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<String>,
    #[serde(flatten)]
    #[ts(skip)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Diagnosis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProgressContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treatment_progress: Option<TreatmentProgress>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub improvements: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub setbacks: Vec<String>,
    #[serde(flatten)]
    #[ts(skip)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TreatmentProgress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub goal_progress: Vec<GoalProgress>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub intervention_effectiveness: Vec<InterventionEffectiveness>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GoalProgress {
    pub goal: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// One intervention's rated effectiveness, 0.0–1.0.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InterventionEffectiveness {
    pub intervention: String,
    pub effectiveness: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TreatmentContent {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub goals: Vec<TreatmentGoal>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interventions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modalities: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<String>,
    #[serde(flatten)]
    #[ts(skip)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TreatmentGoal {
    pub title: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub objectives: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_date: Option<jiff::civil::Date>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DocumentationContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subjective: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objective: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_points: Vec<String>,
    #[serde(flatten)]
    #[ts(skip)]
    pub extra: BTreeMap<String, serde_json::Value>,
}
