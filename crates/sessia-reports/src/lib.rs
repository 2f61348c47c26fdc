//! sessia-reports
//!
//! The report aggregators: given a client, a date window, and the caller's
//! attribution, fold the client's session history and AI-report event log
//! into one JSON-serializable rollup document.
//!
//! Each aggregator is split in two: an async `generate_*` entry point that
//! issues the three independent reads in parallel (client, sessions,
//! AI reports) and a pure `build_*` function over the fetched data. The
//! derived metrics and the note classifier live in [`metrics`] and
//! [`classify`] so their exact boundary behavior is testable in isolation.
//!
//! Aggregators have no side effects beyond the initial reads — calling one
//! twice with the same inputs differs only if the underlying collections
//! changed in between.

pub mod classify;
pub mod common;
pub mod error;
pub mod fetch;
pub mod metrics;
pub mod window;

pub mod assessment;
pub mod diagnostic;
pub mod documentation;
pub mod progress;
pub mod treatment;

pub use assessment::generate_assessment_report;
pub use diagnostic::generate_diagnostic_report;
pub use documentation::generate_documentation_report;
pub use progress::generate_progress_report;
pub use treatment::generate_treatment_report;

/// Who requested the rollup. Recorded as `metadata.generated_by`.
///
/// Ownership enforcement happens at the route layer; the aggregators only
/// need a display name for attribution.
#[derive(Debug, Clone)]
pub struct Attribution {
    pub name: String,
}
