//! Result records returned by the structured modes.
//!
//! Field names are camelCase on the wire, matching the JSON schemas in
//! [`super::schema`]. Unknown fields are rejected so a drifting model response
//! surfaces as a malformed response instead of being silently accepted.

use serde::{Deserialize, Serialize};

/// Code produced by the generate and convert modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GeneratedCode {
    pub code: String,
    pub explanation: String,
}

/// Quality ratings on a 0-10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct QualityMetrics {
    pub readability: f64,
    pub maintainability: f64,
    pub security: f64,
    pub performance: f64,
    pub structure: f64,
}

impl QualityMetrics {
    pub const MAX_SCORE: f64 = 10.0;

    /// Named scores in display order.
    pub const fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("Readability", self.readability),
            ("Maintainability", self.maintainability),
            ("Security", self.security),
            ("Performance", self.performance),
            ("Structure", self.structure),
        ]
    }
}

/// Static analysis report produced by the analyze mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CodeAnalysis {
    pub explanation: String,
    pub time_complexity: String,
    pub space_complexity: String,
    pub security_issues: Vec<String>,
    pub improvements: Vec<String>,
    pub quality_score: QualityMetrics,
}

/// Comparison report produced by the diff mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DiffReport {
    pub summary: String,
    pub changes: Vec<String>,
    pub risk_assessment: String,
}
