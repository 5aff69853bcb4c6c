//! Structured-output schemas and validated decoding.
//!
//! Each structured mode attaches a JSON schema to its request so the model
//! answers with a fixed shape. The answer is then decoded into the typed
//! record and checked against the value constraints the schema cannot express.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};

use super::error::AssistantError;
use super::types::{CodeAnalysis, DiffReport, GeneratedCode, QualityMetrics};

/// A named JSON schema sent as the `response_format` of a request.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSchema {
    pub name: &'static str,
    pub schema: Value,
}

impl OutputSchema {
    /// Schema for [`GeneratedCode`]; the descriptions differ between generate and convert.
    pub fn generated_code(code_description: &str, explanation_description: &str) -> Self {
        Self {
            name: "generated_code",
            schema: object(&[
                ("code", string(Some(code_description))),
                ("explanation", string(Some(explanation_description))),
            ]),
        }
    }

    pub fn code_analysis() -> Self {
        let score = || json!({ "type": "number" });
        Self {
            name: "code_analysis",
            schema: object(&[
                ("explanation", string(None)),
                ("timeComplexity", string(None)),
                ("spaceComplexity", string(None)),
                ("securityIssues", string_list(None)),
                ("improvements", string_list(None)),
                (
                    "qualityScore",
                    object(&[
                        ("readability", score()),
                        ("maintainability", score()),
                        ("security", score()),
                        ("performance", score()),
                        ("structure", score()),
                    ]),
                ),
            ]),
        }
    }

    pub fn diff_report() -> Self {
        Self {
            name: "diff_report",
            schema: object(&[
                ("summary", string(Some("High level summary of changes"))),
                ("changes", string_list(Some("List of specific changes"))),
                (
                    "riskAssessment",
                    string(Some("Impact on security or performance")),
                ),
            ]),
        }
    }
}

fn string(description: Option<&str>) -> Value {
    let mut field = json!({ "type": "string" });
    if let Some(description) = description {
        field["description"] = json!(description);
    }
    field
}

fn string_list(description: Option<&str>) -> Value {
    let mut field = json!({ "type": "array", "items": { "type": "string" } });
    if let Some(description) = description {
        field["description"] = json!(description);
    }
    field
}

// Every property is required and nothing else is allowed (strict mode).
fn object(properties: &[(&str, Value)]) -> Value {
    let required: Vec<&str> = properties.iter().map(|(name, _)| *name).collect();
    let properties: Map<String, Value> = properties
        .iter()
        .map(|(name, schema)| ((*name).to_string(), schema.clone()))
        .collect();

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false,
    })
}

/// Value constraints checked after a record has been deserialized.
pub trait Validate {
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

impl Validate for GeneratedCode {}

impl Validate for DiffReport {}

impl Validate for QualityMetrics {
    fn validate(&self) -> Result<(), String> {
        for (name, score) in self.entries() {
            if !score.is_finite() || !(0.0..=Self::MAX_SCORE).contains(&score) {
                return Err(format!(
                    "{name} score {score} is outside 0-{}",
                    Self::MAX_SCORE
                ));
            }
        }
        Ok(())
    }
}

impl Validate for CodeAnalysis {
    fn validate(&self) -> Result<(), String> {
        self.quality_score.validate()
    }
}

/// Decodes model text into `T`, rejecting empty text, non-JSON, shape
/// mismatches and constraint violations.
pub fn decode<T>(text: &str) -> Result<T, AssistantError>
where
    T: DeserializeOwned + Validate,
{
    let text = text.trim();
    if text.is_empty() {
        return Err(AssistantError::EmptyResponse);
    }

    let record: T = serde_json::from_str(text)
        .map_err(|e| AssistantError::MalformedResponse(e.to_string()))?;
    record.validate().map_err(AssistantError::MalformedResponse)?;

    Ok(record)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const ANALYSIS_JSON: &str = r#"{
        "explanation": "Sums a list.",
        "timeComplexity": "O(n)",
        "spaceComplexity": "O(1)",
        "securityIssues": [],
        "improvements": ["Use the built-in sum()"],
        "qualityScore": {
            "readability": 8,
            "maintainability": 7.5,
            "security": 10,
            "performance": 6,
            "structure": 0
        }
    }"#;

    #[test]
    fn test_generated_code_schema_requires_both_fields() {
        let schema = OutputSchema::generated_code("The converted code", "Key changes");
        assert_eq!(schema.name, "generated_code");
        assert_eq!(schema.schema["required"], json!(["code", "explanation"]));
        assert_eq!(
            schema.schema["properties"]["code"]["description"],
            "The converted code"
        );
        assert_eq!(schema.schema["additionalProperties"], json!(false));
    }

    #[test]
    fn test_code_analysis_schema_nests_quality_score() {
        let schema = OutputSchema::code_analysis().schema;
        let quality = &schema["properties"]["qualityScore"];

        assert_eq!(schema["required"].as_array().unwrap().len(), 6);
        assert_eq!(quality["type"], "object");
        assert_eq!(
            quality["required"],
            json!([
                "readability",
                "maintainability",
                "security",
                "performance",
                "structure"
            ])
        );
        assert_eq!(quality["properties"]["security"]["type"], "number");
        assert_eq!(schema["properties"]["securityIssues"]["items"]["type"], "string");
    }

    #[test]
    fn test_diff_report_schema_fields() {
        let schema = OutputSchema::diff_report().schema;
        assert_eq!(
            schema["required"],
            json!(["summary", "changes", "riskAssessment"])
        );
        assert_eq!(schema["properties"]["changes"]["type"], "array");
    }

    #[test]
    fn test_decode_analysis() {
        let analysis: CodeAnalysis = decode(ANALYSIS_JSON).unwrap();
        assert_eq!(analysis.time_complexity, "O(n)");
        assert!(analysis.security_issues.is_empty());
        assert!((analysis.quality_score.maintainability - 7.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_decode_empty_text() {
        let result = decode::<GeneratedCode>("  \n");
        assert!(matches!(result, Err(AssistantError::EmptyResponse)));
    }

    #[test]
    fn test_decode_not_json() {
        let result = decode::<GeneratedCode>("Here is your code: print(1)");
        assert!(matches!(result, Err(AssistantError::MalformedResponse(_))));
    }

    #[test]
    fn test_decode_missing_required_field() {
        let result = decode::<DiffReport>(r#"{"summary": "s", "changes": []}"#);
        let Err(AssistantError::MalformedResponse(message)) = result else {
            panic!("expected a malformed response");
        };
        assert!(message.contains("riskAssessment"));
    }

    #[test]
    fn test_decode_rejects_unknown_field() {
        let result =
            decode::<GeneratedCode>(r#"{"code": "x", "explanation": "y", "language": "Go"}"#);
        assert!(matches!(result, Err(AssistantError::MalformedResponse(_))));
    }

    #[test]
    fn test_decode_rejects_wrong_type() {
        let result = decode::<DiffReport>(
            r#"{"summary": "s", "changes": "one change", "riskAssessment": "low"}"#,
        );
        assert!(matches!(result, Err(AssistantError::MalformedResponse(_))));
    }

    #[test]
    fn test_decode_rejects_out_of_range_score() {
        let json = ANALYSIS_JSON.replace("\"security\": 10", "\"security\": 11");
        let Err(AssistantError::MalformedResponse(message)) = decode::<CodeAnalysis>(&json) else {
            panic!("expected a malformed response");
        };
        assert!(message.contains("Security"));
    }

    #[test]
    fn test_decode_rejects_negative_score() {
        let json = ANALYSIS_JSON.replace("\"structure\": 0", "\"structure\": -1");
        assert!(decode::<CodeAnalysis>(&json).is_err());
    }
}
