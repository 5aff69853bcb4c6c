#![allow(clippy::unwrap_used)]
//! Assistant contract tests.
//!
//! A scripted backend stands in for the model so each mode's prompt, schema
//! and failure handling can be checked without a network.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use codecraft_cli::assistant::{
    AssistantError, CodeAssistant, CompletionRequest, ModelBackend, RUNNER_FAILED,
    RUNNER_NO_OUTPUT,
};

/// Replays canned replies and records every request it receives.
#[derive(Default)]
struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<String, AssistantError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedBackend {
    fn replying(replies: Vec<Result<String, AssistantError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelBackend for ScriptedBackend {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AssistantError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(AssistantError::EmptyResponse))
    }
}

fn assistant(backend: &Arc<ScriptedBackend>) -> CodeAssistant {
    CodeAssistant::new(backend.clone())
}

#[tokio::test]
async fn test_convert_python_to_javascript() {
    let backend = ScriptedBackend::replying(vec![Ok(
        r#"{"code": "console.log(\"Hello\");", "explanation": "print() maps to console.log()."}"#
            .to_string(),
    )]);

    let result = assistant(&backend)
        .convert("print('Hello')", "Python", "JavaScript")
        .await
        .unwrap();

    assert_eq!(result.code, "console.log(\"Hello\");");
    assert_eq!(result.explanation, "print() maps to console.log().");

    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    let schema = requests[0].schema.as_ref().unwrap();
    assert_eq!(schema.name, "generated_code");
    assert!(requests[0].prompt.contains("print('Hello')"));
    assert!(requests[0].prompt.contains("from Python to JavaScript"));
}

#[tokio::test]
async fn test_generate_sends_task_and_language() {
    let backend = ScriptedBackend::replying(vec![Ok(
        r#"{"code": "fn add(a: i32, b: i32) -> i32 { a + b }", "explanation": "Adds."}"#
            .to_string(),
    )]);

    let result = assistant(&backend)
        .generate("add two numbers", "Rust")
        .await
        .unwrap();

    assert!(result.code.starts_with("fn add"));
    let prompt = &backend.requests()[0].prompt;
    assert!(prompt.contains("production-ready Rust code"));
    assert!(prompt.contains("\"add two numbers\""));
}

#[tokio::test]
async fn test_analyze_decodes_full_report() {
    let backend = ScriptedBackend::replying(vec![Ok(r#"{
        "explanation": "Builds a query from user input.",
        "timeComplexity": "O(1)",
        "spaceComplexity": "O(1)",
        "securityIssues": ["SQL injection via string concatenation"],
        "improvements": ["Use parameterized queries"],
        "qualityScore": {
            "readability": 7,
            "maintainability": 6,
            "security": 2,
            "performance": 8,
            "structure": 6.5
        }
    }"#
    .to_string())]);

    let analysis = assistant(&backend)
        .analyze("query = \"SELECT * FROM users WHERE id=\" + user_id", "Python")
        .await
        .unwrap();

    assert_eq!(analysis.security_issues.len(), 1);
    assert!((analysis.quality_score.security - 2.0).abs() < f64::EPSILON);
    assert!((analysis.quality_score.structure - 6.5).abs() < f64::EPSILON);
    assert_eq!(
        backend.requests()[0].schema.as_ref().unwrap().name,
        "code_analysis"
    );
}

#[tokio::test]
async fn test_compare_versions_sends_both_versions_in_order() {
    let backend = ScriptedBackend::replying(vec![Ok(r#"{
        "summary": "Loop replaced with sum().",
        "changes": ["Removed manual accumulator"],
        "riskAssessment": "Low risk."
    }"#
    .to_string())]);

    let report = assistant(&backend)
        .compare_versions("total = 0\nfor x in xs: total += x", "total = sum(xs)")
        .await
        .unwrap();

    assert_eq!(report.changes, vec!["Removed manual accumulator"]);
    let prompt = &backend.requests()[0].prompt;
    let old_at = prompt.find("for x in xs").unwrap();
    let new_at = prompt.find("total = sum(xs)").unwrap();
    assert!(old_at < new_at);
}

#[tokio::test]
async fn test_structured_modes_reject_malformed_replies() {
    let backend = ScriptedBackend::replying(vec![
        Ok("Sure! Here is your code:".to_string()),
        Ok(r#"{"code": "x = 1"}"#.to_string()),
        Ok("   ".to_string()),
    ]);
    let assistant = assistant(&backend);

    let err = assistant.generate("x", "Python").await.unwrap_err();
    assert!(matches!(err, AssistantError::MalformedResponse(_)));

    let err = assistant.generate("x", "Python").await.unwrap_err();
    assert!(matches!(err, AssistantError::MalformedResponse(_)));

    let err = assistant.generate("x", "Python").await.unwrap_err();
    assert!(matches!(err, AssistantError::EmptyResponse));
}

#[tokio::test]
async fn test_structured_modes_propagate_backend_failures() {
    let backend = ScriptedBackend::replying(vec![Err(AssistantError::Status {
        status: 401,
        body: "invalid api key".to_string(),
    })]);

    let err = assistant(&backend)
        .analyze("x = 1", "Python")
        .await
        .unwrap_err();

    assert!(matches!(err, AssistantError::Status { status: 401, .. }));
}

#[tokio::test]
async fn test_flowchart_strips_fences_and_sends_no_schema() {
    let backend = ScriptedBackend::replying(vec![Ok(
        "```svg\n<svg><rect width=\"10\"/></svg>\n```".to_string(),
    )]);

    let svg = assistant(&backend).generate_flowchart_svg("x = 1").await;

    assert_eq!(svg, "\n<svg><rect width=\"10\"/></svg>\n");
    assert!(backend.requests()[0].schema.is_none());
}

#[tokio::test]
async fn test_flowchart_failure_yields_empty_string() {
    let backend = ScriptedBackend::replying(vec![Err(AssistantError::EmptyResponse)]);

    let svg = assistant(&backend).generate_flowchart_svg("x = 1").await;

    assert_eq!(svg, "");
}

#[tokio::test]
async fn test_runner_returns_text_verbatim() {
    let backend = ScriptedBackend::replying(vec![Ok("Hello\nWorld\n".to_string())]);

    let output = assistant(&backend)
        .simulate_runner("print('Hello')\nprint('World')", "Python")
        .await;

    assert_eq!(output, "Hello\nWorld\n");
    assert!(backend.requests()[0].prompt.contains("Act as a Python interpreter"));
}

#[tokio::test]
async fn test_runner_fallbacks() {
    let backend = ScriptedBackend::replying(vec![
        Ok(String::new()),
        Err(AssistantError::Status {
            status: 503,
            body: String::new(),
        }),
    ]);
    let assistant = assistant(&backend);

    assert_eq!(assistant.simulate_runner("pass", "Python").await, RUNNER_NO_OUTPUT);
    assert_eq!(assistant.simulate_runner("pass", "Python").await, RUNNER_FAILED);
}

#[tokio::test]
async fn test_runner_keeps_blank_line_output() {
    let backend = ScriptedBackend::replying(vec![Ok("\n\n".to_string())]);

    let output = assistant(&backend)
        .simulate_runner("print()\nprint()", "Python")
        .await;

    assert_eq!(output, "\n\n");
}
