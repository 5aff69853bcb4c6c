use std::sync::Arc;

use super::backend::{CompletionRequest, ModelBackend};
use super::error::AssistantError;
use super::prompt;
use super::schema::{OutputSchema, Validate, decode};
use super::types::{CodeAnalysis, DiffReport, GeneratedCode};
use crate::ui::Style;

/// Shown when the runner gets an empty answer.
pub const RUNNER_NO_OUTPUT: &str = "No output generated.";

/// Shown when the runner request fails.
pub const RUNNER_FAILED: &str = "Error executing simulation.";

/// The six mode operations: build the prompt, attach the schema, call the
/// model, decode the answer.
///
/// Structured operations (generate, analyze, convert, compare) return typed
/// errors. The free-text operations (flowchart, runner) never fail: they log
/// the problem and fall back to an empty SVG or a fixed message.
#[derive(Clone)]
pub struct CodeAssistant {
    backend: Arc<dyn ModelBackend>,
}

impl CodeAssistant {
    pub fn new(backend: Arc<dyn ModelBackend>) -> Self {
        Self { backend }
    }

    pub async fn generate(
        &self,
        task: &str,
        language: &str,
    ) -> Result<GeneratedCode, AssistantError> {
        self.structured(
            "generate",
            prompt::build_generate_prompt(task, language),
            OutputSchema::generated_code(
                "The generated code snippet",
                "Brief explanation of logic",
            ),
        )
        .await
    }

    pub async fn analyze(&self, code: &str, language: &str) -> Result<CodeAnalysis, AssistantError> {
        self.structured(
            "analyze",
            prompt::build_analyze_prompt(code, language),
            OutputSchema::code_analysis(),
        )
        .await
    }

    pub async fn convert(
        &self,
        code: &str,
        from: &str,
        to: &str,
    ) -> Result<GeneratedCode, AssistantError> {
        self.structured(
            "convert",
            prompt::build_convert_prompt(code, from, to),
            OutputSchema::generated_code(
                "The converted code",
                "Key changes made during conversion",
            ),
        )
        .await
    }

    pub async fn compare_versions(
        &self,
        old_code: &str,
        new_code: &str,
    ) -> Result<DiffReport, AssistantError> {
        self.structured(
            "diff",
            prompt::build_diff_prompt(old_code, new_code),
            OutputSchema::diff_report(),
        )
        .await
    }

    /// Returns SVG markup, or an empty string if the request failed.
    pub async fn generate_flowchart_svg(&self, code: &str) -> String {
        let request = CompletionRequest::text(prompt::build_flowchart_prompt(code));

        match self.backend.complete(&request).await {
            Ok(text) => strip_code_fences(&text),
            Err(e) => {
                crate::warn!("{} Flowchart generation failed: {e}", Style::warning("Warning:"));
                String::new()
            }
        }
    }

    /// Returns the simulated console output, or a fallback message.
    pub async fn simulate_runner(&self, code: &str, language: &str) -> String {
        let request = CompletionRequest::text(prompt::build_runner_prompt(code, language));

        match self.backend.complete(&request).await {
            Ok(text) if text.is_empty() => RUNNER_NO_OUTPUT.to_string(),
            Ok(text) => text,
            Err(e) => {
                crate::warn!("{} Simulation failed: {e}", Style::warning("Warning:"));
                RUNNER_FAILED.to_string()
            }
        }
    }

    async fn structured<T>(
        &self,
        operation: &str,
        prompt: String,
        schema: OutputSchema,
    ) -> Result<T, AssistantError>
    where
        T: serde::de::DeserializeOwned + Validate,
    {
        let request = CompletionRequest::structured(prompt, schema);
        let result = match self.backend.complete(&request).await {
            Ok(text) => decode(&text),
            Err(e) => Err(e),
        };

        if let Err(e) = &result {
            crate::debug!("{operation} failed: {e}");
        }
        result
    }
}

/// Removes markdown fence markers (```` ```xml ````, ```` ```svg ````, ```` ``` ````)
/// wherever they occur and leaves everything else untouched.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```xml", "")
        .replace("```svg", "")
        .replace("```", "")
}
