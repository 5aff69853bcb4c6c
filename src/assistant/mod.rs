mod backend;
mod client;
mod error;
mod language;
mod prompt;
mod schema;
mod sse_parser;
mod types;

pub use backend::{CompletionRequest, ModelBackend, OpenAiBackend};
pub use client::{CodeAssistant, RUNNER_FAILED, RUNNER_NO_OUTPUT, strip_code_fences};
pub use error::AssistantError;
pub use language::{
    DEFAULT_LANGUAGE, DEFAULT_TARGET_LANGUAGE, SUPPORTED_LANGUAGES, print_languages,
    resolve_language,
};
pub use schema::{OutputSchema, Validate, decode};
pub use types::{CodeAnalysis, DiffReport, GeneratedCode, QualityMetrics};
