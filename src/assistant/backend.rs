//! Transport to the remote model.
//!
//! [`ModelBackend`] is the seam between the prompt/schema layer and the
//! network. [`OpenAiBackend`] talks to any OpenAI-compatible
//! `chat/completions` endpoint; tests substitute scripted backends.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::AssistantError;
use super::schema::OutputSchema;
use super::sse_parser::{collect_text, sse_to_text_stream};

/// One prompt, optionally constrained to a JSON shape.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub schema: Option<OutputSchema>,
}

impl CompletionRequest {
    pub const fn text(prompt: String) -> Self {
        Self {
            prompt,
            schema: None,
        }
    }

    pub const fn structured(prompt: String, schema: OutputSchema) -> Self {
        Self {
            prompt,
            schema: Some(schema),
        }
    }
}

/// Sends a completion request and returns the model's text (JSON text when a
/// schema is attached).
#[async_trait]
pub trait ModelBackend: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AssistantError>;
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    json_schema: JsonSchemaFormat<'a>,
}

#[derive(Debug, Serialize)]
struct JsonSchemaFormat<'a> {
    name: &'a str,
    strict: bool,
    schema: &'a Value,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Backend for OpenAI-compatible chat-completion endpoints.
///
/// `endpoint` includes the API version prefix, e.g.
/// `http://localhost:11434/v1` or
/// `https://generativelanguage.googleapis.com/v1beta/openai`.
pub struct OpenAiBackend {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl OpenAiBackend {
    pub fn new(endpoint: String, model: String, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            model,
            api_key,
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl ModelBackend for OpenAiBackend {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AssistantError> {
        let url = self.completions_url();

        // Structured answers come back whole; free text is streamed.
        let chat_request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![Message {
                role: "user",
                content: &request.prompt,
            }],
            stream: request.schema.is_none(),
            response_format: request.schema.as_ref().map(|schema| ResponseFormat {
                kind: "json_schema",
                json_schema: JsonSchemaFormat {
                    name: schema.name,
                    strict: true,
                    schema: &schema.schema,
                },
            }),
        };

        crate::debug!(
            "POST {url} (model: {}, schema: {})",
            self.model,
            request.schema.as_ref().map_or("none", |s| s.name)
        );

        let mut http_request = self.client.post(&url).json(&chat_request);

        if let Some(api_key) = &self.api_key {
            http_request = http_request.header("Authorization", format!("Bearer {api_key}"));
        }

        let response = http_request.send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AssistantError::Status { status, body });
        }

        if request.schema.is_none() {
            return collect_text(sse_to_text_stream(response.bytes_stream())).await;
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            AssistantError::MalformedResponse(format!("unreadable completion body: {e}"))
        })?;

        Ok(completion
            .choices
            .into_iter()
            .filter_map(|choice| choice.message.content)
            .collect())
    }
}
