//! Server-Sent Events (SSE) parser for OpenAI-compatible streaming responses.
//!
//! Free-text modes (flowchart, runner) request a streamed completion and
//! collect the deltas into one string.

use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use serde::Deserialize;

use super::error::AssistantError;

#[derive(Debug, Deserialize)]
struct StreamResponse {
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    delta: Delta,
}

#[derive(Debug, Deserialize)]
struct Delta {
    content: Option<String>,
}

/// What a single SSE line means for the text stream.
#[derive(Debug, PartialEq, Eq)]
enum SseLine {
    Text(String),
    Done,
    Skip,
}

/// Converts a raw SSE byte stream into a stream of text chunks.
///
/// Lines are split on raw bytes before UTF-8 decoding, so a multi-byte
/// character split across network chunks is decoded intact. The stream ends at
/// `data: [DONE]` or when the body ends; a transport error ends it with `Err`.
pub fn sse_to_text_stream(
    byte_stream: impl Stream<Item = reqwest::Result<Bytes>> + Send + 'static,
) -> impl Stream<Item = Result<String, AssistantError>> + Send {
    async_stream::stream! {
        let mut byte_stream = std::pin::pin!(byte_stream);
        let mut buffer: Vec<u8> = Vec::new();

        while let Some(chunk_result) = byte_stream.next().await {
            let chunk = match chunk_result {
                Ok(c) => c,
                Err(e) => {
                    yield Err(AssistantError::Http(e));
                    return;
                }
            };

            buffer.extend_from_slice(&chunk);

            while let Some(line_end) = buffer.iter().position(|b| *b == b'\n') {
                let line: Vec<u8> = buffer.drain(..=line_end).collect();
                match parse_sse_line(String::from_utf8_lossy(&line).trim()) {
                    SseLine::Text(content) => {
                        yield Ok(content);
                    }
                    SseLine::Done => return,
                    SseLine::Skip => {}
                }
            }
        }

        // Body ended without a trailing newline.
        if let SseLine::Text(content) = parse_sse_line(String::from_utf8_lossy(&buffer).trim()) {
            yield Ok(content);
        }
    }
}

/// Drains a text stream into a single string, stopping at the first error.
pub async fn collect_text(
    stream: impl Stream<Item = Result<String, AssistantError>>,
) -> Result<String, AssistantError> {
    let mut stream = std::pin::pin!(stream);
    let mut text = String::new();

    while let Some(chunk) = stream.next().await {
        text.push_str(&chunk?);
    }

    Ok(text)
}

fn parse_sse_line(line: &str) -> SseLine {
    let Some(payload) = line.strip_prefix("data:") else {
        return SseLine::Skip;
    };
    let payload = payload.trim_start();

    if payload == "[DONE]" {
        return SseLine::Done;
    }

    let Ok(response) = serde_json::from_str::<StreamResponse>(payload) else {
        return SseLine::Skip;
    };

    let content: String = response
        .choices
        .into_iter()
        .filter_map(|c| c.delta.content)
        .collect();

    if content.is_empty() {
        SseLine::Skip
    } else {
        SseLine::Text(content)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use futures_util::stream;

    fn byte_stream(chunks: Vec<Vec<u8>>) -> impl Stream<Item = reqwest::Result<Bytes>> + Send {
        stream::iter(chunks.into_iter().map(|c| Ok(Bytes::from(c))))
    }

    #[test]
    fn test_parse_sse_line_with_content() {
        let line = r#"data: {"choices":[{"delta":{"content":"Hello"}}]}"#;
        assert_eq!(parse_sse_line(line), SseLine::Text("Hello".to_string()));
    }

    #[test]
    fn test_parse_sse_line_without_space_after_prefix() {
        let line = r#"data:{"choices":[{"delta":{"content":"x"}}]}"#;
        assert_eq!(parse_sse_line(line), SseLine::Text("x".to_string()));
    }

    #[test]
    fn test_parse_sse_line_empty_and_missing_content() {
        assert_eq!(
            parse_sse_line(r#"data: {"choices":[{"delta":{"content":""}}]}"#),
            SseLine::Skip
        );
        assert_eq!(
            parse_sse_line(r#"data: {"choices":[{"delta":{}}]}"#),
            SseLine::Skip
        );
    }

    #[test]
    fn test_parse_sse_line_multiple_choices() {
        let line =
            r#"data: {"choices":[{"delta":{"content":"Hello"}},{"delta":{"content":" World"}}]}"#;
        assert_eq!(parse_sse_line(line), SseLine::Text("Hello World".to_string()));
    }

    #[test]
    fn test_parse_sse_line_done_marker() {
        assert_eq!(parse_sse_line("data: [DONE]"), SseLine::Done);
    }

    #[test]
    fn test_parse_sse_line_ignores_non_data_lines() {
        assert_eq!(parse_sse_line(""), SseLine::Skip);
        assert_eq!(parse_sse_line(": keep-alive"), SseLine::Skip);
        assert_eq!(parse_sse_line("event: message"), SseLine::Skip);
        assert_eq!(parse_sse_line("data: not json"), SseLine::Skip);
    }

    #[tokio::test]
    async fn test_collect_text_across_chunks() {
        let stream = sse_to_text_stream(byte_stream(vec![
            b"data: {\"choices\":[{\"delta\":{\"content\":\"Hello\"}}]}\n\ndata: {\"choi".to_vec(),
            b"ces\":[{\"delta\":{\"content\":\", world\"}}]}\n\n".to_vec(),
            b"data: [DONE]\n\n".to_vec(),
            b"data: {\"choices\":[{\"delta\":{\"content\":\"ignored\"}}]}\n".to_vec(),
        ]));

        assert_eq!(collect_text(stream).await.unwrap(), "Hello, world");
    }

    #[tokio::test]
    async fn test_collect_text_multibyte_split_across_chunks() {
        let line = "data: {\"choices\":[{\"delta\":{\"content\":\"こんにちは\"}}]}\n".as_bytes();
        // Split inside the second character
        let (head, tail) = line.split_at(44);

        let stream = sse_to_text_stream(byte_stream(vec![head.to_vec(), tail.to_vec()]));
        assert_eq!(collect_text(stream).await.unwrap(), "こんにちは");
    }

    #[tokio::test]
    async fn test_collect_text_without_trailing_newline() {
        let stream = sse_to_text_stream(byte_stream(vec![
            b"data: {\"choices\":[{\"delta\":{\"content\":\"tail\"}}]}".to_vec(),
        ]));
        assert_eq!(collect_text(stream).await.unwrap(), "tail");
    }
}
