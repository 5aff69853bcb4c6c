/// Failures at the boundary between this client and the remote model.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    /// The request could not be sent or the connection broke mid-response.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status (auth failures land here).
    #[error("API request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// The model returned no text.
    #[error("No response from the model")]
    EmptyResponse,

    /// The text is not JSON, does not match the declared shape, or breaks a value constraint.
    #[error("Malformed model response: {0}")]
    MalformedResponse(String),
}
