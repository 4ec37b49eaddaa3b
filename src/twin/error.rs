use thiserror::Error;

/// Message shown to the user for any failed submission. The detailed
/// error only goes to the logs.
pub const GENERIC_FAILURE: &str =
    "Failed to process request. Please check your API key and try again.";

#[derive(Debug, Error)]
pub enum TwinError {
    /// A required form field was blank. Nothing was dispatched.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Failed to serialize request: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The call to the hosted model failed outright.
    #[error("Model call failed: {0}")]
    Upstream(#[source] anyhow::Error),

    #[error("Empty response from model")]
    EmptyResponse,

    #[error("Model response is not JSON: {0}")]
    MalformedResponse(#[source] serde_json::Error),

    /// Valid JSON that doesn't match the response schema.
    #[error("Invalid upstream response: {0}")]
    InvalidResponse(String),
}

impl TwinError {
    /// True for failures that happened after the request left the form.
    pub fn is_dispatch_failure(&self) -> bool {
        !matches!(self, TwinError::MissingField(_))
    }

    /// What the user gets to see.
    pub fn user_message(&self) -> String {
        match self {
            TwinError::MissingField(_) => self.to_string(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}
