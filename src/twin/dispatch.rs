//! Sends one request to the hosted model and validates what comes
//! back. A single attempt per submission, no retries.

use handlebars::Handlebars;

use super::error::TwinError;
use super::models::{TwinRequest, TwinResponse};
use crate::ai::TextGenerator;
use crate::ai::prompt::system_instruction;

pub async fn dispatch(
    generator: &dyn TextGenerator,
    templates: &Handlebars<'_>,
    request: &TwinRequest,
) -> Result<TwinResponse, TwinError> {
    let user_text = serde_json::to_string(request).map_err(TwinError::Serialize)?;
    let instruction = system_instruction(templates, &request.owner_name, &request.owner_timezone)
        .map_err(TwinError::Upstream)?;

    tracing::debug!(
        "Dispatching request from {} to {}",
        request.requester_name,
        generator.name()
    );

    let text = generator
        .generate(&instruction, &user_text)
        .await
        .map_err(TwinError::Upstream)?
        .unwrap_or_default();

    let response = parse_response(&text)?;
    Ok(sanitize(response, request))
}

/// Parse and validate the raw model output.
pub fn parse_response(text: &str) -> Result<TwinResponse, TwinError> {
    let text = strip_code_fence(text);
    if text.is_empty() {
        return Err(TwinError::EmptyResponse);
    }

    let value: serde_json::Value =
        serde_json::from_str(text).map_err(TwinError::MalformedResponse)?;
    let response: TwinResponse = serde_json::from_value(value)
        .map_err(|e| TwinError::InvalidResponse(e.to_string()))?;
    response.validate().map_err(TwinError::InvalidResponse)?;

    Ok(response)
}

// Models sometimes wrap JSON mode output in a markdown fence anyway,
// with or without a language tag and newline after the opening fence.
fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric())
        .trim_end()
        .trim_end_matches("```")
        .trim()
}

/// Drop citations the request never offered.
fn sanitize(mut response: TwinResponse, request: &TwinRequest) -> TwinResponse {
    if response.questions.len() > 2 {
        tracing::warn!(
            "Model asked {} clarifying questions, expected at most 2",
            response.questions.len()
        );
    }

    let before = response.citations_used.len();
    response
        .citations_used
        .retain(|title| request.citation_titles().any(|t| t == title.as_str()));
    if response.citations_used.len() < before {
        tracing::warn!(
            "Dropped {} citation(s) not present in the request",
            before - response.citations_used.len()
        );
    }

    response
}
