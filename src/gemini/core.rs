//! Client for the Gemini `generateContent` endpoint.

use anyhow::{Error, Result, bail};
use async_trait::async_trait;
use serde_json::{Value, json};

use crate::ai::TextGenerator;

// Request body shape:
// {
//   "systemInstruction": {"parts": [{"text": "..."}]},
//   "contents": [{"role": "user", "parts": [{"text": "{...}"}]}],
//   "generationConfig": {"responseMimeType": "application/json", "temperature": 0.3}
// }
pub async fn generate_content(
    system_instruction: &str,
    user_text: &str,
    api_hostname: &str,
    api_key: &str,
    model: &str,
    temperature: f64,
) -> Result<Value, Error> {
    let payload = json!({
        "systemInstruction": {"parts": [{"text": system_instruction}]},
        "contents": [{"role": "user", "parts": [{"text": user_text}]}],
        "generationConfig": {
            "responseMimeType": "application/json",
            "temperature": temperature,
        },
    });
    let url = format!(
        "{}/v1beta/models/{}:generateContent",
        api_hostname.trim_end_matches("/"),
        model
    );
    let response = reqwest::Client::new()
        .post(url)
        .header("x-goog-api-key", api_key)
        .header("Content-Type", "application/json")
        .json(&payload)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        bail!("generateContent failed with {}: {}", status, body);
    }

    Ok(response.json().await?)
}

/// Concatenated text parts of the first candidate. A blocked prompt
/// comes back without candidates and yields `None`.
pub fn response_text(response: &Value) -> Option<String> {
    let parts = response["candidates"][0]["content"]["parts"].as_array()?;
    let text: String = parts.iter().filter_map(|p| p["text"].as_str()).collect();
    Some(text)
}

#[derive(Clone, Debug)]
pub struct GeminiClient {
    api_hostname: String,
    api_key: String,
    model: String,
    temperature: f64,
}

impl GeminiClient {
    pub fn new(api_hostname: &str, api_key: &str, model: &str, temperature: f64) -> Self {
        Self {
            api_hostname: api_hostname.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            temperature,
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, system_instruction: &str, user_text: &str) -> Result<Option<String>> {
        let response = generate_content(
            system_instruction,
            user_text,
            &self.api_hostname,
            &self.api_key,
            &self.model,
            self.temperature,
        )
        .await?;

        if response["candidates"].as_array().is_none_or(|c| c.is_empty()) {
            tracing::warn!(
                "Gemini returned no candidates: {}",
                response["promptFeedback"]
            );
        }
        Ok(response_text(&response))
    }

    fn name(&self) -> String {
        format!("gemini/{}", self.model)
    }
}
