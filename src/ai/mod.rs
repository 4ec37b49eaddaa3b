pub mod prompt;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::core::{AppConfig, LlmProvider};
use crate::gemini::GeminiClient;
use crate::openai::OpenAiClient;

/// A hosted model that turns a system instruction plus one user turn
/// into text. `Ok(None)` means the call succeeded but produced no
/// text at all.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, system_instruction: &str, user_text: &str) -> Result<Option<String>>;
    fn name(&self) -> String;
}

pub type SharedGenerator = Arc<dyn TextGenerator>;

/// Build the generator selected by `DWT_LLM_PROVIDER`.
pub fn generator_from_config(config: &AppConfig) -> SharedGenerator {
    let AppConfig {
        llm_provider,
        llm_api_hostname,
        llm_api_key,
        llm_model,
        llm_temperature,
        ..
    } = config;

    match llm_provider {
        LlmProvider::Gemini => Arc::new(GeminiClient::new(
            llm_api_hostname,
            llm_api_key,
            llm_model,
            *llm_temperature,
        )),
        LlmProvider::OpenAi => Arc::new(OpenAiClient::new(
            llm_api_hostname,
            llm_api_key,
            llm_model,
            *llm_temperature,
        )),
    }
}
