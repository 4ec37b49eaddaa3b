use std::{env, fmt, str::FromStr};

use anyhow::{Result, anyhow};
use chrono_tz::Tz;

/// Which hosted model API the twin forwards requests to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LlmProvider {
    Gemini,
    OpenAi,
}

impl LlmProvider {
    pub fn default_hostname(&self) -> &'static str {
        match self {
            LlmProvider::Gemini => "https://generativelanguage.googleapis.com",
            LlmProvider::OpenAi => "https://api.openai.com",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            LlmProvider::Gemini => "gemini-2.5-flash",
            LlmProvider::OpenAi => "gpt-4.1-mini",
        }
    }
}

impl FromStr for LlmProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "gemini" => Ok(LlmProvider::Gemini),
            "openai" => Ok(LlmProvider::OpenAi),
            other => Err(anyhow!("Unknown LLM provider: {}", other)),
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LlmProvider::Gemini => write!(f, "gemini"),
            LlmProvider::OpenAi => write!(f, "openai"),
        }
    }
}

/// The person the twin answers on behalf of. Fixed per deployment.
#[derive(Clone, Debug)]
pub struct Owner {
    pub name: String,
    pub timezone: Tz,
    pub email: String,
}

impl Default for Owner {
    fn default() -> Self {
        Self {
            name: String::from("Pragya Khattar"),
            timezone: chrono_tz::Asia::Kolkata,
            email: String::from("pragya@acmecorp.com"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub owner: Owner,
    pub llm_provider: LlmProvider,
    pub llm_api_hostname: String,
    pub llm_api_key: String,
    pub llm_model: String,
    pub llm_temperature: f64,
}

impl AppConfig {
    /// Build the config from `DWT_*` environment variables, falling
    /// back to the demo owner and the provider's public endpoint.
    pub fn from_env() -> Result<Self> {
        let defaults = Owner::default();
        let owner_name = env::var("DWT_OWNER_NAME").unwrap_or(defaults.name);
        let owner_email = env::var("DWT_OWNER_EMAIL").unwrap_or(defaults.email);
        let timezone = match env::var("DWT_OWNER_TIMEZONE") {
            Ok(tz) => tz
                .parse::<Tz>()
                .map_err(|e| anyhow!("Invalid DWT_OWNER_TIMEZONE {}: {}", tz, e))?,
            Err(_) => defaults.timezone,
        };

        let llm_provider = match env::var("DWT_LLM_PROVIDER") {
            Ok(p) => p.parse()?,
            Err(_) => LlmProvider::Gemini,
        };
        let llm_api_hostname = env::var("DWT_LLM_HOST")
            .unwrap_or_else(|_| llm_provider.default_hostname().to_string());
        let llm_model = env::var("DWT_LLM_MODEL")
            .unwrap_or_else(|_| llm_provider.default_model().to_string());
        let llm_api_key = match llm_provider {
            LlmProvider::Gemini => env::var("GEMINI_API_KEY").or_else(|_| env::var("API_KEY")),
            LlmProvider::OpenAi => env::var("OPENAI_API_KEY"),
        }
        .unwrap_or_else(|_| {
            tracing::warn!("No API key set for {}, requests will be rejected", llm_provider);
            String::new()
        });
        let llm_temperature = match env::var("DWT_LLM_TEMPERATURE") {
            Ok(t) => t
                .parse::<f64>()
                .map_err(|e| anyhow!("Invalid DWT_LLM_TEMPERATURE {}: {}", t, e))?,
            Err(_) => 0.3,
        };

        Ok(Self {
            owner: Owner {
                name: owner_name,
                timezone,
                email: owner_email,
            },
            llm_provider,
            llm_api_hostname,
            llm_api_key,
            llm_model,
            llm_temperature,
        })
    }
}
