//! Test utilities for integration tests
#![allow(dead_code)]

use std::sync::{Arc, RwLock};

use axum::{Router, body::Body};
use serde_json::{Value, json};

use dwt::ai::generator_from_config;
use dwt::api::AppState;
use dwt::api::app;
use dwt::core::{AppConfig, LlmProvider, Owner};
use dwt::twin::Twin;

pub const GEMINI_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

pub fn test_config(llm_api_hostname: &str) -> AppConfig {
    AppConfig {
        owner: Owner::default(),
        llm_provider: LlmProvider::Gemini,
        llm_api_hostname: llm_api_hostname.to_string(),
        llm_api_key: String::from("test-api-key"),
        llm_model: String::from("gemini-2.5-flash"),
        llm_temperature: 0.3,
    }
}

/// Creates a test application router whose model calls go to
/// `llm_api_hostname`, along with a handle on its shared state.
pub fn test_app_with_state(llm_api_hostname: &str) -> (Router, Arc<RwLock<AppState>>) {
    let config = test_config(llm_api_hostname);
    let twin = Twin::new(config.owner.clone(), generator_from_config(&config));
    let state = Arc::new(RwLock::new(AppState::new(twin, config)));
    (app(Arc::clone(&state)), state)
}

pub fn test_app(llm_api_hostname: &str) -> Router {
    test_app_with_state(llm_api_hostname).0
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_to_json(body: Body) -> Value {
    serde_json::from_str(&body_to_string(body).await).unwrap()
}

/// Wrap the model's JSON text in a generateContent response.
pub fn gemini_reply(text: &str) -> String {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    })
    .to_string()
}

pub fn meeting_output() -> Value {
    json!({
        "intent": "MEETING",
        "confidence": 0.86,
        "questions": ["Which decision needs to be made by Friday?"],
        "mini_brief": "Goal: Sanity-check the FMCG GTM brief.\nContext: Launch timing is tight.\nNext Steps: Confirm a slot and share the brief.",
        "agenda": {
            "title": "FMCG GTM brief review",
            "duration_min": 25,
            "items": ["Introductions (2m)", "Context & constraints (5m)", "Options & trade-offs (10m)", "Decisions & owners (5m)", "Next steps (3m)"]
        },
        "rendered_slots": ["Tue, 2 Dec 10:00–10:25 IST", "Tue, 2 Dec 14:00–14:25 IST", "Wed, 3 Dec 11:30–11:55 IST"],
        "citations_used": ["FMCG Case Note.pdf"],
        "notes_for_orchestrator": "Requester email masked."
    })
}

pub fn info_output() -> Value {
    json!({
        "intent": "INFO",
        "confidence": 0.7,
        "questions": [],
        "mini_brief": "Goal: Share the memo template.\nContext: Drafting a decision memo.\nNext Steps: Send the template.",
        "agenda": {"title": "", "duration_min": 0, "items": []},
        "rendered_slots": [],
        "citations_used": [],
        "notes_for_orchestrator": ""
    })
}
