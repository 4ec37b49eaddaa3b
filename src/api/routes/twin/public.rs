//! Public types for the twin API
use serde::{Deserialize, Serialize};

use crate::twin::{Citation, TwinRequest, TwinResponse};

#[derive(Serialize)]
pub struct SubmitResponse {
    pub request: TwinRequest,
    pub response: TwinResponse,
}

#[derive(Serialize, Deserialize)]
pub struct StateResponse {
    pub in_flight: bool,
    pub output: Option<TwinResponse>,
    pub last_error: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct CitationsResponse {
    pub citations: Vec<Citation>,
}

#[derive(Serialize, Deserialize)]
pub struct SlotResponse {
    pub start_iso: String,
    pub end_iso: String,
    // Human readable in the owner's timezone
    pub display: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct SlotsResponse {
    pub timezone: String,
    pub slots: Vec<SlotResponse>,
}
