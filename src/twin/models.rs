//! Records that cross the boundary to the hosted model. Field names
//! are the wire contract the system instruction describes, so they
//! must not be renamed.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub title: String,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CandidateSlot {
    pub start_iso: String,
    pub end_iso: String,
}

/// The requester's guess at what they want. Only a hint for the model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IntentHint {
    Info,
    #[default]
    Meeting,
    Unknown,
}

impl FromStr for IntentHint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INFO" => Ok(IntentHint::Info),
            "MEETING" => Ok(IntentHint::Meeting),
            "UNKNOWN" => Ok(IntentHint::Unknown),
            other => Err(format!("expected INFO, MEETING or UNKNOWN, got {}", other)),
        }
    }
}

impl fmt::Display for IntentHint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IntentHint::Info => write!(f, "INFO"),
            IntentHint::Meeting => write!(f, "MEETING"),
            IntentHint::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TwinRequest {
    pub owner_name: String,
    pub owner_timezone: String,
    pub requester_name: String,
    pub requester_email: String,
    pub intent_hint: IntentHint,
    pub topic: String,
    pub message: String,
    pub citations: Vec<Citation>,
    pub candidate_slots: Vec<CandidateSlot>,
}

impl TwinRequest {
    pub fn citation_titles(&self) -> impl Iterator<Item = &str> {
        self.citations.iter().map(|c| c.title.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Intent {
    Info,
    Meeting,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Intent::Info => write!(f, "INFO"),
            Intent::Meeting => write!(f, "MEETING"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Agenda {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration_min: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<String>,
}

/// The model's reply. Only `intent` is mandatory; everything else
/// falls back to an empty value when missing or null. A field of the
/// wrong type fails deserialization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TwinResponse {
    pub intent: Intent,
    #[serde(default, deserialize_with = "null_as_default")]
    pub confidence: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub questions: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mini_brief: String,
    #[serde(default)]
    pub agenda: Option<Agenda>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rendered_slots: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub citations_used: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes_for_orchestrator: String,
}

impl TwinResponse {
    pub fn is_meeting(&self) -> bool {
        self.intent == Intent::Meeting
    }

    /// Checks the constraints serde can't express.
    pub fn validate(&self) -> Result<(), String> {
        if !self.confidence.is_finite() || !(0.0..=1.0).contains(&self.confidence) {
            return Err(format!(
                "confidence must be within [0, 1], got {}",
                self.confidence
            ));
        }
        Ok(())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
