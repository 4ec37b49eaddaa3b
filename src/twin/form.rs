//! The simulated inbound request as a user fills it in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::citations::CitationSource;
use super::error::TwinError;
use super::models::{IntentHint, TwinRequest};
use super::slots::SlotSource;
use crate::core::Owner;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FormInput {
    #[serde(default)]
    pub requester_name: String,
    #[serde(default)]
    pub requester_email: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub intent_hint: IntentHint,
}

impl Default for FormInput {
    fn default() -> Self {
        Self {
            requester_name: String::from("Rhea"),
            requester_email: String::from("rhea@partner.com"),
            topic: String::from("FMCG GTM Brief Review"),
            message: String::from(
                "Can we meet this week to sanity-check the FMCG GTM brief? What should we prep? We need to move fast.",
            ),
            intent_hint: IntentHint::Meeting,
        }
    }
}

impl FormInput {
    /// Fails on the first blank required field.
    pub fn validate(&self) -> Result<(), TwinError> {
        let required = [
            ("requester_name", &self.requester_name),
            ("requester_email", &self.requester_email),
            ("topic", &self.topic),
            ("message", &self.message),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(TwinError::MissingField(name));
            }
        }
        Ok(())
    }

    /// Validate and assemble the request sent to the model.
    pub fn into_request(
        self,
        owner: &Owner,
        slots: &dyn SlotSource,
        citations: &dyn CitationSource,
        now: DateTime<Utc>,
    ) -> Result<TwinRequest, TwinError> {
        self.validate()?;

        Ok(TwinRequest {
            owner_name: owner.name.clone(),
            owner_timezone: owner.timezone.name().to_string(),
            requester_name: self.requester_name,
            requester_email: self.requester_email,
            intent_hint: self.intent_hint,
            topic: self.topic,
            message: self.message,
            citations: citations.citations(),
            candidate_slots: slots.candidate_slots(now),
        })
    }
}
