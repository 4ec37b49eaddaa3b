use std::sync::Arc;

use chrono::{DateTime, Utc};
use handlebars::Handlebars;

use super::citations::{CitationSource, StaticCitations};
use super::dispatch::dispatch;
use super::error::TwinError;
use super::form::FormInput;
use super::models::{TwinRequest, TwinResponse};
use super::slots::{MockSlotSource, SlotSource};
use crate::ai::{SharedGenerator, prompt};
use crate::core::Owner;

/// Everything needed to turn a form submission into a response.
/// Slot and citation sources are pluggable so real calendar or
/// search integrations can replace the mocks.
#[derive(Clone)]
pub struct Twin {
    pub owner: Owner,
    generator: SharedGenerator,
    slots: Arc<dyn SlotSource>,
    citations: Arc<dyn CitationSource>,
    templates: Arc<Handlebars<'static>>,
}

impl Twin {
    pub fn new(owner: Owner, generator: SharedGenerator) -> Self {
        let slots = Arc::new(MockSlotSource::new(owner.timezone));
        Self {
            owner,
            generator,
            slots,
            citations: Arc::new(StaticCitations),
            templates: Arc::new(prompt::templates()),
        }
    }

    pub fn with_slot_source(mut self, slots: Arc<dyn SlotSource>) -> Self {
        self.slots = slots;
        self
    }

    pub fn with_citation_source(mut self, citations: Arc<dyn CitationSource>) -> Self {
        self.citations = citations;
        self
    }

    pub fn slot_source(&self) -> &dyn SlotSource {
        self.slots.as_ref()
    }

    pub fn citation_source(&self) -> &dyn CitationSource {
        self.citations.as_ref()
    }

    pub fn system_instruction(&self) -> anyhow::Result<String> {
        prompt::system_instruction(&self.templates, &self.owner.name, self.owner.timezone.name())
    }

    pub fn build_request(&self, form: FormInput, now: DateTime<Utc>) -> Result<TwinRequest, TwinError> {
        form.into_request(&self.owner, self.slots.as_ref(), self.citations.as_ref(), now)
    }

    /// Build the request and dispatch it. A form that fails
    /// validation never reaches the model.
    pub async fn submit(
        &self,
        form: FormInput,
        now: DateTime<Utc>,
    ) -> Result<(TwinRequest, TwinResponse), TwinError> {
        let request = self.build_request(form, now)?;
        let response = dispatch(self.generator.as_ref(), &self.templates, &request)
            .await
            .inspect_err(|e| tracing::error!("DWT processing error: {}", e))?;
        tracing::info!(
            "Processed request from {}: intent={} confidence={:.2}",
            request.requester_name,
            response.intent,
            response.confidence
        );
        Ok((request, response))
    }
}
