use std::sync::Arc;

use handlebars::Handlebars;

use crate::core::AppConfig;
use crate::twin::{FormInput, Twin, TwinState};

pub struct AppState {
    pub twin: Twin,
    // In-flight flag and the last response, replaced on every transition
    pub view: TwinState,
    // What the form showed on the last submission
    pub form: FormInput,
    pub pages: Arc<Handlebars<'static>>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(twin: Twin, config: AppConfig) -> Self {
        Self {
            twin,
            view: TwinState::default(),
            form: FormInput::default(),
            pages: Arc::new(crate::api::routes::page::templates()),
            config,
        }
    }
}
