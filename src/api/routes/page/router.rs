//! Router for the HTML page

use std::sync::{Arc, RwLock};

use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};

use super::templates::{PageData, render_page};
use crate::api::public::ApiError;
use crate::api::routes::twin::submit;
use crate::api::state::AppState;
use crate::twin::{FormInput, ResponseView};

type SharedState = Arc<RwLock<AppState>>;

fn page(state: &SharedState, alert: Option<String>) -> Result<String, ApiError> {
    let shared = state.read().expect("Unable to read shared state");
    let owner = &shared.twin.owner;
    let timezone = owner.timezone.name();
    let view = ResponseView::from_output(shared.view.output.as_ref(), timezone);

    let mut data = PageData::new(
        owner,
        shared.form.clone(),
        shared.twin.citation_source().citations(),
        view,
    );
    data.model = shared.config.llm_model.clone();
    data.in_flight = shared.view.in_flight;
    data.alert = alert.or_else(|| shared.view.last_error.clone());

    Ok(render_page(&shared.pages, &data)?)
}

async fn index(State(state): State<SharedState>) -> Result<Html<String>, ApiError> {
    Ok(Html(page(&state, None)?))
}

/// Handle the form post. Successful and failed dispatches both land
/// back on the page; the failure shows up as the alert.
async fn submit_form(
    State(state): State<SharedState>,
    Form(form): Form<FormInput>,
) -> Result<Response, ApiError> {
    match submit(&state, form).await {
        Ok(_) => Ok(Redirect::to("/").into_response()),
        Err(err) if err.status() == StatusCode::BAD_GATEWAY => {
            Ok(Redirect::to("/").into_response())
        }
        Err(err) => {
            tracing::warn!("Rejected form submission: {}", err.message());
            let html = page(&state, Some(err.message()))?;
            Ok((err.status(), Html(html)).into_response())
        }
    }
}

/// Create the page router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", get(index))
        .route("/submit", post(submit_form))
}
