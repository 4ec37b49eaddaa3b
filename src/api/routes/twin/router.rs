//! Router for the twin API

use std::sync::{Arc, RwLock};

use axum::{Json, Router, extract::State, routing::get, routing::post};
use chrono::Utc;

use super::public;
use crate::api::public::ApiError;
use crate::api::state::AppState;
use crate::twin::{FormInput, GENERIC_FAILURE, Transition, format_slot};

type SharedState = Arc<RwLock<AppState>>;

/// Run one submission through the state transitions. Shared by the
/// JSON endpoint and the HTML form.
pub async fn submit(
    state: &SharedState,
    form: FormInput,
) -> Result<public::SubmitResponse, ApiError> {
    let twin = {
        let mut shared = state.write().expect("Unable to write shared state");
        shared.form = form.clone();
        // Invalid input never touches the in-flight flag
        form.validate().map_err(ApiError::from_twin)?;
        if !shared.view.can_submit() {
            return Err(ApiError::in_flight());
        }
        shared.view = shared.view.apply(Transition::SubmitStart);
        shared.twin.clone()
    };

    // Detached so the closing transition runs even if the client hangs up
    let task_state = Arc::clone(state);
    let handle = tokio::spawn(async move {
        let result = twin.submit(form, Utc::now()).await;
        let mut shared = task_state.write().expect("Unable to write shared state");
        let transition = match &result {
            Ok((_, response)) => Transition::SubmitSuccess(response.clone()),
            Err(err) => Transition::SubmitFailure(err.user_message()),
        };
        shared.view = shared.view.apply(transition);
        result
    });

    match handle.await {
        Ok(Ok((request, response))) => Ok(public::SubmitResponse { request, response }),
        Ok(Err(err)) => Err(ApiError::from_twin(err)),
        Err(err) => {
            let mut shared = state.write().expect("Unable to write shared state");
            shared.view = shared
                .view
                .apply(Transition::SubmitFailure(GENERIC_FAILURE.to_string()));
            Err(err.into())
        }
    }
}

async fn submit_handler(
    State(state): State<SharedState>,
    Json(form): Json<FormInput>,
) -> Result<Json<public::SubmitResponse>, ApiError> {
    let resp = submit(&state, form).await?;
    Ok(Json(resp))
}

async fn state_handler(State(state): State<SharedState>) -> Json<public::StateResponse> {
    let view = state
        .read()
        .expect("Unable to read shared state")
        .view
        .clone();
    Json(public::StateResponse {
        in_flight: view.in_flight,
        output: view.output,
        last_error: view.last_error,
    })
}

async fn citations_handler(State(state): State<SharedState>) -> Json<public::CitationsResponse> {
    let twin = state.read().expect("Unable to read shared state").twin.clone();
    Json(public::CitationsResponse {
        citations: twin.citation_source().citations(),
    })
}

async fn slots_handler(State(state): State<SharedState>) -> Json<public::SlotsResponse> {
    let twin = state.read().expect("Unable to read shared state").twin.clone();
    let timezone = twin.owner.timezone;
    let slots = twin
        .slot_source()
        .candidate_slots(Utc::now())
        .into_iter()
        .map(|slot| public::SlotResponse {
            display: format_slot(&slot, timezone),
            start_iso: slot.start_iso,
            end_iso: slot.end_iso,
        })
        .collect();

    Json(public::SlotsResponse {
        timezone: timezone.name().to_string(),
        slots,
    })
}

/// Create the twin router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/requests", post(submit_handler))
        .route("/state", get(state_handler))
        .route("/citations", get(citations_handler))
        .route("/slots", get(slots_handler))
}
