//! The two pieces of view state: whether a call is in flight and the
//! last response. Changed only through `TwinState::apply`, which
//! returns a fresh record.

use serde::Serialize;

use super::models::TwinResponse;

#[derive(Clone, Debug)]
pub enum Transition {
    SubmitStart,
    SubmitSuccess(TwinResponse),
    /// Carries the message shown to the user.
    SubmitFailure(String),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TwinState {
    pub in_flight: bool,
    pub output: Option<TwinResponse>,
    pub last_error: Option<String>,
}

impl TwinState {
    pub fn apply(&self, transition: Transition) -> TwinState {
        match transition {
            Transition::SubmitStart => TwinState {
                in_flight: true,
                output: None,
                last_error: None,
            },
            Transition::SubmitSuccess(response) => TwinState {
                in_flight: false,
                output: Some(response),
                last_error: None,
            },
            Transition::SubmitFailure(message) => TwinState {
                in_flight: false,
                output: None,
                last_error: Some(message),
            },
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.in_flight
    }
}
