//! API routes module

pub mod page;
pub mod twin;

use std::sync::{Arc, RwLock};

use crate::api::state::AppState;
use axum::Router;

type SharedState = Arc<RwLock<AppState>>;

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    Router::new()
        // Twin request routes
        .nest("/twin", twin::router())
}
