//! Route definitions for the `/history` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::history;
use crate::state::AppState;

/// Routes mounted at `/history`.
///
/// ```text
/// GET    /{kind}                -> list
/// DELETE /{kind}/{id}           -> delete
/// GET    /{kind}/{id}/artifact  -> artifact
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{kind}", get(history::list))
        .route("/{kind}/{id}", delete(history::delete))
        .route("/{kind}/{id}/artifact", get(history::artifact))
}
