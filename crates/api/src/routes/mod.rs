pub mod auth;
pub mod generate;
pub mod health;
pub mod history;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/register                        register (public)
/// /auth/login                           login (public)
/// /auth/me                              current user (requires auth)
///
/// /generate/dockerfile                  build file download (optional auth)
/// /generate/compose                     manifest download (optional auth)
/// /generate/bundle                      both artifacts as JSON (optional auth)
///
/// /history/{kind}                       list own records (requires auth)
/// /history/{kind}/{id}                  delete (requires auth)
/// /history/{kind}/{id}/artifact         regenerate and download (requires auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/generate", generate::router())
        .nest("/history", history::router())
}
