//! Handlers for the `/history` resource. All routes require authentication
//! and only ever see the caller's own records.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use dockforge_core::error::CoreError;
use dockforge_core::spec::ArtifactKind;
use dockforge_core::store::HistoryEntry;
use dockforge_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, Download};
use crate::state::AppState;

/// GET /api/v1/history/{kind}
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(kind): Path<String>,
) -> AppResult<Json<DataResponse<Vec<HistoryEntry>>>> {
    let kind = parse_kind(&kind)?;
    let entries = state.history.list(kind, auth.user_id).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// GET /api/v1/history/{kind}/{id}/artifact
///
/// Regenerates the artifact from the stored record.
pub async fn artifact(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((kind, id)): Path<(String, DbId)>,
) -> AppResult<Download> {
    let kind = parse_kind(&kind)?;
    let artifact = state.generator.regenerate(kind, id, auth.user_id).await?;
    Ok(Download(artifact))
}

/// DELETE /api/v1/history/{kind}/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((kind, id)): Path<(String, DbId)>,
) -> AppResult<StatusCode> {
    let kind = parse_kind(&kind)?;
    if !state.history.delete(kind, id, auth.user_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "history record",
            id,
        }));
    }
    tracing::info!(kind = %kind, id, user_id = auth.user_id, "History record deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn parse_kind(raw: &str) -> AppResult<ArtifactKind> {
    ArtifactKind::parse(raw).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Unknown artifact kind '{raw}'. Expected 'dockerfile' or 'compose'"
        ))
    })
}
