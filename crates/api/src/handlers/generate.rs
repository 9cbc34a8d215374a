//! Handlers for the `/generate` resource.
//!
//! Callers with a valid bearer token get their request recorded in history;
//! everyone else receives the same artifact without a record.

use axum::extract::State;
use axum::Json;
use dockforge_core::bundle::ArtifactBundle;
use dockforge_core::normalize::RawEnvironment;
use dockforge_core::spec::ArtifactKind;
use dockforge_core::types::UserId;

use crate::error::AppResult;
use crate::middleware::auth::MaybeAuthUser;
use crate::response::{DataResponse, Download};
use crate::state::AppState;

/// POST /api/v1/generate/dockerfile
pub async fn dockerfile(
    State(state): State<AppState>,
    MaybeAuthUser(owner): MaybeAuthUser,
    Json(raw): Json<RawEnvironment>,
) -> AppResult<Download> {
    generate(&state, ArtifactKind::Dockerfile, owner, &raw).await
}

/// POST /api/v1/generate/compose
pub async fn compose(
    State(state): State<AppState>,
    MaybeAuthUser(owner): MaybeAuthUser,
    Json(raw): Json<RawEnvironment>,
) -> AppResult<Download> {
    generate(&state, ArtifactKind::Compose, owner, &raw).await
}

/// POST /api/v1/generate/bundle
pub async fn bundle(
    State(state): State<AppState>,
    MaybeAuthUser(owner): MaybeAuthUser,
    Json(raw): Json<RawEnvironment>,
) -> AppResult<Json<DataResponse<ArtifactBundle>>> {
    let bundle = state.generator.generate_bundle(&raw, owner).await?;
    Ok(Json(DataResponse { data: bundle }))
}

async fn generate(
    state: &AppState,
    kind: ArtifactKind,
    owner: Option<UserId>,
    raw: &RawEnvironment,
) -> AppResult<Download> {
    let artifact = state.generator.generate(kind, raw, owner).await?;
    Ok(Download(artifact))
}
