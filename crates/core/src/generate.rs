//! Request-level pipeline: normalize, synthesize, optionally record.

use std::sync::Arc;

use crate::buildfile::synthesize_build_file;
use crate::bundle::{synthesize_bundle, ArtifactBundle};
use crate::error::{CoreError, SynthesisError};
use crate::manifest::synthesize_manifest;
use crate::normalize::{normalize, RawEnvironment};
use crate::spec::{ArtifactKind, EnvironmentSpec};
use crate::store::HistoryStore;
use crate::types::{DbId, UserId};

/// MIME type both artifacts are delivered with.
pub const ARTIFACT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// A synthesized artifact ready to be sent to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub file_name: &'static str,
    pub content_type: &'static str,
    pub content: String,
}

/// Run the synthesizer for `kind`.
pub fn synthesize(kind: ArtifactKind, spec: &EnvironmentSpec) -> Result<Artifact, SynthesisError> {
    let content = match kind {
        ArtifactKind::Dockerfile => synthesize_build_file(spec)?,
        ArtifactKind::Compose => synthesize_manifest(spec)?,
    };
    Ok(Artifact {
        kind,
        file_name: kind.file_name(),
        content_type: ARTIFACT_CONTENT_TYPE,
        content,
    })
}

/// Stateless generator wired to a history collaborator.
#[derive(Clone)]
pub struct Generator {
    history: Arc<dyn HistoryStore>,
}

impl Generator {
    pub fn new(history: Arc<dyn HistoryStore>) -> Self {
        Self { history }
    }

    /// Generate an artifact from raw input.
    ///
    /// When `owner` is known the canonical record is handed to the history
    /// store on a background task. The artifact is returned without waiting
    /// for it, and its outcome never changes the artifact.
    pub async fn generate(
        &self,
        kind: ArtifactKind,
        raw: &RawEnvironment,
        owner: Option<UserId>,
    ) -> Result<Artifact, SynthesisError> {
        let spec = normalize(raw);
        let artifact = synthesize(kind, &spec)?;

        tracing::debug!(
            kind = %kind,
            bytes = artifact.content.len(),
            owned = owner.is_some(),
            "Artifact synthesized",
        );

        if let Some(owner) = owner {
            self.record_in_background(kind, spec, owner);
        }

        Ok(artifact)
    }

    /// Generate a build file and a manifest that builds from it.
    ///
    /// An owned request is recorded once per kind; the manifest record is
    /// stored in build mode so regenerating it reproduces the bundle's
    /// manifest.
    pub async fn generate_bundle(
        &self,
        raw: &RawEnvironment,
        owner: Option<UserId>,
    ) -> Result<ArtifactBundle, SynthesisError> {
        let spec = normalize(raw);
        let bundle = synthesize_bundle(&spec)?;

        if let Some(owner) = owner {
            let built = EnvironmentSpec {
                use_build: true,
                ..spec.clone()
            };
            self.record_in_background(ArtifactKind::Dockerfile, spec, owner);
            self.record_in_background(ArtifactKind::Compose, built, owner);
        }

        Ok(bundle)
    }

    /// Rebuild the artifact for a stored history record owned by `owner`.
    pub async fn regenerate(
        &self,
        kind: ArtifactKind,
        id: DbId,
        owner: UserId,
    ) -> Result<Artifact, CoreError> {
        let entry = self
            .history
            .get(kind, id, owner)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "history record",
                id,
            })?;
        Ok(synthesize(kind, &entry.spec)?)
    }

    /// Spawn the history write. Requires a running tokio runtime.
    fn record_in_background(&self, kind: ArtifactKind, spec: EnvironmentSpec, owner: UserId) {
        let history = Arc::clone(&self.history);
        tokio::spawn(async move {
            if history.record(kind, &spec, owner).await.is_err() {
                tracing::debug!(kind = %kind, owner, "History not recorded");
            }
        });
    }
}
