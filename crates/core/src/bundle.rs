//! Build file and manifest for the same logical service.

use serde::Serialize;

use crate::buildfile::synthesize_build_file;
use crate::error::SynthesisError;
use crate::manifest::synthesize_manifest;
use crate::spec::EnvironmentSpec;

/// Both artifacts, generated from one canonical record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactBundle {
    pub dockerfile: String,
    pub compose: String,
}

/// Synthesize a build file plus a manifest that builds from it.
///
/// The manifest is forced into build mode so the service is built from the
/// generated build file instead of pulling `base_image` directly. Working
/// directory, image and toolchain then live only in the build file, while
/// ports, environment, command and GPU runtime appear in both.
pub fn synthesize_bundle(spec: &EnvironmentSpec) -> Result<ArtifactBundle, SynthesisError> {
    let dockerfile = synthesize_build_file(spec)?;

    let built = EnvironmentSpec {
        use_build: true,
        ..spec.clone()
    };
    let compose = synthesize_manifest(&built)?;

    Ok(ArtifactBundle {
        dockerfile,
        compose,
    })
}
