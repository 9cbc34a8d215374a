//! The canonical environment record shared by both synthesizers.

use serde::{Deserialize, Serialize};

/// File name the build-file artifact is delivered under, and the build file
/// the manifest's `build.dockerfile` refers to.
pub const BUILD_FILE_NAME: &str = "Dockerfile";

/// File name the manifest artifact is delivered under.
pub const MANIFEST_FILE_NAME: &str = "docker-compose.yml";

/// Normalized description of a desired container environment.
///
/// Produced by [`crate::normalize::normalize`]. Optional string fields are
/// `None` rather than empty; the synthesizers branch on presence only.
/// Raw comma/space-separated fields are kept verbatim and tokenized by each
/// synthesizer call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentSpec {
    pub base_image: Option<String>,
    pub work_dir: Option<String>,
    pub framework: Option<String>,
    pub dependencies: Option<String>,
    #[serde(default)]
    pub use_requirements: bool,
    #[serde(default)]
    pub gpu_support: bool,
    pub env_vars: Option<String>,
    pub ports: Option<String>,
    pub startup_script: Option<String>,
    pub service_name: Option<String>,
    pub build_context: Option<String>,
    #[serde(default)]
    pub use_build: bool,
}

impl EnvironmentSpec {
    /// The base image, or [`SynthesisError::MissingRequiredField`].
    ///
    /// [`SynthesisError::MissingRequiredField`]: crate::error::SynthesisError::MissingRequiredField
    pub fn require_base_image(&self) -> Result<&str, crate::error::SynthesisError> {
        self.base_image
            .as_deref()
            .ok_or(crate::error::SynthesisError::MissingRequiredField("base_image"))
    }

    /// The service name, or [`SynthesisError::MissingRequiredField`].
    ///
    /// [`SynthesisError::MissingRequiredField`]: crate::error::SynthesisError::MissingRequiredField
    pub fn require_service_name(&self) -> Result<&str, crate::error::SynthesisError> {
        self.service_name
            .as_deref()
            .ok_or(crate::error::SynthesisError::MissingRequiredField("service_name"))
    }
}

/// The two artifact kinds the engine produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Dockerfile,
    #[serde(alias = "dockercompose")]
    Compose,
}

impl ArtifactKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dockerfile => "dockerfile",
            Self::Compose => "compose",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Self::Dockerfile => BUILD_FILE_NAME,
            Self::Compose => MANIFEST_FILE_NAME,
        }
    }

    /// Parse the identifier stored in the history table.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dockerfile" => Some(Self::Dockerfile),
            "compose" | "dockercompose" => Some(Self::Compose),
            _ => None,
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::error::SynthesisError;

    #[test]
    fn kind_identifiers_round_trip() {
        for kind in [ArtifactKind::Dockerfile, ArtifactKind::Compose] {
            assert_eq!(ArtifactKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(ArtifactKind::parse("dockercompose"), Some(ArtifactKind::Compose));
        assert_eq!(ArtifactKind::parse("helm"), None);
    }

    #[test]
    fn kind_deserializes_legacy_alias() {
        let kind: ArtifactKind = serde_json::from_str("\"dockercompose\"").unwrap();
        assert_eq!(kind, ArtifactKind::Compose);
    }

    #[test]
    fn missing_fields_are_named() {
        let spec = EnvironmentSpec::default();
        assert_matches!(
            spec.require_base_image(),
            Err(SynthesisError::MissingRequiredField("base_image"))
        );
        assert_matches!(
            spec.require_service_name(),
            Err(SynthesisError::MissingRequiredField("service_name"))
        );
    }

    #[test]
    fn stored_record_without_flags_deserializes() {
        let spec: EnvironmentSpec =
            serde_json::from_str(r#"{"base_image": "python:latest"}"#).unwrap();
        assert_eq!(spec.base_image.as_deref(), Some("python:latest"));
        assert!(!spec.gpu_support);
        assert!(!spec.use_build);
    }
}
