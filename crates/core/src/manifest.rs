//! Orchestration manifest (docker-compose) synthesis.
//!
//! The document is modelled with plain structs so that key order is fixed
//! by field order, and unset keys are skipped instead of serialized as
//! `null`. Orchestration tools treat "absent" and "empty" differently.

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::SynthesisError;
use crate::buildfile::REQUIREMENTS_FILE;
use crate::spec::{EnvironmentSpec, BUILD_FILE_NAME};
use crate::tokens::{command_tokens, env_pairs, list_items};

/// Schema version tag written at the top of every manifest.
pub const COMPOSE_VERSION: &str = "3.8";

/// Runtime identifier for GPU-enabled services.
pub const GPU_RUNTIME: &str = "nvidia";

/// Build context used when none is configured.
pub const DEFAULT_BUILD_CONTEXT: &str = ".";

/// Container directory the requirements file is mounted into when no
/// working directory is configured.
pub const DEFAULT_MOUNT_DIR: &str = "/app";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposeDocument {
    pub version: &'static str,
    pub services: IndexMap<String, ServiceDefinition>,
}

/// A single service entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ServiceDefinition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ports: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<IndexMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<BuildSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volumes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildSection {
    pub context: String,
    pub dockerfile: &'static str,
}

/// Build the manifest document for `spec`.
///
/// Requires `service_name`, then `base_image`. A built service
/// (`use_build`) still needs a base image but never declares it.
pub fn plan_manifest(spec: &EnvironmentSpec) -> Result<ComposeDocument, SynthesisError> {
    let service_name = spec.require_service_name()?;
    spec.require_base_image()?;

    let pulled = !spec.use_build;
    let service = ServiceDefinition {
        image: spec.base_image.clone().filter(|_| pulled),
        working_dir: spec.work_dir.clone().filter(|_| pulled),
        ports: spec
            .ports
            .as_deref()
            .map(|raw| owned(list_items(raw)))
            .filter(|ports| !ports.is_empty()),
        environment: spec
            .env_vars
            .as_deref()
            .map(|raw| {
                env_pairs(raw)
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect::<IndexMap<_, _>>()
            })
            .filter(|env| !env.is_empty()),
        command: spec
            .startup_script
            .as_deref()
            .map(|raw| owned(command_tokens(raw)))
            .filter(|tokens| !tokens.is_empty()),
        build: spec.use_build.then(|| BuildSection {
            context: spec
                .build_context
                .clone()
                .unwrap_or_else(|| DEFAULT_BUILD_CONTEXT.to_string()),
            dockerfile: BUILD_FILE_NAME,
        }),
        volumes: spec
            .use_requirements
            .then(|| vec![requirements_mount(spec.work_dir.as_deref())]),
        runtime: spec.gpu_support.then_some(GPU_RUNTIME),
    };

    let mut services = IndexMap::new();
    services.insert(service_name.to_string(), service);

    Ok(ComposeDocument {
        version: COMPOSE_VERSION,
        services,
    })
}

/// Serialize a manifest as block-style YAML.
pub fn render_manifest(document: &ComposeDocument) -> Result<String, SynthesisError> {
    serde_yaml::to_string(document).map_err(|e| SynthesisError::Serialization(e.to_string()))
}

/// Render the manifest text for `spec`.
pub fn synthesize_manifest(spec: &EnvironmentSpec) -> Result<String, SynthesisError> {
    render_manifest(&plan_manifest(spec)?)
}

/// Bind mount of the local requirements file into the service.
fn requirements_mount(work_dir: Option<&str>) -> String {
    let dir = work_dir
        .map(|dir| dir.trim_end_matches('/'))
        .unwrap_or(DEFAULT_MOUNT_DIR);
    format!("./{REQUIREMENTS_FILE}:{dir}/{REQUIREMENTS_FILE}")
}

fn owned(tokens: Vec<&str>) -> Vec<String> {
    tokens.into_iter().map(str::to_string).collect()
}
