//! Build-file (Dockerfile) synthesis.
//!
//! The artifact is assembled as an ordered list of [`BuildBlock`]s, one per
//! [`BuildStep`]. Steps are emitted in declaration order of [`BuildStep`];
//! later steps rely on files and tooling established by earlier ones, so
//! the order is part of the contract. A step whose predicate is false is
//! omitted entirely rather than rendered empty.

use std::fmt;

use crate::error::SynthesisError;
use crate::spec::EnvironmentSpec;
use crate::tokens::{command_tokens, env_pairs, list_items};

/// Generic python image; already ships an interpreter and `pip`.
pub const PYTHON_IMAGE: &str = "python:latest";

/// Generic CUDA development image; ships the CUDA toolchain.
pub const CUDA_DEVEL_IMAGE: &str = "nvidia/cuda:12.2.0-devel-ubuntu22.04";

/// Images that need no interpreter/package-manager bootstrap layer.
pub const WELL_KNOWN_IMAGES: &[&str] = &[PYTHON_IMAGE, CUDA_DEVEL_IMAGE];

const BOOTSTRAP_COMMAND: &str = "apt-get update && apt-get install -y --no-install-recommends \
                                 python3 python3-pip python-is-python3 \
                                 && rm -rf /var/lib/apt/lists/*";

const CUDA_COMMAND: &str = "apt-get update && apt-get install -y --no-install-recommends \
                            cuda-toolkit && rm -rf /var/lib/apt/lists/*";

pub(crate) const REQUIREMENTS_FILE: &str = "requirements.txt";

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

/// The steps of a build file, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BuildStep {
    BaseImage,
    Bootstrap,
    WorkDir,
    Dependencies,
    Requirements,
    Framework,
    Source,
    Cuda,
    Environment,
    Ports,
    Command,
}

impl BuildStep {
    /// Comment line rendered above the step's instructions.
    pub fn comment(self) -> &'static str {
        match self {
            Self::BaseImage => "Base image",
            Self::Bootstrap => "Install Python toolchain",
            Self::WorkDir => "Working directory",
            Self::Dependencies => "Install additional dependencies",
            Self::Requirements => "Install requirements",
            Self::Framework => "Install ML framework",
            Self::Source => "Copy application source",
            Self::Cuda => "Install CUDA toolkit",
            Self::Environment => "Environment variables",
            Self::Ports => "Exposed ports",
            Self::Command => "Startup command",
        }
    }
}

/// A single build-file instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    From(String),
    Run(String),
    Workdir(String),
    Copy { source: String, destination: String },
    Env { key: String, value: String },
    Expose(String),
    Cmd(Vec<String>),
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::From(image) => write!(f, "FROM {image}"),
            Self::Run(command) => write!(f, "RUN {command}"),
            Self::Workdir(dir) => write!(f, "WORKDIR {dir}"),
            Self::Copy {
                source,
                destination,
            } => write!(f, "COPY {source} {destination}"),
            Self::Env { key, value } => write!(f, "ENV {key}={}", env_value(value)),
            Self::Expose(port) => write!(f, "EXPOSE {port}"),
            Self::Cmd(tokens) => {
                let quoted: Vec<String> = tokens
                    .iter()
                    .map(|t| serde_json::Value::String(t.clone()).to_string())
                    .collect();
                write!(f, "CMD [{}]", quoted.join(", "))
            }
        }
    }
}

/// Quote an `ENV` value when it would otherwise be split or misparsed.
fn env_value(value: &str) -> String {
    let needs_quotes =
        value.is_empty() || value.chars().any(|c| c.is_whitespace() || c == '"' || c == '\\');
    if needs_quotes {
        format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        value.to_string()
    }
}

/// One commented group of instructions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildBlock {
    pub step: BuildStep,
    pub instructions: Vec<Instruction>,
}

impl fmt::Display for BuildBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.step.comment())?;
        for instruction in &self.instructions {
            writeln!(f, "{instruction}")?;
        }
        Ok(())
    }
}

/// A complete build file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildFile {
    pub blocks: Vec<BuildBlock>,
}

impl BuildFile {
    /// Steps present in this build file, in order.
    pub fn steps(&self) -> Vec<BuildStep> {
        self.blocks.iter().map(|b| b.step).collect()
    }

    pub fn block(&self, step: BuildStep) -> Option<&BuildBlock> {
        self.blocks.iter().find(|b| b.step == step)
    }
}

/// Blocks separated by one blank line; the text ends with a single newline.
impl fmt::Display for BuildFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, block) in self.blocks.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{block}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Synthesis
// ---------------------------------------------------------------------------

/// Whether `image` already carries an interpreter and package manager.
pub fn is_well_known_image(image: &str) -> bool {
    WELL_KNOWN_IMAGES.contains(&image)
}

/// Whether a CUDA toolkit layer has to be installed on top of the base image.
pub fn needs_cuda_layer(spec: &EnvironmentSpec, base_image: &str) -> bool {
    spec.gpu_support && base_image != CUDA_DEVEL_IMAGE
}

/// Plan the build file for `spec`.
///
/// Fails with [`SynthesisError::MissingRequiredField`] when `base_image` is
/// absent; no partial plan is returned.
pub fn plan_build_file(spec: &EnvironmentSpec) -> Result<BuildFile, SynthesisError> {
    let base_image = spec.require_base_image()?;
    let mut blocks = Vec::new();
    let mut push = |step: BuildStep, instructions: Vec<Instruction>| {
        blocks.push(BuildBlock { step, instructions });
    };

    push(
        BuildStep::BaseImage,
        vec![Instruction::From(base_image.to_string())],
    );

    if !is_well_known_image(base_image) {
        push(
            BuildStep::Bootstrap,
            vec![Instruction::Run(BOOTSTRAP_COMMAND.to_string())],
        );
    }

    if let Some(dir) = &spec.work_dir {
        push(BuildStep::WorkDir, vec![Instruction::Workdir(dir.clone())]);
    }

    if let Some(dependencies) = &spec.dependencies {
        let packages = list_items(dependencies);
        if !packages.is_empty() {
            push(
                BuildStep::Dependencies,
                vec![Instruction::Run(format!(
                    "pip install --no-cache-dir {}",
                    packages.join(" ")
                ))],
            );
        }
    }

    if spec.use_requirements {
        let path = requirements_path(spec.work_dir.as_deref());
        push(
            BuildStep::Requirements,
            vec![
                Instruction::Copy {
                    source: REQUIREMENTS_FILE.to_string(),
                    destination: path.clone(),
                },
                Instruction::Run(format!("pip install --no-cache-dir -r {path}")),
            ],
        );
    }

    if let Some(framework) = &spec.framework {
        push(
            BuildStep::Framework,
            vec![Instruction::Run(format!(
                "pip install --no-cache-dir {framework}"
            ))],
        );
    }

    push(
        BuildStep::Source,
        vec![Instruction::Copy {
            source: ".".to_string(),
            destination: ".".to_string(),
        }],
    );

    if needs_cuda_layer(spec, base_image) {
        push(
            BuildStep::Cuda,
            vec![Instruction::Run(CUDA_COMMAND.to_string())],
        );
    }

    if let Some(raw) = &spec.env_vars {
        let vars: Vec<Instruction> = env_pairs(raw)
            .into_iter()
            .map(|(key, value)| Instruction::Env {
                key: key.to_string(),
                value: value.to_string(),
            })
            .collect();
        if !vars.is_empty() {
            push(BuildStep::Environment, vars);
        }
    }

    if let Some(raw) = &spec.ports {
        let ports: Vec<Instruction> = list_items(raw)
            .into_iter()
            .map(|port| Instruction::Expose(port.to_string()))
            .collect();
        if !ports.is_empty() {
            push(BuildStep::Ports, ports);
        }
    }

    if let Some(script) = &spec.startup_script {
        let tokens: Vec<String> = command_tokens(script)
            .into_iter()
            .map(str::to_string)
            .collect();
        if !tokens.is_empty() {
            push(BuildStep::Command, vec![Instruction::Cmd(tokens)]);
        }
    }

    Ok(BuildFile { blocks })
}

/// Render the build-file text for `spec`.
pub fn synthesize_build_file(spec: &EnvironmentSpec) -> Result<String, SynthesisError> {
    Ok(plan_build_file(spec)?.to_string())
}

/// Where the requirements manifest lands inside the image.
fn requirements_path(work_dir: Option<&str>) -> String {
    match work_dir {
        Some(dir) => format!("{}/{REQUIREMENTS_FILE}", dir.trim_end_matches('/')),
        None => format!("/{REQUIREMENTS_FILE}"),
    }
}
