//! Raw request fields to [`EnvironmentSpec`].
//!
//! The normalizer never fails. Missing required fields simply come out as
//! `None` and are rejected later by the synthesizer that needs them.

use serde::Deserialize;
use serde_json::Value;

use crate::spec::EnvironmentSpec;

/// Raw, untrusted field mapping as received from a caller.
///
/// Field names follow the camelCase wire format; snake_case aliases are
/// accepted so that a record returned by the history listing can be
/// resubmitted unchanged. Values may be any JSON type.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEnvironment {
    #[serde(default, alias = "base_image")]
    pub base_image: Option<Value>,
    #[serde(default, alias = "work_dir", alias = "workingDir")]
    pub work_dir: Option<Value>,
    #[serde(default)]
    pub framework: Option<Value>,
    #[serde(default)]
    pub dependencies: Option<Value>,
    #[serde(default, alias = "use_requirements")]
    pub use_requirements: Option<Value>,
    #[serde(default, alias = "gpu_support")]
    pub gpu_support: Option<Value>,
    #[serde(default, alias = "env_vars")]
    pub env_vars: Option<Value>,
    #[serde(default)]
    pub ports: Option<Value>,
    #[serde(default, alias = "startup_script")]
    pub startup_script: Option<Value>,
    #[serde(default, alias = "service_name", alias = "service")]
    pub service_name: Option<Value>,
    #[serde(default, alias = "build_context")]
    pub build_context: Option<Value>,
    #[serde(default, alias = "use_build")]
    pub use_build: Option<Value>,
}

impl From<&EnvironmentSpec> for RawEnvironment {
    fn from(spec: &EnvironmentSpec) -> Self {
        let text = |v: &Option<String>| v.clone().map(Value::String);
        Self {
            base_image: text(&spec.base_image),
            work_dir: text(&spec.work_dir),
            framework: text(&spec.framework),
            dependencies: text(&spec.dependencies),
            use_requirements: Some(Value::Bool(spec.use_requirements)),
            gpu_support: Some(Value::Bool(spec.gpu_support)),
            env_vars: text(&spec.env_vars),
            ports: text(&spec.ports),
            startup_script: text(&spec.startup_script),
            service_name: text(&spec.service_name),
            build_context: text(&spec.build_context),
            use_build: Some(Value::Bool(spec.use_build)),
        }
    }
}

/// Produce the canonical record from raw input.
pub fn normalize(raw: &RawEnvironment) -> EnvironmentSpec {
    EnvironmentSpec {
        base_image: text_field(raw.base_image.as_ref()),
        work_dir: text_field(raw.work_dir.as_ref()),
        framework: text_field(raw.framework.as_ref()),
        dependencies: text_field(raw.dependencies.as_ref()),
        use_requirements: flag_field(raw.use_requirements.as_ref()),
        gpu_support: flag_field(raw.gpu_support.as_ref()),
        env_vars: text_field(raw.env_vars.as_ref()),
        ports: text_field(raw.ports.as_ref()),
        startup_script: text_field(raw.startup_script.as_ref()),
        service_name: text_field(raw.service_name.as_ref()),
        build_context: text_field(raw.build_context.as_ref()),
        use_build: flag_field(raw.use_build.as_ref()),
    }
}

/// Trimmed string, or `None` when absent, blank, or not string-like.
fn text_field(value: Option<&Value>) -> Option<String> {
    let text = match value? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// Absent or unrecognized values are `false`.
fn flag_field(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}
