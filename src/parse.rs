//! Loading registries, configs and execution requests from text.
//!
//! YAML goes through serde-saphyr into a `serde_json::Value` first and is
//! then mapped onto the typed structs, so YAML and JSON inputs share one set
//! of serde rules.

use crate::config::GeneratorConfig;
use crate::error::MessageError;
use crate::registry::{TemplateRegistry, TemplateSpec};
use crate::types::ExecutionRequest;
use crate::validate::validate_registry;
use serde::Deserialize;
use serde::de::DeserializeOwned;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RegistryFile {
    /// Start from the built-in templates instead of an empty registry.
    #[serde(default)]
    include_builtin: bool,
    #[serde(default)]
    templates: Vec<TemplateSpec>,
}

/// Parse a YAML template registry.
///
/// The registry is validated; any validation error rejects the whole file.
/// Warnings are logged and otherwise ignored.
pub fn parse_registry(input: &str) -> Result<TemplateRegistry, MessageError> {
    let file: RegistryFile = from_yaml(input)?;

    let mut registry = if file.include_builtin {
        TemplateRegistry::builtin()
    } else {
        TemplateRegistry::empty()
    };
    for template in file.templates {
        if let Some(replaced) = registry.register(template) {
            tracing::debug!(
                operation = %replaced.operation,
                version = %replaced.version,
                "template replaced by registry file"
            );
        }
    }

    let result = validate_registry(&registry);
    for warning in &result.warnings {
        tracing::debug!("registry warning: {}", warning);
    }
    if let Some(first) = result.errors.first() {
        return Err(MessageError::Config(format!(
            "{} registry error(s), first: {}",
            result.errors.len(),
            first
        )));
    }

    Ok(registry)
}

/// Parse a YAML generator config. Missing keys take their defaults.
pub fn parse_config(input: &str) -> Result<GeneratorConfig, MessageError> {
    from_yaml(input)
}

/// Parse an execution request from its JSON wire form.
///
/// Property values must be scalars or null; anything else is rejected with
/// [`MessageError::UnsupportedValueType`].
pub fn parse_execution_request(input: &str) -> Result<ExecutionRequest, MessageError> {
    let value: serde_json::Value =
        serde_json::from_str(input).map_err(|e| MessageError::Parse(e.to_string()))?;

    // Surface non-scalar property values with their own error kind rather
    // than as a generic deserialization message.
    for field in ["properties", "systemProperties"] {
        if let Some(props) = value.get(field) {
            crate::types::PropertySet::from_json(props.clone())?;
        }
    }

    serde_json::from_value(value).map_err(|e| MessageError::Parse(e.to_string()))
}

fn from_yaml<T: DeserializeOwned>(input: &str) -> Result<T, MessageError> {
    if input.trim().is_empty() {
        return Err(MessageError::Parse("empty input".to_string()));
    }
    check_multi_document(input)?;

    let value: serde_json::Value =
        serde_saphyr::from_str(input).map_err(|e| MessageError::Parse(e.to_string()))?;
    if !value.is_object() {
        return Err(MessageError::Parse(
            "document root must be a YAML mapping".to_string(),
        ));
    }

    serde_json::from_value(value).map_err(|e| MessageError::Parse(e.to_string()))
}

/// Only matches `---` at column 0 to avoid false positives inside block scalars.
fn check_multi_document(input: &str) -> Result<(), MessageError> {
    let markers = input
        .lines()
        .filter(|line| line.starts_with("---") && line[3..].trim().is_empty())
        .count();
    if markers > 1 {
        return Err(MessageError::Parse(
            "multi-document YAML is not supported".to_string(),
        ));
    }
    Ok(())
}
