//! The template driver: property set in, SOL003 request message out.

use crate::config::GeneratorConfig;
use crate::enums::{LifecycleOperation, NodeKind};
use crate::error::MessageError;
use crate::primitives::{copy_field_if_present, flatten_document, materialize};
use crate::registry::{FieldRule, FieldSource, TemplateRegistry, TemplateSpec};
use crate::serialize::{serialize, serialize_pretty};
use crate::types::{ExecutionContext, MessageDocument, PropertySet, PropertyValue};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static DEFAULT_SENSITIVE_KEYS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(crate::config::DEFAULT_SENSITIVE_KEYS).unwrap());

/// Builds request messages from execution contexts using a template registry.
///
/// Holds no per-request state; one generator can serve any number of
/// concurrent requests.
#[derive(Clone, Debug)]
pub struct MessageGenerator {
    registry: TemplateRegistry,
    config: GeneratorConfig,
    sensitive_keys: Regex,
}

impl Default for MessageGenerator {
    fn default() -> Self {
        MessageGenerator {
            registry: TemplateRegistry::builtin(),
            config: GeneratorConfig::default(),
            sensitive_keys: DEFAULT_SENSITIVE_KEYS_RE.clone(),
        }
    }
}

impl MessageGenerator {
    /// Creates a generator. Fails with [`MessageError::Config`] if the
    /// sensitive-key pattern is not a valid regex.
    pub fn new(registry: TemplateRegistry, config: GeneratorConfig) -> Result<Self, MessageError> {
        let sensitive_keys = Regex::new(&config.sensitive_keys).map_err(|e| {
            MessageError::Config(format!("invalid sensitive_keys pattern: {e}"))
        })?;
        Ok(MessageGenerator {
            registry,
            config,
            sensitive_keys,
        })
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// The interface version requested by `ctx`, or the configured default.
    pub fn resolve_version<'a>(
        &'a self,
        ctx: &'a impl ExecutionContext,
    ) -> Result<&'a str, MessageError> {
        match ctx.properties().get_non_null(&self.config.version_property) {
            None => Ok(&self.config.default_interface_version),
            Some(PropertyValue::String(version)) => Ok(version),
            Some(other) => Err(MessageError::UnsupportedValueType {
                key: self.config.version_property.clone(),
                found: NodeKind::of(&other.to_json()),
            }),
        }
    }

    /// Looks up the template for `operation` at the version `ctx` asks for.
    pub fn template_for(
        &self,
        operation: LifecycleOperation,
        ctx: &impl ExecutionContext,
    ) -> Result<&TemplateSpec, MessageError> {
        let version = self.resolve_version(ctx)?;
        self.registry
            .get(operation, version)
            .ok_or_else(|| MessageError::UnknownTemplate {
                message_type: operation.message_type().to_string(),
                version: version.to_string(),
            })
    }

    /// Builds the message document without serializing it.
    pub fn build_document(
        &self,
        operation: LifecycleOperation,
        ctx: &impl ExecutionContext,
    ) -> Result<MessageDocument, MessageError> {
        let template = self.template_for(operation, ctx)?;
        tracing::debug!(
            "Generating {} message for ETSI SOL003 v{}",
            operation.message_type(),
            template.version
        );
        let safe = Value::Object(ctx.properties().log_safe(&self.sensitive_keys));
        tracing::debug!(properties = %safe, "request properties");

        let properties = ctx.properties();
        let mut document = MessageDocument::new();

        for field in &template.fields {
            apply_field(field, ctx, &mut document)?;
        }

        for (key, value) in properties.with_prefixes(&template.prefixes) {
            materialize(&mut document, key, value)?;
        }

        Ok(document)
    }

    /// Builds and serializes the message for `operation`.
    pub fn generate(
        &self,
        operation: LifecycleOperation,
        ctx: &impl ExecutionContext,
    ) -> Result<String, MessageError> {
        let document = self.build_document(operation, ctx)?;
        let message = if self.config.pretty {
            serialize_pretty(&document)?
        } else {
            serialize(&document)?
        };
        tracing::debug!(bytes = message.len(), "Message generated successfully");
        Ok(message)
    }

    /// Like [`generate`](Self::generate), selecting the operation by its
    /// message type name (e.g. `"ScaleVnfRequest"`).
    pub fn generate_by_name(
        &self,
        message_type: &str,
        ctx: &impl ExecutionContext,
    ) -> Result<String, MessageError> {
        let Ok(operation) = message_type.parse::<LifecycleOperation>() else {
            let version = self.resolve_version(ctx)?;
            return Err(MessageError::UnknownTemplate {
                message_type: message_type.to_string(),
                version: version.to_string(),
            });
        };
        self.generate(operation, ctx)
    }

    /// Flattens a JSON message (typically a VNFM response) back into dotted
    /// properties.
    pub fn extract_properties(&self, message: &str) -> Result<PropertySet, MessageError> {
        let value: Value =
            serde_json::from_str(message).map_err(|e| MessageError::Parse(e.to_string()))?;
        let Value::Object(document) = value else {
            return Err(MessageError::Parse(
                "message root must be a JSON object".to_string(),
            ));
        };
        let properties = flatten_document(&document);
        let safe = Value::Object(properties.log_safe(&self.sensitive_keys));
        tracing::debug!(properties = %safe, "properties extracted from message");
        Ok(properties)
    }
}

fn apply_field(
    field: &FieldRule,
    ctx: &impl ExecutionContext,
    document: &mut MessageDocument,
) -> Result<(), MessageError> {
    match field {
        FieldRule::Container { name, kind } => {
            document.insert(name.clone(), kind.empty());
        }
        FieldRule::Optional { name, .. } => match field.source() {
            Some(FieldSource::Property(key)) => {
                copy_field_if_present(ctx.properties(), &key, document, name);
            }
            Some(source) => {
                if let Some(value) = read_source(&source, ctx) {
                    document.insert(name.clone(), value);
                } else {
                    tracing::trace!(field = %name, "optional field omitted");
                }
            }
            None => {}
        },
        FieldRule::Required { name, .. } => {
            let source = field
                .source()
                .unwrap_or_else(|| FieldSource::Property(name.clone()));
            let value = read_source(&source, ctx).ok_or_else(|| {
                MessageError::MissingRequiredField {
                    field: name.clone(),
                    source_key: source_label(&source).to_string(),
                }
            })?;
            document.insert(name.clone(), value);
        }
    }
    Ok(())
}

/// Reads a field source, treating null and absent alike.
fn read_source(source: &FieldSource, ctx: &impl ExecutionContext) -> Option<Value> {
    match source {
        FieldSource::Property(key) => ctx.properties().get_non_null(key).map(PropertyValue::to_json),
        FieldSource::LifecycleName => ctx.lifecycle_name().map(|s| Value::String(s.to_string())),
        FieldSource::Description => ctx.description().map(PropertyValue::to_json),
    }
}

fn source_label(source: &FieldSource) -> &str {
    match source {
        FieldSource::Property(key) => key,
        FieldSource::LifecycleName => "lifecycleName",
        FieldSource::Description => "description",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    fn create_request() -> crate::types::ExecutionRequest {
        let properties: PropertySet = [
            ("vnfdId", "abc"),
            ("vimConnectionInfo.0.accessInfo.password", "s3cr3t"),
            ("additionalParams.apiToken", "tok-123"),
        ]
        .into_iter()
        .collect();
        crate::types::ExecutionRequest::new("Create", properties)
    }

    #[traced_test]
    #[test]
    fn logs_operation_and_version() {
        MessageGenerator::default()
            .generate(LifecycleOperation::Create, &create_request())
            .unwrap();
        assert!(logs_contain(
            "Generating CreateVnfRequest message for ETSI SOL003 v2.4.1"
        ));
        assert!(logs_contain("Message generated successfully"));
    }

    #[traced_test]
    #[test]
    fn sensitive_values_are_masked_in_logs() {
        let message = MessageGenerator::default()
            .generate(LifecycleOperation::Create, &create_request())
            .unwrap();
        // the message itself keeps the real value
        assert!(message.contains("tok-123"));
        assert!(logs_contain(crate::types::OBFUSCATED_VALUE));
        assert!(!logs_contain("s3cr3t"));
        assert!(!logs_contain("tok-123"));
    }

    #[traced_test]
    #[test]
    fn extracted_properties_are_logged_masked() {
        let properties = MessageGenerator::default()
            .extract_properties(r#"{"vnfId":"v1","accessInfo":{"password":"hunter2"}}"#)
            .unwrap();
        assert_eq!(properties.len(), 2);
        assert!(logs_contain("properties extracted from message"));
        assert!(logs_contain("vnfId"));
        assert!(!logs_contain("hunter2"));
    }

    #[traced_test]
    #[test]
    fn omitted_optional_fields_are_traced() {
        MessageGenerator::default()
            .generate(LifecycleOperation::Create, &create_request())
            .unwrap();
        logs_assert(|lines: &[&str]| {
            match lines
                .iter()
                .filter(|line| line.contains("optional field omitted"))
                .count()
            {
                2 => Ok(()),
                n => Err(format!("expected 2 omitted fields, got {n}")),
            }
        });
    }

    #[test]
    fn custom_sensitive_pattern() {
        let config = GeneratorConfig {
            sensitive_keys: "(?i)vnfdid".to_string(),
            ..GeneratorConfig::default()
        };
        let generator = MessageGenerator::new(TemplateRegistry::builtin(), config).unwrap();
        let safe = create_request().properties.log_safe(&generator.sensitive_keys);
        assert_eq!(safe["vnfdId"], crate::types::OBFUSCATED_VALUE);
        assert_eq!(safe["additionalParams.apiToken"], "tok-123");
    }
}
