//! Per-operation, per-version payload templates.
//!
//! A template is data, not code: which top-level fields a request carries,
//! where each comes from, and which property-key prefixes are materialized
//! into it. New interface versions are supported by registering templates.

use crate::enums::{ContainerKind, LifecycleOperation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const SOL003_V2_4_1: &str = "2.4.1";
pub const SOL003_V3_5_1: &str = "3.5.1";

// ─── Template model ─────────────────────────────────────────────────────────

/// Where a top-level field value is read from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSource {
    /// A property looked up verbatim in the property set.
    Property(String),
    /// The lifecycle name carried by the execution context.
    LifecycleName,
    /// The request description carried by the execution context.
    Description,
}

/// One top-level member of a payload. Rules apply in declaration order, which
/// is also the key order of the generated message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldRule {
    /// A skeleton container that is always present, possibly empty.
    Container { name: String, kind: ContainerKind },
    /// Copied only when the source is present and non-null.
    Optional {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        from: Option<FieldSource>,
    },
    /// Must be present and non-null.
    Required {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        from: Option<FieldSource>,
    },
}

impl FieldRule {
    pub fn name(&self) -> &str {
        match self {
            FieldRule::Container { name, .. }
            | FieldRule::Optional { name, .. }
            | FieldRule::Required { name, .. } => name,
        }
    }

    /// The effective source of a copied field. Defaults to the property with
    /// the same name as the field. `None` for containers.
    pub fn source(&self) -> Option<FieldSource> {
        match self {
            FieldRule::Container { .. } => None,
            FieldRule::Optional { name, from } | FieldRule::Required { name, from } => Some(
                from.clone()
                    .unwrap_or_else(|| FieldSource::Property(name.clone())),
            ),
        }
    }
}

/// Everything needed to build one request message type for one interface version.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSpec {
    pub operation: LifecycleOperation,
    pub version: String,
    pub fields: Vec<FieldRule>,
    /// Property-key prefixes (including the trailing `.`) that are
    /// materialized into the message.
    #[serde(default)]
    pub prefixes: Vec<String>,
}

// ─── Registry ───────────────────────────────────────────────────────────────

/// Immutable-after-construction lookup of templates by operation and version.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TemplateRegistry {
    templates: BTreeMap<(LifecycleOperation, String), TemplateSpec>,
}

impl TemplateRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The SOL003 2.4.1 and 3.5.1 templates shipped with the crate.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for entry in BUILTIN_TEMPLATES {
            registry.register(entry.to_spec());
        }
        registry
    }

    /// Adds a template, replacing and returning any existing template for the
    /// same operation and version.
    pub fn register(&mut self, template: TemplateSpec) -> Option<TemplateSpec> {
        self.templates
            .insert((template.operation, template.version.clone()), template)
    }

    pub fn get(&self, operation: LifecycleOperation, version: &str) -> Option<&TemplateSpec> {
        self.templates.get(&(operation, version.to_string()))
    }

    /// Versions registered for `operation`, in ascending string order.
    pub fn versions(&self, operation: LifecycleOperation) -> Vec<&str> {
        self.templates
            .keys()
            .filter(|(op, _)| *op == operation)
            .map(|(_, version)| version.as_str())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TemplateSpec> {
        self.templates.values()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

// ─── Built-in tables ────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug)]
enum BuiltinField {
    Container(&'static str, ContainerKind),
    Optional(&'static str),
    OptionalDescription(&'static str),
    Required(&'static str),
    RequiredFrom(&'static str, &'static str),
}

#[derive(Clone, Copy, Debug)]
struct BuiltinTemplate {
    operation: LifecycleOperation,
    version: &'static str,
    fields: &'static [BuiltinField],
    prefixes: &'static [&'static str],
}

impl BuiltinTemplate {
    fn to_spec(&self) -> TemplateSpec {
        let fields = self
            .fields
            .iter()
            .map(|field| match *field {
                BuiltinField::Container(name, kind) => FieldRule::Container {
                    name: name.to_string(),
                    kind,
                },
                BuiltinField::Optional(name) => FieldRule::Optional {
                    name: name.to_string(),
                    from: None,
                },
                BuiltinField::OptionalDescription(name) => FieldRule::Optional {
                    name: name.to_string(),
                    from: Some(FieldSource::Description),
                },
                BuiltinField::Required(name) => FieldRule::Required {
                    name: name.to_string(),
                    from: None,
                },
                BuiltinField::RequiredFrom(name, key) => FieldRule::Required {
                    name: name.to_string(),
                    from: Some(FieldSource::Property(key.to_string())),
                },
            })
            .collect();
        TemplateSpec {
            operation: self.operation,
            version: self.version.to_string(),
            fields,
            prefixes: self.prefixes.iter().map(|p| p.to_string()).collect(),
        }
    }
}

use BuiltinField::*;
use ContainerKind::{Mapping, Sequence};

const ADDITIONAL_PARAMS_ONLY: &[&str] = &["additionalParams."];

const CONNECTIVITY_PREFIXES: &[&str] = &[
    "extVirtualLinks.",
    "extManagedVirtualLinks.",
    "vimConnectionInfo.",
    "additionalParams.",
    "extensions.",
    "vnfConfigurableProperties.",
];

static BUILTIN_TEMPLATES: &[BuiltinTemplate] = &[
    // 2.4.1
    BuiltinTemplate {
        operation: LifecycleOperation::Create,
        version: SOL003_V2_4_1,
        fields: &[
            Required("vnfdId"),
            Optional("vnfInstanceName"),
            OptionalDescription("vnfInstanceDescription"),
            // not in the 2.4.1 schema, kept for parity with the other requests
            Container("additionalParams", Mapping),
        ],
        prefixes: ADDITIONAL_PARAMS_ONLY,
    },
    BuiltinTemplate {
        operation: LifecycleOperation::Instantiate,
        version: SOL003_V2_4_1,
        fields: &[
            Required("flavourId"),
            Optional("instantiationLevelId"),
            Container("extVirtualLinks", Sequence),
            Container("extManagedVirtualLinks", Sequence),
            Container("vimConnectionInfo", Sequence),
            Optional("localizationLanguage"),
            Container("additionalParams", Mapping),
        ],
        prefixes: &[
            "extVirtualLinks.",
            "extManagedVirtualLinks.",
            "vimConnectionInfo.",
            "additionalParams.",
        ],
    },
    BuiltinTemplate {
        operation: LifecycleOperation::Heal,
        version: SOL003_V2_4_1,
        fields: &[Container("additionalParams", Mapping), Optional("cause")],
        prefixes: ADDITIONAL_PARAMS_ONLY,
    },
    BuiltinTemplate {
        operation: LifecycleOperation::Scale,
        version: SOL003_V2_4_1,
        fields: &[
            Container("additionalParams", Mapping),
            RequiredFrom("type", "scaleType"),
            RequiredFrom("aspectId", "scaleAspectId"),
            Optional("numberOfSteps"),
        ],
        prefixes: ADDITIONAL_PARAMS_ONLY,
    },
    // 3.5.1
    BuiltinTemplate {
        operation: LifecycleOperation::Create,
        version: SOL003_V3_5_1,
        fields: &[
            Container("additionalParams", Mapping),
            Container("metadata", Mapping),
            Required("vnfdId"),
            Optional("vnfInstanceName"),
            OptionalDescription("vnfInstanceDescription"),
        ],
        prefixes: &["additionalParams.", "metadata."],
    },
    BuiltinTemplate {
        operation: LifecycleOperation::Instantiate,
        version: SOL003_V3_5_1,
        fields: &[
            Required("flavourId"),
            Optional("instantiationLevelId"),
            Container("extVirtualLinks", Sequence),
            Container("extManagedVirtualLinks", Sequence),
            Container("vimConnectionInfo", Mapping),
            Optional("localizationLanguage"),
            Container("additionalParams", Mapping),
            Container("extensions", Mapping),
            Container("vnfConfigurableProperties", Mapping),
        ],
        prefixes: CONNECTIVITY_PREFIXES,
    },
    BuiltinTemplate {
        operation: LifecycleOperation::Heal,
        version: SOL003_V3_5_1,
        fields: &[Container("additionalParams", Mapping), Optional("cause")],
        prefixes: ADDITIONAL_PARAMS_ONLY,
    },
    BuiltinTemplate {
        operation: LifecycleOperation::Scale,
        version: SOL003_V3_5_1,
        fields: &[
            Container("additionalParams", Mapping),
            RequiredFrom("type", "scaleType"),
            RequiredFrom("aspectId", "scaleAspectId"),
            Optional("numberOfSteps"),
        ],
        prefixes: ADDITIONAL_PARAMS_ONLY,
    },
    BuiltinTemplate {
        operation: LifecycleOperation::ChangeCurrentVnfPkg,
        version: SOL003_V3_5_1,
        fields: &[
            Container("extVirtualLinks", Sequence),
            Container("vimConnectionInfo", Mapping),
            Container("extManagedVirtualLinks", Sequence),
            Container("additionalParams", Mapping),
            Container("vnfConfigurableProperties", Mapping),
            Container("extensions", Mapping),
            Required("vnfdId"),
        ],
        prefixes: CONNECTIVITY_PREFIXES,
    },
    BuiltinTemplate {
        operation: LifecycleOperation::ChangeExtVnfConnectivity,
        version: SOL003_V3_5_1,
        fields: &[
            Container("extVirtualLinks", Sequence),
            Container("vimConnectionInfo", Mapping),
            Container("additionalParams", Mapping),
        ],
        prefixes: &["additionalParams.", "extVirtualLinks.", "vimConnectionInfo."],
    },
    BuiltinTemplate {
        operation: LifecycleOperation::ChangeVnfFlavour,
        version: SOL003_V3_5_1,
        fields: &[
            Container("extVirtualLinks", Sequence),
            Container("extManagedVirtualLinks", Sequence),
            Container("vimConnectionInfo", Mapping),
            Container("additionalParams", Mapping),
            Container("extensions", Mapping),
            Container("vnfConfigurableProperties", Mapping),
            RequiredFrom("newFlavourId", "flavourId"),
            Optional("instantiationLevelId"),
            Optional("localizationLanguage"),
        ],
        prefixes: CONNECTIVITY_PREFIXES,
    },
];
