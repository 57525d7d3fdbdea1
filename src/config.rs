//! Generator settings.

use crate::registry::SOL003_V2_4_1;
use serde::{Deserialize, Serialize};

/// Property carrying the requested SOL003 interface version.
pub const DEFAULT_VERSION_PROPERTY: &str = "interfaceVersion";

/// Keys whose values are masked when properties are logged.
pub const DEFAULT_SENSITIVE_KEYS: &str = r"(?i)(password|secret|token|privatekey)";

/// Settings for a [`crate::generate::MessageGenerator`].
///
/// Every field has a default, so a partial YAML document is a valid config.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Interface version used when the request does not name one.
    pub default_interface_version: String,
    /// Property key the request's interface version is read from.
    pub version_property: String,
    /// Regex matched against property keys whose values must not be logged.
    pub sensitive_keys: String,
    /// Emit indented JSON instead of compact JSON.
    pub pretty: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            default_interface_version: SOL003_V2_4_1.to_string(),
            version_property: DEFAULT_VERSION_PROPERTY.to_string(),
            sensitive_keys: DEFAULT_SENSITIVE_KEYS.to_string(),
            pretty: false,
        }
    }
}
