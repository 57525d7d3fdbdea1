use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::enums::NodeKind;
use crate::error::MessageError;

/// The nested structure a request payload is built into.
///
/// The root is always a mapping. With `preserve_order`, keys serialize in
/// insertion order.
pub type MessageDocument = serde_json::Map<String, Value>;

/// Replacement text for sensitive values in log output.
pub const OBFUSCATED_VALUE: &str = "######";

// ─── PropertyValue ──────────────────────────────────────────────────────────

/// A single caller-supplied property value. Only scalars and null are accepted.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    String(String),
    Number(Number),
    Bool(bool),
    Null,
}

impl PropertyValue {
    /// Converts a JSON value, rejecting arrays and objects.
    pub fn from_json(key: &str, value: Value) -> Result<Self, MessageError> {
        match value {
            Value::String(s) => Ok(PropertyValue::String(s)),
            Value::Number(n) => Ok(PropertyValue::Number(n)),
            Value::Bool(b) => Ok(PropertyValue::Bool(b)),
            Value::Null => Ok(PropertyValue::Null),
            other => Err(MessageError::UnsupportedValueType {
                key: key.to_string(),
                found: NodeKind::of(&other),
            }),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            PropertyValue::String(s) => Value::String(s.clone()),
            PropertyValue::Number(n) => Value::Number(n.clone()),
            PropertyValue::Bool(b) => Value::Bool(*b),
            PropertyValue::Null => Value::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, PropertyValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Bool(b)
    }
}

impl From<i64> for PropertyValue {
    fn from(n: i64) -> Self {
        PropertyValue::Number(n.into())
    }
}

impl From<u64> for PropertyValue {
    fn from(n: u64) -> Self {
        PropertyValue::Number(n.into())
    }
}

// ─── PropertySet ────────────────────────────────────────────────────────────

/// Flat, insertion-ordered property bag supplied for one request.
///
/// Keys may encode nesting with `.`-separated segments; the set itself never
/// interprets them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "IndexMap<String, Value>",
    into = "IndexMap<String, PropertyValue>"
)]
pub struct PropertySet {
    entries: IndexMap<String, PropertyValue>,
}

impl From<PropertySet> for IndexMap<String, PropertyValue> {
    fn from(set: PropertySet) -> Self {
        set.entries
    }
}

impl TryFrom<IndexMap<String, Value>> for PropertySet {
    type Error = MessageError;

    fn try_from(raw: IndexMap<String, Value>) -> Result<Self, Self::Error> {
        let entries = raw
            .into_iter()
            .map(|(key, value)| {
                let converted = PropertyValue::from_json(&key, value)?;
                Ok((key, converted))
            })
            .collect::<Result<IndexMap<_, _>, MessageError>>()?;
        Ok(PropertySet { entries })
    }
}

impl PropertySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from a JSON object, rejecting non-scalar values.
    pub fn from_json(value: Value) -> Result<Self, MessageError> {
        match value {
            Value::Object(map) => PropertySet::try_from(map.into_iter().collect::<IndexMap<_, _>>()),
            other => Err(MessageError::Parse(format!(
                "property set must be a JSON object, found {}",
                NodeKind::of(&other)
            ))),
        }
    }

    /// Inserts or replaces a property, keeping the original position on replace.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.entries.get(key)
    }

    /// Looks up a property, treating an explicit null as absent.
    pub fn get_non_null(&self, key: &str) -> Option<&PropertyValue> {
        self.entries.get(key).filter(|v| !v.is_null())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Properties whose key starts with any of `prefixes`, in set order.
    pub fn with_prefixes<'a>(
        &'a self,
        prefixes: &'a [String],
    ) -> impl Iterator<Item = (&'a str, &'a PropertyValue)> {
        self.iter()
            .filter(move |(key, _)| prefixes.iter().any(|p| key.starts_with(p.as_str())))
    }

    /// Renders the set for logging, replacing values of keys matching
    /// `sensitive` with [`OBFUSCATED_VALUE`].
    pub fn log_safe(&self, sensitive: &Regex) -> serde_json::Map<String, Value> {
        self.entries
            .iter()
            .map(|(key, value)| {
                let shown = if sensitive.is_match(key) && !value.is_null() {
                    Value::String(OBFUSCATED_VALUE.to_string())
                } else {
                    value.to_json()
                };
                (key.clone(), shown)
            })
            .collect()
    }
}

impl<K: Into<String>, V: Into<PropertyValue>> FromIterator<(K, V)> for PropertySet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = PropertySet::new();
        for (key, value) in iter {
            set.insert(key, value);
        }
        set
    }
}

// ─── ExecutionContext ───────────────────────────────────────────────────────

/// Everything the template driver reads from the calling system for one request.
pub trait ExecutionContext {
    fn properties(&self) -> &PropertySet;

    fn lifecycle_name(&self) -> Option<&str>;

    /// The request description: the `description` property, falling back to
    /// `vnfInstanceDescription`. Null counts as absent; any other value is
    /// passed through unchanged.
    fn description(&self) -> Option<&PropertyValue> {
        let properties = self.properties();
        properties
            .get_non_null("description")
            .or_else(|| properties.get_non_null("vnfInstanceDescription"))
    }
}

/// A lifecycle execution request as received from the orchestration layer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifecycle_name: Option<String>,
    #[serde(default)]
    pub properties: PropertySet,
    #[serde(default, skip_serializing_if = "PropertySet::is_empty")]
    pub system_properties: PropertySet,
}

impl ExecutionRequest {
    pub fn new(lifecycle_name: impl Into<String>, properties: PropertySet) -> Self {
        ExecutionRequest {
            lifecycle_name: Some(lifecycle_name.into()),
            properties,
            system_properties: PropertySet::new(),
        }
    }
}

impl ExecutionContext for ExecutionRequest {
    fn properties(&self) -> &PropertySet {
        &self.properties
    }

    fn lifecycle_name(&self) -> Option<&str> {
        self.lifecycle_name.as_deref()
    }
}
