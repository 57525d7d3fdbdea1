//! Closed enumerations used throughout the message model.
//!
//! Interface versions are deliberately *not* an enum: new SOL003 revisions are
//! added by registering templates, so versions stay plain strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A SOL003 lifecycle operation, identified on the wire by its request message type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LifecycleOperation {
    #[serde(rename = "CreateVnfRequest")]
    Create,
    #[serde(rename = "InstantiateVnfRequest")]
    Instantiate,
    #[serde(rename = "HealVnfRequest")]
    Heal,
    #[serde(rename = "ScaleVnfRequest")]
    Scale,
    #[serde(rename = "ChangeCurrentVnfPkgRequest")]
    ChangeCurrentVnfPkg,
    #[serde(rename = "ChangeExtVnfConnectivityRequest")]
    ChangeExtVnfConnectivity,
    #[serde(rename = "ChangeVnfFlavourRequest")]
    ChangeVnfFlavour,
}

impl LifecycleOperation {
    pub const ALL: [LifecycleOperation; 7] = [
        LifecycleOperation::Create,
        LifecycleOperation::Instantiate,
        LifecycleOperation::Heal,
        LifecycleOperation::Scale,
        LifecycleOperation::ChangeCurrentVnfPkg,
        LifecycleOperation::ChangeExtVnfConnectivity,
        LifecycleOperation::ChangeVnfFlavour,
    ];

    /// The request message type name, e.g. `"CreateVnfRequest"`.
    pub fn message_type(self) -> &'static str {
        match self {
            LifecycleOperation::Create => "CreateVnfRequest",
            LifecycleOperation::Instantiate => "InstantiateVnfRequest",
            LifecycleOperation::Heal => "HealVnfRequest",
            LifecycleOperation::Scale => "ScaleVnfRequest",
            LifecycleOperation::ChangeCurrentVnfPkg => "ChangeCurrentVnfPkgRequest",
            LifecycleOperation::ChangeExtVnfConnectivity => "ChangeExtVnfConnectivityRequest",
            LifecycleOperation::ChangeVnfFlavour => "ChangeVnfFlavourRequest",
        }
    }
}

impl fmt::Display for LifecycleOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message_type())
    }
}

impl FromStr for LifecycleOperation {
    type Err = ();

    /// Accepts the message type name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LifecycleOperation::ALL
            .into_iter()
            .find(|op| op.message_type().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

/// Kind of container a skeleton field or path segment requires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    Mapping,
    Sequence,
}

impl ContainerKind {
    /// A fresh, empty container of this kind.
    pub fn empty(self) -> serde_json::Value {
        match self {
            ContainerKind::Mapping => serde_json::Value::Object(serde_json::Map::new()),
            ContainerKind::Sequence => serde_json::Value::Array(Vec::new()),
        }
    }
}

/// Shape of a node in a message document, used when reporting conflicts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Mapping,
    Sequence,
    Scalar,
    Null,
}

impl NodeKind {
    pub fn of(value: &serde_json::Value) -> NodeKind {
        match value {
            serde_json::Value::Object(_) => NodeKind::Mapping,
            serde_json::Value::Array(_) => NodeKind::Sequence,
            serde_json::Value::Null => NodeKind::Null,
            _ => NodeKind::Scalar,
        }
    }
}

impl From<ContainerKind> for NodeKind {
    fn from(kind: ContainerKind) -> Self {
        match kind {
            ContainerKind::Mapping => NodeKind::Mapping,
            ContainerKind::Sequence => NodeKind::Sequence,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Mapping => "mapping",
            NodeKind::Sequence => "sequence",
            NodeKind::Scalar => "scalar",
            NodeKind::Null => "null",
        };
        f.write_str(name)
    }
}

/// Diagnostic severity level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}
