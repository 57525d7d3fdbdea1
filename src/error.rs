use crate::enums::{DiagnosticSeverity, NodeKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A structured finding produced by registry validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub message: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{} at {}: {}", self.code, path, self.message),
            None => write!(f, "{}: {}", self.code, self.message),
        }
    }
}

/// Result of validation: errors and warnings.
#[derive(Clone, Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Error kind reported alongside the offending path or field name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    MalformedPath,
    StructuralConflict,
    MissingRequiredField,
    UnsupportedValueType,
    UnknownTemplate,
    Config,
    Parse,
    Serialize,
}

/// Every way a message generation request can fail.
///
/// Any of these aborts the request as a whole; there is no partially
/// generated message.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MessageError {
    #[error("malformed path '{path}': {reason}")]
    MalformedPath { path: String, reason: String },

    /// `at` is the path prefix naming the node whose kind conflicts.
    #[error("structural conflict in '{path}' at '{at}': expected {expected}, found {found}")]
    StructuralConflict {
        path: String,
        at: String,
        expected: NodeKind,
        found: NodeKind,
    },

    #[error("required field '{field}' is missing (source '{source_key}')")]
    MissingRequiredField { field: String, source_key: String },

    #[error("property '{key}' has unsupported value type {found}")]
    UnsupportedValueType { key: String, found: NodeKind },

    #[error("no {message_type} template registered for interface version {version}")]
    UnknownTemplate {
        message_type: String,
        version: String,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("serialization error: {0}")]
    Serialize(String),
}

impl MessageError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MessageError::MalformedPath { .. } => ErrorKind::MalformedPath,
            MessageError::StructuralConflict { .. } => ErrorKind::StructuralConflict,
            MessageError::MissingRequiredField { .. } => ErrorKind::MissingRequiredField,
            MessageError::UnsupportedValueType { .. } => ErrorKind::UnsupportedValueType,
            MessageError::UnknownTemplate { .. } => ErrorKind::UnknownTemplate,
            MessageError::Config(_) => ErrorKind::Config,
            MessageError::Parse(_) => ErrorKind::Parse,
            MessageError::Serialize(_) => ErrorKind::Serialize,
        }
    }

    /// The offending path, field or property key, when the error has one.
    pub fn subject(&self) -> Option<&str> {
        match self {
            MessageError::MalformedPath { path, .. }
            | MessageError::StructuralConflict { path, .. } => Some(path),
            MessageError::MissingRequiredField { field, .. } => Some(field),
            MessageError::UnsupportedValueType { key, .. } => Some(key),
            MessageError::UnknownTemplate { message_type, .. } => Some(message_type),
            _ => None,
        }
    }
}
