//! [`MessageDocument`] → JSON text.

use crate::error::MessageError;
use crate::types::MessageDocument;

/// Serialize a document to compact JSON. Keys keep their insertion order.
pub fn serialize(document: &MessageDocument) -> Result<String, MessageError> {
    serde_json::to_string(document).map_err(|e| MessageError::Serialize(e.to_string()))
}

/// Serialize a document to indented JSON.
pub fn serialize_pretty(document: &MessageDocument) -> Result<String, MessageError> {
    serde_json::to_string_pretty(document).map_err(|e| MessageError::Serialize(e.to_string()))
}
