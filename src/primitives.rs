//! Property materialization primitives.
//!
//! These turn flat dotted properties such as
//! `extVirtualLinks.0.resourceId` into the nested structure a SOL003 payload
//! expects, and back again.

use crate::enums::{ContainerKind, NodeKind};
use crate::error::MessageError;
use crate::types::{MessageDocument, PropertySet, PropertyValue};
use serde_json::Value;

/// Largest sequence index a path may address.
pub const MAX_SEQUENCE_INDEX: usize = 4096;

// ─── Path parsing ───────────────────────────────────────────────────────────

/// One segment of a dotted property path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathSegment<'a> {
    Key(&'a str),
    Index(usize),
}

impl PathSegment<'_> {
    /// The container kind this segment must be looked up in.
    pub fn container_kind(&self) -> ContainerKind {
        match self {
            PathSegment::Key(_) => ContainerKind::Mapping,
            PathSegment::Index(_) => ContainerKind::Sequence,
        }
    }
}

/// Splits a dotted path into segments.
///
/// A segment made only of ASCII digits is a sequence index; anything else is
/// a mapping key.
pub fn parse_path(path: &str) -> Result<Vec<PathSegment<'_>>, MessageError> {
    if path.is_empty() {
        return Err(malformed(path, "path is empty"));
    }

    let raw: Vec<&str> = path.split('.').collect();
    let last = raw.len() - 1;
    let mut segments = Vec::with_capacity(raw.len());

    for (i, segment) in raw.into_iter().enumerate() {
        if segment.is_empty() {
            let reason = if i == 0 {
                "leading separator"
            } else if i == last {
                "trailing separator"
            } else {
                "empty segment"
            };
            return Err(malformed(path, reason));
        }

        if segment.bytes().all(|b| b.is_ascii_digit()) {
            let index = segment
                .parse::<usize>()
                .ok()
                .filter(|i| *i <= MAX_SEQUENCE_INDEX)
                .ok_or_else(|| {
                    malformed(
                        path,
                        &format!("index {segment} exceeds limit {MAX_SEQUENCE_INDEX}"),
                    )
                })?;
            segments.push(PathSegment::Index(index));
        } else {
            segments.push(PathSegment::Key(segment));
        }
    }

    Ok(segments)
}

fn malformed(path: &str, reason: &str) -> MessageError {
    MessageError::MalformedPath {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}

/// Builds a conflict error for the node named by the first `node_len` segments
/// of `path` (zero names the document root).
fn conflict(path: &str, node_len: usize, expected: NodeKind, found: NodeKind) -> MessageError {
    let at = path.split('.').take(node_len).collect::<Vec<_>>().join(".");
    MessageError::StructuralConflict {
        path: path.to_string(),
        at,
        expected,
        found,
    }
}

// ─── materialize ────────────────────────────────────────────────────────────

/// Merges `value` into `document` at the dotted `path`, creating intermediate
/// mappings and sequences as the segments require.
///
/// Sequences are kept dense: addressing index `n` extends a shorter sequence
/// with nulls up to `n`. A null slot that has to be descended through becomes
/// an empty container of the kind the next segment asks for.
///
/// Fails with [`MessageError::StructuralConflict`] when an existing node has
/// the wrong kind, including a leaf assignment that would replace a mapping or
/// sequence. Containers are only ever created below the deepest existing node,
/// so a failed call leaves `document` untouched.
pub fn materialize(
    document: &mut MessageDocument,
    path: &str,
    value: &PropertyValue,
) -> Result<(), MessageError> {
    let segments = parse_path(path)?;

    let key = match segments[0] {
        PathSegment::Key(key) => key,
        PathSegment::Index(_) => {
            return Err(conflict(path, 0, NodeKind::Sequence, NodeKind::Mapping));
        }
    };

    let mut current = document.entry(key.to_string()).or_insert(Value::Null);

    for (depth, segment) in segments.iter().enumerate().skip(1) {
        if current.is_null() {
            *current = segment.container_kind().empty();
        }
        current = match (*segment, current) {
            (PathSegment::Key(key), Value::Object(map)) => {
                map.entry(key.to_string()).or_insert(Value::Null)
            }
            (PathSegment::Index(index), Value::Array(items)) => {
                if items.len() <= index {
                    items.resize(index + 1, Value::Null);
                }
                &mut items[index]
            }
            (segment, other) => {
                return Err(conflict(
                    path,
                    depth,
                    segment.container_kind().into(),
                    NodeKind::of(other),
                ));
            }
        };
    }

    if matches!(current, Value::Object(_) | Value::Array(_)) {
        return Err(conflict(
            path,
            segments.len(),
            NodeKind::Scalar,
            NodeKind::of(current),
        ));
    }
    *current = value.to_json();
    Ok(())
}

// ─── copy_if_present ────────────────────────────────────────────────────────

/// Copies the top-level property `field` into `document[field]` when it is
/// present and non-null. Otherwise the field is left out entirely.
///
/// The key is looked up verbatim; dots are not interpreted.
pub fn copy_if_present(source: &PropertySet, document: &mut MessageDocument, field: &str) {
    copy_field_if_present(source, field, document, field);
}

/// Like [`copy_if_present`], for payload fields fed from a differently named
/// property (e.g. `description` → `vnfInstanceDescription`).
pub fn copy_field_if_present(
    source: &PropertySet,
    source_key: &str,
    document: &mut MessageDocument,
    target_field: &str,
) {
    match source.get_non_null(source_key) {
        Some(value) => {
            document.insert(target_field.to_string(), value.to_json());
        }
        None => {
            tracing::trace!(field = target_field, source_key, "optional field omitted");
        }
    }
}

// ─── flatten_document ───────────────────────────────────────────────────────

/// Flattens a nested document into dotted properties, one per scalar or null
/// leaf, in document order. Empty containers produce no properties.
///
/// Materializing every returned property into an empty document rebuilds the
/// original, apart from empty containers and mapping keys that contain `.` or
/// consist only of digits.
pub fn flatten_document(document: &MessageDocument) -> PropertySet {
    let mut out = PropertySet::new();
    for (key, value) in document {
        flatten_into(value, key.clone(), &mut out);
    }
    out
}

fn flatten_into(value: &Value, prefix: String, out: &mut PropertySet) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten_into(child, format!("{prefix}.{key}"), out);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten_into(child, format!("{prefix}.{index}"), out);
            }
        }
        Value::String(s) => out.insert(prefix, PropertyValue::String(s.clone())),
        Value::Number(n) => out.insert(prefix, PropertyValue::Number(n.clone())),
        Value::Bool(b) => out.insert(prefix, PropertyValue::Bool(*b)),
        Value::Null => out.insert(prefix, PropertyValue::Null),
    }
}
