//! Registry validation against rules R-001 through R-005.
//!
//! Returns **all** errors and warnings, not just the first. Validation does not
//! modify the registry.

use crate::enums::DiagnosticSeverity;
use crate::error::{Diagnostic, ValidationResult};
use crate::primitives::{PathSegment, parse_path};
use crate::registry::{FieldRule, FieldSource, TemplateRegistry, TemplateSpec};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.[0-9]+\.[0-9]+$").unwrap());

/// Validate every template in `registry`.
pub fn validate_registry(registry: &TemplateRegistry) -> ValidationResult {
    let mut result = ValidationResult::default();
    for template in registry.iter() {
        validate_template(template, &mut result);
    }
    result
}

/// Validate a single template, appending findings to `result`.
pub fn validate_template(template: &TemplateSpec, result: &mut ValidationResult) {
    let base = format!("{}@{}", template.operation, template.version);

    r001_unique_field_names(template, &base, &mut result.errors);
    r002_prefix_syntax(template, &base, &mut result.errors);
    r003_source_keys(template, &base, &mut result.errors);
    r004_prefix_containers(template, &base, &mut result.warnings);
    r005_version_format(template, &base, &mut result.warnings);
}

fn diagnostic(severity: DiagnosticSeverity, code: &str, path: String, message: String) -> Diagnostic {
    Diagnostic {
        severity,
        code: code.to_string(),
        path: Some(path),
        message,
    }
}

// ─── R-001: Field names unique within a template ────────────────────────────

fn r001_unique_field_names(template: &TemplateSpec, base: &str, errors: &mut Vec<Diagnostic>) {
    let mut seen = HashSet::new();
    for (i, field) in template.fields.iter().enumerate() {
        if !seen.insert(field.name()) {
            errors.push(diagnostic(
                DiagnosticSeverity::Error,
                "R-001",
                format!("{base}.fields[{i}]"),
                format!("duplicate field name '{}'", field.name()),
            ));
        }
    }
}

// ─── R-002: Prefixes are well-formed key paths ending in '.' ────────────────

fn r002_prefix_syntax(template: &TemplateSpec, base: &str, errors: &mut Vec<Diagnostic>) {
    for (i, prefix) in template.prefixes.iter().enumerate() {
        let path = format!("{base}.prefixes[{i}]");
        let Some(stem) = prefix.strip_suffix('.') else {
            errors.push(diagnostic(
                DiagnosticSeverity::Error,
                "R-002",
                path,
                format!("prefix '{prefix}' must end with '.'"),
            ));
            continue;
        };
        match parse_path(stem) {
            Err(e) => errors.push(diagnostic(
                DiagnosticSeverity::Error,
                "R-002",
                path,
                format!("prefix '{prefix}' is not a valid path: {e}"),
            )),
            // the document root is a mapping
            Ok(segments) if matches!(segments.first(), Some(PathSegment::Index(_))) => {
                errors.push(diagnostic(
                    DiagnosticSeverity::Error,
                    "R-002",
                    path,
                    format!("prefix '{prefix}' must start with a key, not an index"),
                ));
            }
            Ok(_) => {}
        }
    }
}

// ─── R-003: Copied fields name a non-empty source property ──────────────────

fn r003_source_keys(template: &TemplateSpec, base: &str, errors: &mut Vec<Diagnostic>) {
    for (i, field) in template.fields.iter().enumerate() {
        if field.name().is_empty() {
            errors.push(diagnostic(
                DiagnosticSeverity::Error,
                "R-003",
                format!("{base}.fields[{i}]"),
                "field name must not be empty".to_string(),
            ));
        }
        if let Some(FieldSource::Property(key)) = field.source()
            && key.is_empty()
        {
            errors.push(diagnostic(
                DiagnosticSeverity::Error,
                "R-003",
                format!("{base}.fields[{i}].from"),
                format!("field '{}' has an empty source property", field.name()),
            ));
        }
    }
}

// ─── R-004: Prefix roots are declared containers ────────────────────────────

fn r004_prefix_containers(template: &TemplateSpec, base: &str, warnings: &mut Vec<Diagnostic>) {
    let containers: HashSet<&str> = template
        .fields
        .iter()
        .filter_map(|f| match f {
            FieldRule::Container { name, .. } => Some(name.as_str()),
            _ => None,
        })
        .collect();

    for (i, prefix) in template.prefixes.iter().enumerate() {
        let root = prefix.split('.').next().unwrap_or_default();
        if !root.is_empty() && !containers.contains(root) {
            warnings.push(diagnostic(
                DiagnosticSeverity::Warning,
                "R-004",
                format!("{base}.prefixes[{i}]"),
                format!("'{root}' is not a declared container; it is created on first use"),
            ));
        }
    }
}

// ─── R-005: Versions look like MAJOR.MINOR.PATCH ────────────────────────────

fn r005_version_format(template: &TemplateSpec, base: &str, warnings: &mut Vec<Diagnostic>) {
    if !VERSION_RE.is_match(&template.version) {
        warnings.push(diagnostic(
            DiagnosticSeverity::Warning,
            "R-005",
            format!("{base}.version"),
            format!("version '{}' is not of the form MAJOR.MINOR.PATCH", template.version),
        ));
    }
}
