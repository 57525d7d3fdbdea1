//! Request payload generation for the ETSI SOL003 VNF lifecycle-management API.
//!
//! A lifecycle request arrives as a flat property set. Each SOL003 operation
//! (create, instantiate, heal, scale, change package, change connectivity,
//! change flavour) and interface version has a template describing which
//! top-level fields the payload carries and which dotted property keys are
//! folded into it:
//!
//! ```text
//! ExecutionRequest ─▶ MessageGenerator ─▶ template (operation, version)
//!                                     ─▶ copy fields + materialize prefixes
//!                                     ─▶ JSON string
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use sol003_messages::{ExecutionRequest, LifecycleOperation, PropertySet};
//!
//! let properties: PropertySet = [
//!     ("vnfdId", "abc"),
//!     ("additionalParams.key1", "v1"),
//! ]
//! .into_iter()
//! .collect();
//! let request = ExecutionRequest::new("Create", properties);
//!
//! let message = sol003_messages::generate(LifecycleOperation::Create, &request).unwrap();
//! assert_eq!(message, r#"{"vnfdId":"abc","additionalParams":{"key1":"v1"}}"#);
//! ```
//!
//! The interface version is taken from the `interfaceVersion` property and
//! defaults to `2.4.1`. Custom templates can be loaded with
//! [`parse::parse_registry`] and passed to [`MessageGenerator::new`].

pub mod config;
pub mod enums;
pub mod error;
pub mod generate;
pub mod parse;
pub mod primitives;
pub mod registry;
pub mod serialize;
pub mod types;
pub mod validate;

pub use config::GeneratorConfig;
pub use enums::*;
pub use error::*;
pub use generate::MessageGenerator;
pub use registry::{FieldRule, FieldSource, TemplateRegistry, TemplateSpec};
pub use types::*;

// Re-export the core primitives at the crate root for convenience.
pub use primitives::{copy_if_present, materialize};

/// Generates the request message for `operation` with the built-in templates
/// and default configuration.
///
/// # Errors
///
/// Returns the first [`MessageError`] hit while building the message; no
/// partial message is produced.
pub fn generate(
    operation: LifecycleOperation,
    ctx: &impl ExecutionContext,
) -> Result<String, MessageError> {
    MessageGenerator::default().generate(operation, ctx)
}
