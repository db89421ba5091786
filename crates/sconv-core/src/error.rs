//! Error types for rule registration and mapping.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Which side of a mapping a diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Source,
    Target,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Source => f.write_str("source"),
            Side::Target => f.write_str("target"),
        }
    }
}

/// Fatal errors from registration or from malformed `map` arguments.
///
/// A rejected rule set is never installed in the registry.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MappingError {
    /// The (source, target) pair already has a rule set.
    #[error("rules for mapping ({source_type} -> {target_type}) already exist")]
    DuplicateRules {
        source_type: &'static str,
        target_type: &'static str,
    },

    /// A rule names a field the target struct does not have.
    #[error(
        "({source_type} -> {target_type}) field '{field}' is not present in target struct {target_type}"
    )]
    UnknownTargetField {
        source_type: &'static str,
        target_type: &'static str,
        field: String,
    },

    /// A rename rule names a field the source struct does not have.
    #[error(
        "({source_type} -> {target_type}) field '{field}' is not present in source struct {source_type}"
    )]
    UnknownSourceField {
        source_type: &'static str,
        target_type: &'static str,
        field: String,
    },

    /// A rename rule pairs fields whose kinds cannot be reconciled.
    #[error(
        "({source_type} -> {target_type}) field '{target_field}' has different kind in source \
         ({source_field}: {source_field_type}) and target ({target_field}: {target_field_type})"
    )]
    KindMismatch {
        source_type: &'static str,
        target_type: &'static str,
        source_field: String,
        source_field_type: &'static str,
        target_field: String,
        target_field_type: &'static str,
    },

    /// A function rule returns something other than the target field type.
    #[error(
        "({source_type} -> {target_type}) function for '{field}' must return '{expected}', \
         currently returns '{actual}'; function = {signature}"
    )]
    ReturnTypeMismatch {
        source_type: &'static str,
        target_type: &'static str,
        field: String,
        expected: &'static str,
        actual: &'static str,
        signature: String,
    },

    /// A rule value that cannot be applied at all.
    #[error("({source_type} -> {target_type}) rule '{field}' is not valid: {reason}")]
    MalformedRule {
        source_type: &'static str,
        target_type: &'static str,
        field: String,
        reason: &'static str,
    },

    /// A mapping root or rule key side that is not a struct.
    #[error("{side} must be a struct, got {type_name}")]
    NotAStruct { side: Side, type_name: &'static str },

    /// The process-wide registry lock was poisoned by a panicking writer.
    #[error("rule registry lock poisoned")]
    RegistryPoisoned,
}

/// Result type for registration and mapping operations.
pub type Result<T> = std::result::Result<T, MappingError>;
