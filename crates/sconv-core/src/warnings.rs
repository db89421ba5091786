//! Non-fatal mapping diagnostics.
//!
//! Warnings never change control flow: the offending field is left at its
//! default and mapping continues with its siblings. Every warning is
//! recorded in the [`MappingReport`] returned by `map`; whether it is also
//! logged is governed by [`set_warnings`] or the mapper configuration.

use std::fmt;
use std::sync::OnceLock;

use serde::Serialize;

static WARNINGS_ENABLED: OnceLock<bool> = OnceLock::new();

/// Enables or disables warning logs for the whole process.
///
/// Only the first call has an effect; it returns `true` when it did.
pub fn set_warnings(enabled: bool) -> bool {
    WARNINGS_ENABLED.set(enabled).is_ok()
}

/// Returns the process-wide warning toggle (enabled unless switched off).
pub fn warnings_enabled() -> bool {
    WARNINGS_ENABLED.get().copied().unwrap_or(true)
}

/// A field-level problem found while mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MappingWarning {
    /// No rule and no same-named source field.
    NoMapping {
        source_type: String,
        target_type: String,
        field: String,
    },
    /// The source and target fields cannot be reconciled.
    IncompatibleTypes {
        source_type: String,
        target_type: String,
        field: String,
        source_field_type: String,
        target_field_type: String,
    },
    /// A rule function parameter got its default value.
    ZeroValueArgument {
        function: String,
        parameter_type: String,
        position: usize,
    },
}

impl MappingWarning {
    /// Target field the warning is about, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::NoMapping { field, .. } | Self::IncompatibleTypes { field, .. } => Some(field),
            Self::ZeroValueArgument { .. } => None,
        }
    }

    pub(crate) fn log(&self) {
        match self {
            Self::NoMapping {
                source_type,
                target_type,
                field,
            } => tracing::warn!(
                source = %source_type,
                target = %target_type,
                field = %field,
                "No mapping found for target field"
            ),
            Self::IncompatibleTypes {
                source_type,
                target_type,
                field,
                source_field_type,
                target_field_type,
            } => tracing::warn!(
                source = %source_type,
                target = %target_type,
                field = %field,
                from = %source_field_type,
                to = %target_field_type,
                "Ignoring mapping for incompatible types"
            ),
            Self::ZeroValueArgument {
                function,
                parameter_type,
                position,
            } => tracing::warn!(
                function = %function,
                parameter = %parameter_type,
                position,
                "Passing default value to rule function"
            ),
        }
    }
}

impl fmt::Display for MappingWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMapping {
                source_type,
                target_type,
                field,
            } => write!(
                f,
                "({source_type} -> {target_type}) no mapping found for '{field}'"
            ),
            Self::IncompatibleTypes {
                source_type,
                target_type,
                field,
                source_field_type,
                target_field_type,
            } => write!(
                f,
                "({source_type} -> {target_type}) ignoring mapping for '{field}' \
                 ({source_field_type}) to ({target_field_type}): incompatible types"
            ),
            Self::ZeroValueArgument {
                function,
                parameter_type,
                position,
            } => write!(
                f,
                "passing default value in rule function ({function}) for argument of type \
                 '{parameter_type}' in position {position}"
            ),
        }
    }
}

/// Outcome of a successful `map` call.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MappingReport {
    warnings: Vec<MappingWarning>,
}

impl MappingReport {
    pub fn warnings(&self) -> &[MappingWarning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<MappingWarning> {
        self.warnings
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// True when every target field was mapped, ignored, or computed cleanly.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Target fields left without a mapping source.
    pub fn unmapped_fields(&self) -> Vec<&str> {
        self.warnings
            .iter()
            .filter(|w| matches!(w, MappingWarning::NoMapping { .. }))
            .filter_map(MappingWarning::field)
            .collect()
    }

    pub(crate) fn push(&mut self, warning: MappingWarning) {
        self.warnings.push(warning);
    }
}
