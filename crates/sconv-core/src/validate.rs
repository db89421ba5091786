//! Registration-time validation of rule sets.
//!
//! Checks are made at the level of coarse kinds: a rename pairs fields of the
//! same kind (or a pointer to it), and a function returns exactly the target
//! field type. Element, key and pointee types of a renamed pair are only
//! reconciled while mapping, where a mismatch is reported as a warning.

use crate::error::{MappingError, Result, Side};
use crate::invoke::ComputeRule;
use crate::reflect::{FieldInfo, TypeInfo};
use crate::rules::{Rule, RuleKey, RuleSet};

/// Checks every rule of `rules` against the types of `key`.
pub(crate) fn check_rule_set(key: &RuleKey, rules: &RuleSet) -> Result<()> {
    let source = key.source();
    let target = key.target();
    ensure_struct(Side::Source, &source)?;
    ensure_struct(Side::Target, &target)?;

    tracing::info!(mapping = %key, rules = rules.len(), "Checking rules for mapping");

    for (field, rule) in rules {
        let target_field = target
            .field(field)
            .ok_or_else(|| MappingError::UnknownTargetField {
                source_type: source.type_name(),
                target_type: target.type_name(),
                field: field.clone(),
            })?;

        match rule {
            Rule::Ignore => {
                tracing::info!(mapping = %key, field = %field, "Field will be ignored");
            }
            Rule::RenameFrom(from) => check_rename(key, target_field, from)?,
            Rule::Compute(function) => check_compute(key, target_field, function)?,
        }
    }
    Ok(())
}

pub(crate) fn ensure_struct(side: Side, info: &TypeInfo) -> Result<()> {
    if info.is_struct() {
        Ok(())
    } else {
        Err(MappingError::NotAStruct {
            side,
            type_name: info.type_name(),
        })
    }
}

fn check_rename(key: &RuleKey, target_field: &FieldInfo, from: &str) -> Result<()> {
    let source = key.source();
    let target = key.target();
    if from.is_empty() {
        return Err(MappingError::MalformedRule {
            source_type: source.type_name(),
            target_type: target.type_name(),
            field: target_field.name().to_string(),
            reason: "source field name is empty",
        });
    }

    let source_field = source
        .field(from)
        .ok_or_else(|| MappingError::UnknownSourceField {
            source_type: source.type_name(),
            target_type: target.type_name(),
            field: from.to_string(),
        })?;

    let source_type = source_field.type_info();
    let target_type = target_field.type_info();
    if !kinds_compatible(&source_type, &target_type) {
        return Err(MappingError::KindMismatch {
            source_type: source.type_name(),
            target_type: target.type_name(),
            source_field: from.to_string(),
            source_field_type: source_type.type_name(),
            target_field: target_field.name().to_string(),
            target_field_type: target_type.type_name(),
        });
    }
    Ok(())
}

fn check_compute(key: &RuleKey, target_field: &FieldInfo, function: &ComputeRule) -> Result<()> {
    let expected = target_field.type_info();
    let actual = function.signature().output();
    if expected != actual {
        return Err(MappingError::ReturnTypeMismatch {
            source_type: key.source().type_name(),
            target_type: key.target().type_name(),
            field: target_field.name().to_string(),
            expected: expected.type_name(),
            actual: actual.type_name(),
            signature: function.signature().to_string(),
        });
    }
    Ok(())
}

/// Same kind, or one side is a pointer to the other side's kind.
pub(crate) fn kinds_compatible(source: &TypeInfo, target: &TypeInfo) -> bool {
    source.kind() == target.kind()
        || source.pointee().is_some_and(|inner| inner.kind() == target.kind())
        || target.pointee().is_some_and(|inner| inner.kind() == source.kind())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::Typed;

    #[test]
    fn kinds_compare_through_one_pointer() {
        assert!(kinds_compatible(&i64::type_info(), &i64::type_info()));
        assert!(kinds_compatible(
            &Option::<i64>::type_info(),
            &i64::type_info()
        ));
        assert!(kinds_compatible(
            &i64::type_info(),
            &Option::<i64>::type_info()
        ));
        assert!(!kinds_compatible(&i32::type_info(), &i64::type_info()));
        assert!(!kinds_compatible(
            &Option::<Option<i64>>::type_info(),
            &i64::type_info()
        ));
        assert!(kinds_compatible(
            &Vec::<u8>::type_info(),
            &Vec::<String>::type_info()
        ));
    }
}
