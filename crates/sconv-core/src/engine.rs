//! Recursive mapping engine.
//!
//! Walks the fields of the target struct in declaration order. For each
//! field it applies the registered rule, if any, or falls back to the
//! same-named source field, and lets the classifier decide how the value
//! crosses over. Problems with a single field become warnings; sibling
//! fields are still mapped.

use crate::classify::{Decision, classify_value};
use crate::config::MapperConfig;
use crate::error::{Result, Side};
use crate::invoke::{ArgumentResolver, Arguments, ComputeRule, GroupedArguments};
use crate::reflect::{Reflect, ReflectMut, ReflectRef, Struct};
use crate::registry::RuleRegistry;
use crate::rules::Rule;
use crate::validate::ensure_struct;
use crate::warnings::{MappingReport, MappingWarning};

/// Maps values using the rules of a borrowed registry.
#[derive(Debug, Clone, Copy)]
pub struct Mapper<'r> {
    registry: &'r RuleRegistry,
    config: MapperConfig,
}

impl<'r> Mapper<'r> {
    pub fn new(registry: &'r RuleRegistry) -> Self {
        Self::with_config(registry, MapperConfig::default())
    }

    pub fn with_config(registry: &'r RuleRegistry, config: MapperConfig) -> Self {
        Self { registry, config }
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Maps `source` into `target`.
    ///
    /// The root source is offered to rule functions ahead of `arguments`.
    /// Fields are written one at a time, so `target` keeps whatever was
    /// mapped before a problem was found.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::NotAStruct`](crate::MappingError::NotAStruct)
    /// if either side is not a struct.
    pub fn map<S, T>(
        &self,
        source: &S,
        target: &mut T,
        arguments: &Arguments,
    ) -> Result<MappingReport>
    where
        S: Reflect,
        T: Reflect,
    {
        self.map_dyn(source, target, arguments)
    }

    /// Type-erased form of [`Mapper::map`].
    pub fn map_dyn(
        &self,
        source: &dyn Reflect,
        target: &mut dyn Reflect,
        arguments: &Arguments,
    ) -> Result<MappingReport> {
        let source_type = source.reflect_type();
        let target_type = target.reflect_type();
        ensure_struct(Side::Source, &source_type)?;
        ensure_struct(Side::Target, &target_type)?;

        tracing::debug!(
            source = source_type.type_name(),
            target = target_type.type_name(),
            arguments = arguments.len(),
            "Mapping"
        );

        let grouped = GroupedArguments::new(source, arguments);
        let mut run = MappingRun {
            registry: self.registry,
            config: self.config,
            arguments: &grouped,
            report: MappingReport::default(),
        };
        run.map_struct(source, target);
        Ok(run.report)
    }
}

/// State of one top-level `map` call.
struct MappingRun<'a> {
    registry: &'a RuleRegistry,
    config: MapperConfig,
    arguments: &'a GroupedArguments<'a>,
    report: MappingReport,
}

impl MappingRun<'_> {
    fn map_struct(&mut self, source: &dyn Reflect, target: &mut dyn Reflect) {
        let source_type = source.reflect_type();
        let target_type = target.reflect_type();
        let (ReflectRef::Struct(source_struct), ReflectMut::Struct(target_struct)) =
            (source.reflect_ref(), target.reflect_mut())
        else {
            return;
        };

        let registry = self.registry;
        let rules = registry.get(source_type, target_type);

        for field in target_type.fields() {
            let name = field.name();
            match rules.and_then(|rules| rules.get(name)) {
                Some(Rule::Ignore) => {
                    tracing::trace!(field = name, "Ignoring field");
                }
                Some(Rule::RenameFrom(from)) => {
                    self.map_field(source_struct, target_struct, from, name);
                }
                Some(Rule::Compute(function)) => {
                    self.apply_compute(function, source, target_struct, name);
                }
                None if source_struct.field(name).is_some() => {
                    self.map_field(source_struct, target_struct, name, name);
                }
                None => self.warn(MappingWarning::NoMapping {
                    source_type: source_type.type_name().to_string(),
                    target_type: target_type.type_name().to_string(),
                    field: name.to_string(),
                }),
            }
        }
    }

    fn map_field(
        &mut self,
        source: &dyn Struct,
        target: &mut dyn Struct,
        source_field: &str,
        target_field: &str,
    ) {
        let source_type = source.reflect_type();
        let target_type = target.reflect_type();
        let (Some(value), Some(slot)) =
            (source.field(source_field), target.field_mut(target_field))
        else {
            return;
        };

        let value_type = value.reflect_type();
        let slot_type = slot.reflect_type();
        let decision = self.map_value(value, slot);
        tracing::debug!(
            from = source_field,
            to = target_field,
            decision = ?decision,
            "Mapped field"
        );

        if decision.is_incompatible() {
            self.warn(MappingWarning::IncompatibleTypes {
                source_type: source_type.type_name().to_string(),
                target_type: target_type.type_name().to_string(),
                field: target_field.to_string(),
                source_field_type: value_type.type_name().to_string(),
                target_field_type: slot_type.type_name().to_string(),
            });
        }
    }

    fn apply_compute(
        &mut self,
        function: &ComputeRule,
        current: &dyn Reflect,
        target: &mut dyn Struct,
        field: &str,
    ) {
        let arguments = self.arguments;
        let mut resolver = ArgumentResolver::new(current, arguments, function.signature());
        let value = function.call(&mut resolver);
        for warning in resolver.into_warnings() {
            self.warn(warning);
        }

        let target_type = target.reflect_type();
        let Some(slot) = target.field_mut(field) else {
            return;
        };
        let slot_type = slot.reflect_type();
        if self.map_value(value.as_ref(), slot).is_incompatible() {
            self.warn(MappingWarning::IncompatibleTypes {
                source_type: function.signature().to_string(),
                target_type: target_type.type_name().to_string(),
                field: field.to_string(),
                source_field_type: value.reflect_type().type_name().to_string(),
                target_field_type: slot_type.type_name().to_string(),
            });
        }
    }

    /// Moves one value into a slot of possibly different type.
    fn map_value(&mut self, source: &dyn Reflect, target: &mut dyn Reflect) -> Decision {
        let decision = classify_value(source, &target.reflect_type());
        match decision {
            Decision::DirectAssign => {
                target.assign(source);
            }
            Decision::StructRecurse => self.map_struct(source, target),
            Decision::SequenceRecurse => self.map_seq(source, target),
            Decision::ArrayRecurse => self.map_array(source, target),
            Decision::MapRecurse => self.map_map(source, target),
            Decision::PointerAdapt => return self.map_pointer(source, target),
            Decision::Ignore | Decision::Incompatible => {}
        }
        decision
    }

    /// Resolves the indirection on whichever side holds it.
    ///
    /// The target is only allocated once the inner types are known to be
    /// compatible; a null source leaves it untouched.
    fn map_pointer(&mut self, source: &dyn Reflect, target: &mut dyn Reflect) -> Decision {
        let source = match source.reflect_ref() {
            ReflectRef::Pointer(pointer) => match pointer.get() {
                Some(inner) => inner,
                None => return Decision::Ignore,
            },
            _ => source,
        };

        let target_type = target.reflect_type();
        let Some(inner_type) = target_type.pointee() else {
            return self.map_value(source, target);
        };
        match classify_value(source, &inner_type) {
            decision @ (Decision::Ignore | Decision::Incompatible) => decision,
            _ => match target.reflect_mut() {
                ReflectMut::Pointer(pointer) => self.map_value(source, pointer.allocate()),
                _ => Decision::Incompatible,
            },
        }
    }

    fn map_seq(&mut self, source: &dyn Reflect, target: &mut dyn Reflect) {
        let (ReflectRef::Seq(source), ReflectMut::Seq(target)) =
            (source.reflect_ref(), target.reflect_mut())
        else {
            return;
        };

        if self.config.clear_collections {
            target.clear();
        }
        for index in 0..source.len() {
            let Some(element) = source.get(index) else {
                continue;
            };
            let mut built = target.new_element();
            self.map_value(element, built.as_mut());
            target.push(built);
        }
    }

    fn map_array(&mut self, source: &dyn Reflect, target: &mut dyn Reflect) {
        let (ReflectRef::Array(source), ReflectMut::Array(target)) =
            (source.reflect_ref(), target.reflect_mut())
        else {
            return;
        };

        let count = source.len().min(target.len());
        for index in 0..count {
            let Some(element) = source.get(index) else {
                continue;
            };
            let mut built = target.new_element();
            self.map_value(element, built.as_mut());
            target.set(index, built);
        }
    }

    fn map_map(&mut self, source: &dyn Reflect, target: &mut dyn Reflect) {
        let (ReflectRef::Map(source), ReflectMut::Map(target)) =
            (source.reflect_ref(), target.reflect_mut())
        else {
            return;
        };

        if self.config.clear_collections {
            target.clear();
        }
        for (key, value) in source.entries() {
            let mut built = target.new_value();
            self.map_value(value, built.as_mut());
            target.insert(key, built);
        }
    }

    fn warn(&mut self, warning: MappingWarning) {
        if self.config.warnings_enabled() {
            warning.log();
        }
        self.report.push(warning);
    }
}
