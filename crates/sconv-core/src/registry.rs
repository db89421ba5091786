//! Rule registry.
//!
//! # Ownership
//!
//! [`RuleRegistry`] is a plain value: build one, register rule definitions
//! into it (`&mut self`), then hand it to a [`Mapper`] for any number of
//! concurrent `map` calls (`&self`). For callers that prefer process-wide
//! state, [`register_rules`], [`register_rule_groups`] and [`map`] operate on
//! a lazily created global registry behind an [`RwLock`].

use std::collections::HashMap;
use std::sync::{LazyLock, RwLock};

use crate::engine::Mapper;
use crate::error::{MappingError, Result};
use crate::invoke::Arguments;
use crate::reflect::{Reflect, TypeInfo, Typed};
use crate::rules::{RuleDefinition, RuleGroup, RuleKey, RuleSet};
use crate::validate::check_rule_set;
use crate::warnings::MappingReport;

/// Validated rule sets indexed by (source type, target type).
///
/// A rule set that fails validation is never inserted.
#[derive(Debug, Default)]
pub struct RuleRegistry {
    rules: HashMap<RuleKey, RuleSet>,
}

impl RuleRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and registers one rule definition.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::DuplicateRules`] if the type pair already has
    /// rules, or the first validation failure of the rule set.
    pub fn register(&mut self, definition: RuleDefinition) -> Result<()> {
        let (key, rules) = definition.into_parts();
        if self.rules.contains_key(&key) {
            return Err(MappingError::DuplicateRules {
                source_type: key.source().type_name(),
                target_type: key.target().type_name(),
            });
        }

        check_rule_set(&key, &rules)?;
        tracing::debug!(mapping = %key, rules = rules.len(), "Registered rules");
        self.rules.insert(key, rules);
        Ok(())
    }

    /// Registers definitions in order, stopping at the first error.
    ///
    /// Definitions registered before the failing one stay registered.
    pub fn register_rules<I>(&mut self, definitions: I) -> Result<()>
    where
        I: IntoIterator<Item = RuleDefinition>,
    {
        for definition in definitions {
            self.register(definition)?;
        }
        Ok(())
    }

    /// Registers every definition provided by each group.
    pub fn register_rule_groups(&mut self, groups: &[&dyn RuleGroup]) -> Result<()> {
        for group in groups {
            let definitions = group.rule_definitions();
            if definitions.is_empty() {
                tracing::info!(group = group.name(), "Rule group provides no rule definitions");
                continue;
            }
            tracing::info!(
                group = group.name(),
                definitions = definitions.len(),
                "Registering rule group"
            );
            self.register_rules(definitions)?;
        }
        Ok(())
    }

    /// Rules for mapping `source` into `target`, if any were registered.
    pub fn get(&self, source: TypeInfo, target: TypeInfo) -> Option<&RuleSet> {
        self.rules.get(&RuleKey::new(source, target))
    }

    pub fn rules_for<S: Typed, T: Typed>(&self) -> Option<&RuleSet> {
        self.rules.get(&RuleKey::of::<S, T>())
    }

    pub fn contains<S: Typed, T: Typed>(&self) -> bool {
        self.rules.contains_key(&RuleKey::of::<S, T>())
    }

    /// Returns the number of registered type pairs.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterates over the registered type pairs in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &RuleKey> + '_ {
        self.rules.keys()
    }
}

static GLOBAL_REGISTRY: LazyLock<RwLock<RuleRegistry>> =
    LazyLock::new(|| RwLock::new(RuleRegistry::new()));

/// Registers rule definitions in the process-wide registry.
///
/// # Errors
///
/// See [`RuleRegistry::register`].
pub fn register_rules<I>(definitions: I) -> Result<()>
where
    I: IntoIterator<Item = RuleDefinition>,
{
    GLOBAL_REGISTRY
        .write()
        .map_err(|_| MappingError::RegistryPoisoned)?
        .register_rules(definitions)
}

/// Registers rule groups in the process-wide registry.
pub fn register_rule_groups(groups: &[&dyn RuleGroup]) -> Result<()> {
    GLOBAL_REGISTRY
        .write()
        .map_err(|_| MappingError::RegistryPoisoned)?
        .register_rule_groups(groups)
}

/// Maps `source` into `target` using the process-wide registry and the
/// default [`MapperConfig`](crate::MapperConfig).
///
/// The global registry stays read-locked for the whole traversal, so rule
/// functions must not call [`register_rules`] or [`register_rule_groups`].
///
/// # Errors
///
/// Returns [`MappingError::NotAStruct`] if either side is not a struct.
pub fn map<S, T>(source: &S, target: &mut T, arguments: &Arguments) -> Result<MappingReport>
where
    S: Reflect,
    T: Reflect,
{
    let registry = GLOBAL_REGISTRY
        .read()
        .map_err(|_| MappingError::RegistryPoisoned)?;
    Mapper::new(&registry).map(source, target, arguments)
}
