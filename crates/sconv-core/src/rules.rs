//! Rule sets and rule definitions.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

use crate::invoke::{ComputeRule, IntoComputeRule};
use crate::reflect::{Reflect, TypeInfo, Typed};

/// What to do with one target field.
#[derive(Debug, Clone)]
pub enum Rule {
    /// Leave the field at its default value.
    Ignore,
    /// Copy from the named source field.
    RenameFrom(String),
    /// Fill the field with the result of a function.
    Compute(ComputeRule),
}

/// Rules for one (source, target) pair, keyed by target field name.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: BTreeMap<String, Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip `field` on the target.
    #[must_use]
    pub fn ignore(self, field: impl Into<String>) -> Self {
        self.with_rule(field, Rule::Ignore)
    }

    /// Fill target `field` from source field `from`.
    #[must_use]
    pub fn rename(self, field: impl Into<String>, from: impl Into<String>) -> Self {
        self.with_rule(field, Rule::RenameFrom(from.into()))
    }

    /// Fill target `field` with the result of `function`.
    #[must_use]
    pub fn compute<M, F>(self, field: impl Into<String>, function: F) -> Self
    where
        F: IntoComputeRule<M>,
    {
        self.with_rule(field, Rule::Compute(function.into_compute_rule()))
    }

    #[must_use]
    pub fn with_rule(mut self, field: impl Into<String>, rule: Rule) -> Self {
        self.insert(field, rule);
        self
    }

    /// Adds or replaces the rule for `field`, returning the previous one.
    pub fn insert(&mut self, field: impl Into<String>, rule: Rule) -> Option<Rule> {
        self.rules.insert(field.into(), rule)
    }

    pub fn get(&self, field: &str) -> Option<&Rule> {
        self.rules.get(field)
    }

    /// Rules in target field name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = (&'a String, &'a Rule);
    type IntoIter = btree_map::Iter<'a, String, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// Identity of a (source type, target type) mapping.
///
/// Equality and hashing use the type ids only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleKey {
    source: TypeInfo,
    target: TypeInfo,
}

impl RuleKey {
    pub fn new(source: TypeInfo, target: TypeInfo) -> Self {
        Self { source, target }
    }

    pub fn of<S: Typed, T: Typed>() -> Self {
        Self::new(S::type_info(), T::type_info())
    }

    pub fn source(&self) -> TypeInfo {
        self.source
    }

    pub fn target(&self) -> TypeInfo {
        self.target
    }
}

impl fmt::Display for RuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({} -> {})",
            self.source.type_name(),
            self.target.type_name()
        )
    }
}

/// A rule set bound to the types it maps between.
#[derive(Debug, Clone)]
pub struct RuleDefinition {
    key: RuleKey,
    rules: RuleSet,
}

impl RuleDefinition {
    /// Rules for mapping `S` into `T`.
    pub fn between<S: Typed, T: Typed>(rules: RuleSet) -> Self {
        Self {
            key: RuleKey::of::<S, T>(),
            rules,
        }
    }

    /// Rules keyed by the runtime types of two exemplar values.
    pub fn from_exemplars(source: &dyn Reflect, target: &dyn Reflect, rules: RuleSet) -> Self {
        Self {
            key: RuleKey::new(source.reflect_type(), target.reflect_type()),
            rules,
        }
    }

    pub fn key(&self) -> &RuleKey {
        &self.key
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn into_parts(self) -> (RuleKey, RuleSet) {
        (self.key, self.rules)
    }
}

/// A provider of several rule definitions, registered together.
///
/// ```
/// use sconv_core::{RuleDefinition, RuleGroup, RuleSet};
///
/// struct Defaults;
///
/// impl RuleGroup for Defaults {
///     fn rule_definitions(&self) -> Vec<RuleDefinition> {
///         vec![RuleDefinition::between::<String, String>(RuleSet::new())]
///     }
/// }
///
/// assert_eq!(Defaults.rule_definitions().len(), 1);
/// ```
pub trait RuleGroup {
    /// Name used in registration logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    fn rule_definitions(&self) -> Vec<RuleDefinition>;
}
