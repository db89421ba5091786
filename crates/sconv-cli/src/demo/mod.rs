//! Sample DTO-to-domain mapping exercised by `sconv demo`.

pub mod domain;
pub mod dto;
pub mod rules;

use sconv_core::{Arguments, Mapper, MapperConfig, MappingReport, Reflect, RuleRegistry};

use self::domain::UserDomain;
use self::dto::sample_user;
use self::rules::{NestedRules, user_rules};

/// Rule function arguments used when none are given on the command line.
pub const DEFAULT_ARGUMENTS: [&str; 3] = ["hello", "3.14", "world"];

/// Builds a registry holding every demo rule set.
pub fn build_registry() -> sconv_core::Result<RuleRegistry> {
    let mut registry = RuleRegistry::new();
    registry.register_rules([user_rules()])?;
    registry.register_rule_groups(&[&NestedRules])?;
    tracing::info!(rule_sets = registry.len(), "Demo rules registered");
    Ok(registry)
}

/// Maps the sample user with the given rule function arguments.
pub fn map_sample(
    registry: &RuleRegistry,
    config: MapperConfig,
    arguments: &Arguments,
) -> sconv_core::Result<(UserDomain, MappingReport)> {
    let source = sample_user();
    let mut target = UserDomain::default();
    let report = Mapper::with_config(registry, config).map(&source, &mut target, arguments)?;
    Ok((target, report))
}

/// Parses command line values into rule function arguments.
///
/// Falls back to [`DEFAULT_ARGUMENTS`] when `raw` is empty.
pub fn parse_arguments(raw: &[String]) -> Arguments {
    let mut arguments = Arguments::new();
    if raw.is_empty() {
        for value in DEFAULT_ARGUMENTS {
            arguments.push_boxed(parse_argument(value));
        }
    } else {
        for value in raw {
            arguments.push_boxed(parse_argument(value));
        }
    }
    arguments
}

/// Integers become `i64`, decimals `f64`, `true`/`false` `bool`, anything
/// else a `String`.
pub fn parse_argument(raw: &str) -> Box<dyn Reflect> {
    if let Ok(value) = raw.parse::<i64>() {
        Box::new(value)
    } else if let Ok(value) = raw.parse::<f64>() {
        Box::new(value)
    } else if let Ok(value) = raw.parse::<bool>() {
        Box::new(value)
    } else {
        Box::new(raw.to_string())
    }
}
