//! Rule-driven, recursive struct-to-struct value mapping.
//!
//! This crate copies values from a source struct into a target struct of a
//! different but related shape:
//!
//! - **Same-named fields** are copied when their types line up
//! - **Rules** rename, ignore, or compute individual target fields
//! - **Nested values** (structs, `Vec`s, arrays, maps, `Option`s) are mapped
//!   recursively, element by element
//! - **Problems** with a single field become warnings, never panics
//!
//! # Module Organization
//!
//! - [`reflect`]: type descriptors and dynamic views used by the engine
//! - [`classify`]: decides how a source value reaches a target slot
//! - [`rules`]: rule sets, rule definitions and rule groups
//! - [`invoke`]: function rules and argument injection
//! - [`registry`]: validated rule storage plus the process-wide registry
//! - [`engine`]: the recursive mapper
//!
//! # Example
//!
//! ```rust
//! use sconv_core::{Mapper, RuleDefinition, RuleRegistry, RuleSet, args};
//!
//! sconv_core::reflect_struct! {
//!     #[derive(Debug, Clone, Default)]
//!     pub struct Source {
//!         pub user_id: i64,
//!         pub name: String,
//!     }
//! }
//!
//! sconv_core::reflect_struct! {
//!     #[derive(Debug, Clone, Default)]
//!     pub struct Target {
//!         pub id: i64,
//!         pub full_name: String,
//!     }
//! }
//!
//! let mut registry = RuleRegistry::new();
//! registry.register(RuleDefinition::between::<Source, Target>(
//!     RuleSet::new()
//!         .rename("id", "user_id")
//!         .compute("full_name", |s: Source| s.name),
//! ))?;
//!
//! let source = Source { user_id: 7, name: "Al".to_string() };
//! let mut target = Target::default();
//! let report = Mapper::new(&registry).map(&source, &mut target, &args![])?;
//!
//! assert_eq!(target.id, 7);
//! assert_eq!(target.full_name, "Al");
//! assert!(report.is_clean());
//! # Ok::<(), sconv_core::MappingError>(())
//! ```

pub mod classify;
mod config;
pub mod engine;
mod error;
pub mod invoke;
pub mod reflect;
pub mod registry;
pub mod rules;
mod validate;
mod warnings;

pub use classify::{Decision, classify};
pub use config::MapperConfig;
pub use engine::Mapper;
pub use error::{MappingError, Result, Side};
pub use invoke::{Arguments, ComputeRule, IntoComputeRule, Signature};
pub use reflect::{Reflect, TypeInfo, Typed};
pub use registry::{RuleRegistry, map, register_rule_groups, register_rules};
pub use rules::{Rule, RuleDefinition, RuleGroup, RuleKey, RuleSet};
pub use warnings::{MappingReport, MappingWarning, set_warnings, warnings_enabled};
