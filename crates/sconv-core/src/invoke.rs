//! Function rules and argument injection.
//!
//! A function rule is any `Fn(A1, ..., An) -> R` with up to eight
//! parameters. When the engine evaluates it, each parameter is filled, in
//! declaration order, from:
//!
//! 1. the current source value (the struct being mapped at this depth),
//!    at most once per call and only for the first parameter of its type;
//! 2. the grouped arguments (the root source followed by the caller's extra
//!    arguments), drained front to back per type;
//! 3. `Default::default()`, with a warning.

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::reflect::{Reflect, TypeInfo, Typed};
use crate::warnings::MappingWarning;

/// Declared shape of a function rule.
#[derive(Debug, Clone)]
pub struct Signature {
    name: &'static str,
    params: Vec<TypeInfo>,
    output: TypeInfo,
}

impl Signature {
    pub fn new(name: &'static str, params: Vec<TypeInfo>, output: TypeInfo) -> Self {
        Self {
            name,
            params,
            output,
        }
    }

    /// Type name of the function or closure.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn params(&self) -> &[TypeInfo] {
        &self.params
    }

    pub fn output(&self) -> TypeInfo {
        self.output
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("fn(")?;
        for (index, param) in self.params.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            f.write_str(param.type_name())?;
        }
        write!(f, ") -> {}", self.output.type_name())
    }
}

type Invoke = dyn Fn(&mut ArgumentResolver<'_>) -> Box<dyn Reflect> + Send + Sync;

/// A type-erased function rule together with its signature.
#[derive(Clone)]
pub struct ComputeRule {
    signature: Arc<Signature>,
    invoke: Arc<Invoke>,
}

impl ComputeRule {
    /// Wraps a resolver-driven closure. Most callers want
    /// [`IntoComputeRule`] instead.
    pub fn new<F>(signature: Signature, invoke: F) -> Self
    where
        F: Fn(&mut ArgumentResolver<'_>) -> Box<dyn Reflect> + Send + Sync + 'static,
    {
        Self {
            signature: Arc::new(signature),
            invoke: Arc::new(invoke),
        }
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub(crate) fn call(&self, resolver: &mut ArgumentResolver<'_>) -> Box<dyn Reflect> {
        (self.invoke)(resolver)
    }
}

impl fmt::Debug for ComputeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComputeRule")
            .field("signature", &self.signature.to_string())
            .finish_non_exhaustive()
    }
}

/// Conversion of a plain function or closure into a [`ComputeRule`].
///
/// `Marker` only disambiguates the arity; it is inferred.
pub trait IntoComputeRule<Marker> {
    fn into_compute_rule(self) -> ComputeRule;
}

impl IntoComputeRule<()> for ComputeRule {
    fn into_compute_rule(self) -> ComputeRule {
        self
    }
}

macro_rules! impl_into_compute_rule {
    ($($arg:ident $value:ident),*) => {
        impl<F, R, $($arg,)*> IntoComputeRule<fn($($arg,)*) -> R> for F
        where
            F: Fn($($arg),*) -> R + Send + Sync + 'static,
            R: Reflect + Typed + Clone + Default,
            $($arg: Reflect + Typed + Clone + Default,)*
        {
            fn into_compute_rule(self) -> ComputeRule {
                let signature = Signature::new(
                    std::any::type_name::<F>(),
                    vec![$(<$arg as Typed>::type_info()),*],
                    R::type_info(),
                );
                ComputeRule::new(signature, move |resolver: &mut ArgumentResolver<'_>| {
                    $(let $value = resolver.resolve::<$arg>();)*
                    Box::new(self($($value),*)) as Box<dyn Reflect>
                })
            }
        }
    };
}

impl<F, R> IntoComputeRule<fn() -> R> for F
where
    F: Fn() -> R + Send + Sync + 'static,
    R: Reflect + Typed + Clone + Default,
{
    fn into_compute_rule(self) -> ComputeRule {
        let signature = Signature::new(std::any::type_name::<F>(), Vec::new(), R::type_info());
        ComputeRule::new(signature, move |_: &mut ArgumentResolver<'_>| {
            Box::new(self()) as Box<dyn Reflect>
        })
    }
}

impl_into_compute_rule!(A1 a1);
impl_into_compute_rule!(A1 a1, A2 a2);
impl_into_compute_rule!(A1 a1, A2 a2, A3 a3);
impl_into_compute_rule!(A1 a1, A2 a2, A3 a3, A4 a4);
impl_into_compute_rule!(A1 a1, A2 a2, A3 a3, A4 a4, A5 a5);
impl_into_compute_rule!(A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6);
impl_into_compute_rule!(A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6, A7 a7);
impl_into_compute_rule!(A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6, A7 a7, A8 a8);

/// Extra values handed to rule functions, matched by type.
#[derive(Debug, Default)]
pub struct Arguments {
    values: Vec<Box<dyn Reflect>>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with<T: Reflect>(mut self, value: T) -> Self {
        self.push(value);
        self
    }

    pub fn push<T: Reflect>(&mut self, value: T) {
        self.values.push(Box::new(value));
    }

    pub fn push_boxed(&mut self, value: Box<dyn Reflect>) {
        self.values.push(value);
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Reflect> + '_ {
        self.values.iter().map(|value| &**value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Clone for Arguments {
    fn clone(&self) -> Self {
        Self {
            values: self.values.iter().map(|value| value.clone_value()).collect(),
        }
    }
}

/// Builds an [`Arguments`] list.
///
/// ```
/// let args = sconv_core::args![42_i64, "x".to_string()];
/// assert_eq!(args.len(), 2);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::Arguments::new()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::Arguments::new()$(.with($value))+
    };
}

/// Call arguments grouped by runtime type, in insertion order.
#[derive(Debug, Default)]
pub(crate) struct GroupedArguments<'a> {
    groups: HashMap<TypeId, Vec<&'a dyn Reflect>>,
}

impl<'a> GroupedArguments<'a> {
    /// Groups the root source followed by the extra arguments.
    pub(crate) fn new(root: &'a dyn Reflect, extra: &'a Arguments) -> Self {
        let mut grouped = Self::default();
        grouped.insert(root);
        for value in extra.iter() {
            grouped.insert(value);
        }
        grouped
    }

    fn insert(&mut self, value: &'a dyn Reflect) {
        self.groups
            .entry(value.reflect_type().type_id())
            .or_default()
            .push(value);
    }

    fn get(&self, type_id: TypeId, index: usize) -> Option<&'a dyn Reflect> {
        self.groups
            .get(&type_id)
            .and_then(|values| values.get(index))
            .copied()
    }
}

/// Fills the parameters of one function rule call.
pub struct ArgumentResolver<'a> {
    current: &'a dyn Reflect,
    arguments: &'a GroupedArguments<'a>,
    signature: &'a Signature,
    consumed: HashMap<TypeId, usize>,
    current_bound: bool,
    position: usize,
    warnings: Vec<MappingWarning>,
}

impl<'a> ArgumentResolver<'a> {
    pub(crate) fn new(
        current: &'a dyn Reflect,
        arguments: &'a GroupedArguments<'a>,
        signature: &'a Signature,
    ) -> Self {
        Self {
            current,
            arguments,
            signature,
            consumed: HashMap::new(),
            current_bound: false,
            position: 0,
            warnings: Vec::new(),
        }
    }

    /// Produces the value for the next parameter, of type `A`.
    pub fn resolve<A: Reflect + Typed + Clone + Default>(&mut self) -> A {
        self.position += 1;

        if !self.current_bound
            && let Some(value) = self.current.downcast_ref::<A>()
        {
            self.current_bound = true;
            return value.clone();
        }

        let type_id = TypeId::of::<A>();
        let cursor = self.consumed.entry(type_id).or_insert(0);
        if let Some(value) = self
            .arguments
            .get(type_id, *cursor)
            .and_then(|value| value.downcast_ref::<A>())
        {
            *cursor += 1;
            return value.clone();
        }

        self.warnings.push(MappingWarning::ZeroValueArgument {
            function: self.signature.to_string(),
            parameter_type: std::any::type_name::<A>().to_string(),
            position: self.position,
        });
        A::default()
    }

    pub(crate) fn into_warnings(self) -> Vec<MappingWarning> {
        self.warnings
    }
}
