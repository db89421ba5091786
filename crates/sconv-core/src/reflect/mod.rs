//! Build-time reflection for mappable types.
//!
//! The mapping engine never inspects memory layouts. Every type it touches
//! describes itself through [`Typed`] (a static [`TypeInfo`]) and exposes
//! its contents through [`Reflect`] and one of the kind views
//! ([`Struct`], [`Seq`], [`Array`], [`Map`], [`Pointer`]).
//!
//! Scalars, `String`, `Vec<T>`, `[T; N]`, `HashMap<K, V>`, `BTreeMap<K, V>`
//! and `Option<T>` are covered out of the box. User structs opt in with
//! [`reflect_struct!`](crate::reflect_struct) or
//! [`impl_reflect_struct!`](crate::impl_reflect_struct).

use std::any::{Any, TypeId};
use std::fmt;

mod impls;
mod macros;

/// Primitive kinds understood by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    F32,
    F64,
    Char,
    String,
}

impl ScalarKind {
    /// Returns the Rust spelling of the primitive.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::I8 => "i8",
            ScalarKind::I16 => "i16",
            ScalarKind::I32 => "i32",
            ScalarKind::I64 => "i64",
            ScalarKind::I128 => "i128",
            ScalarKind::Isize => "isize",
            ScalarKind::U8 => "u8",
            ScalarKind::U16 => "u16",
            ScalarKind::U32 => "u32",
            ScalarKind::U64 => "u64",
            ScalarKind::U128 => "u128",
            ScalarKind::Usize => "usize",
            ScalarKind::F32 => "f32",
            ScalarKind::F64 => "f64",
            ScalarKind::Char => "char",
            ScalarKind::String => "string",
        }
    }
}

/// Coarse kind of a type.
///
/// Two distinct struct types share [`Kind::Struct`]; two vectors with
/// different element types share [`Kind::Seq`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Scalar(ScalarKind),
    Struct,
    Seq,
    Array,
    Map,
    Pointer,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Scalar(scalar) => f.write_str(scalar.as_str()),
            Kind::Struct => f.write_str("struct"),
            Kind::Seq => f.write_str("seq"),
            Kind::Array => f.write_str("array"),
            Kind::Map => f.write_str("map"),
            Kind::Pointer => f.write_str("pointer"),
        }
    }
}

/// Lazily resolved type descriptor.
///
/// Child descriptors are function pointers so a struct holding a `Vec` of
/// itself can still describe its fields.
pub type TypeInfoFn = fn() -> TypeInfo;

/// Shape of a type together with its child descriptors.
#[derive(Clone, Copy)]
pub enum TypeKind {
    Scalar(ScalarKind),
    Struct(&'static [FieldInfo]),
    Seq(TypeInfoFn),
    Array { len: usize, element: TypeInfoFn },
    Map { key: TypeInfoFn, value: TypeInfoFn },
    Pointer(TypeInfoFn),
}

/// Named field of a struct, in declaration order.
#[derive(Clone, Copy)]
pub struct FieldInfo {
    name: &'static str,
    type_info: TypeInfoFn,
}

impl FieldInfo {
    pub const fn new(name: &'static str, type_info: TypeInfoFn) -> Self {
        Self { name, type_info }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_info(&self) -> TypeInfo {
        (self.type_info)()
    }
}

impl fmt::Debug for FieldInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldInfo")
            .field("name", &self.name)
            .field("type", &self.type_info().type_name())
            .finish()
    }
}

/// Static description of a reflected type.
///
/// Equality is type identity: two descriptors are equal iff they describe
/// the same `TypeId`.
#[derive(Clone, Copy)]
pub struct TypeInfo {
    type_id: TypeId,
    type_name: &'static str,
    kind: TypeKind,
}

impl TypeInfo {
    /// Builds the descriptor of `T` with the given shape.
    pub fn of<T: Any>(kind: TypeKind) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            kind,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn type_kind(&self) -> TypeKind {
        self.kind
    }

    pub fn kind(&self) -> Kind {
        match self.kind {
            TypeKind::Scalar(scalar) => Kind::Scalar(scalar),
            TypeKind::Struct(_) => Kind::Struct,
            TypeKind::Seq(_) => Kind::Seq,
            TypeKind::Array { .. } => Kind::Array,
            TypeKind::Map { .. } => Kind::Map,
            TypeKind::Pointer(_) => Kind::Pointer,
        }
    }

    pub fn is_struct(&self) -> bool {
        matches!(self.kind, TypeKind::Struct(_))
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self.kind, TypeKind::Pointer(_))
    }

    /// True for `Option<S>` where `S` is a struct.
    pub fn is_pointer_to_struct(&self) -> bool {
        self.pointee().is_some_and(|inner| inner.is_struct())
    }

    /// Struct fields in declaration order; empty for every other kind.
    pub fn fields(&self) -> &'static [FieldInfo] {
        match self.kind {
            TypeKind::Struct(fields) => fields,
            _ => &[],
        }
    }

    /// Looks up a struct field by name.
    pub fn field(&self, name: &str) -> Option<&'static FieldInfo> {
        self.fields().iter().find(|field| field.name == name)
    }

    /// Element type of a sequence or array, value type of a map.
    pub fn element(&self) -> Option<TypeInfo> {
        match self.kind {
            TypeKind::Seq(element) | TypeKind::Array { element, .. } => Some(element()),
            TypeKind::Map { value, .. } => Some(value()),
            _ => None,
        }
    }

    /// Key type of a map.
    pub fn map_key(&self) -> Option<TypeInfo> {
        match self.kind {
            TypeKind::Map { key, .. } => Some(key()),
            _ => None,
        }
    }

    /// Inner type of a pointer.
    pub fn pointee(&self) -> Option<TypeInfo> {
        match self.kind {
            TypeKind::Pointer(inner) => Some(inner()),
            _ => None,
        }
    }

    /// Declared length of a fixed-size array.
    pub fn array_len(&self) -> Option<usize> {
        match self.kind {
            TypeKind::Array { len, .. } => Some(len),
            _ => None,
        }
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for TypeInfo {}

impl std::hash::Hash for TypeInfo {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeInfo")
            .field("type_name", &self.type_name)
            .field("kind", &self.kind())
            .finish()
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name)
    }
}

/// Static type description.
pub trait Typed: Any {
    fn type_info() -> TypeInfo;
}

/// Dynamic, object-safe access to a value.
pub trait Reflect: Any + Send + Sync {
    /// Descriptor of the concrete type behind this value.
    fn reflect_type(&self) -> TypeInfo;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    fn reflect_ref(&self) -> ReflectRef<'_>;

    fn reflect_mut(&mut self) -> ReflectMut<'_>;

    /// Overwrites `self` with a clone of `value` when both have the same type.
    ///
    /// Returns `false`, leaving `self` untouched, on a type mismatch.
    fn assign(&mut self, value: &dyn Reflect) -> bool;

    fn clone_value(&self) -> Box<dyn Reflect>;
}

impl dyn Reflect {
    pub fn is<T: Reflect>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: Reflect>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Reflect>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    /// Unboxes the value as `T`.
    pub fn take<T: Reflect>(self: Box<Self>) -> Option<T> {
        self.into_any().downcast::<T>().ok().map(|boxed| *boxed)
    }
}

impl fmt::Debug for dyn Reflect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reflect({})", self.reflect_type().type_name())
    }
}

/// Shared implementation of [`Reflect::assign`] for `Clone` types.
pub fn assign_cloned<T: Reflect + Clone>(target: &mut T, value: &dyn Reflect) -> bool {
    match value.as_any().downcast_ref::<T>() {
        Some(value) => {
            target.clone_from(value);
            true
        }
        None => false,
    }
}

/// Borrowed kind view of a value.
pub enum ReflectRef<'a> {
    Scalar(&'a dyn Reflect),
    Struct(&'a dyn Struct),
    Seq(&'a dyn Seq),
    Array(&'a dyn Array),
    Map(&'a dyn Map),
    Pointer(&'a dyn Pointer),
}

/// Mutable kind view of a value.
pub enum ReflectMut<'a> {
    Scalar(&'a mut dyn Reflect),
    Struct(&'a mut dyn Struct),
    Seq(&'a mut dyn Seq),
    Array(&'a mut dyn Array),
    Map(&'a mut dyn Map),
    Pointer(&'a mut dyn Pointer),
}

/// Named-field aggregate.
pub trait Struct: Reflect {
    fn field(&self, name: &str) -> Option<&dyn Reflect>;

    fn field_mut(&mut self, name: &str) -> Option<&mut dyn Reflect>;
}

/// Ordered, variable-length container.
pub trait Seq: Reflect {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    fn clear(&mut self);

    /// A default-valued element of the sequence's element type.
    fn new_element(&self) -> Box<dyn Reflect>;

    /// Appends `value`; returns `false` if it is not of the element type.
    fn push(&mut self, value: Box<dyn Reflect>) -> bool;
}

/// Ordered, fixed-length container.
pub trait Array: Reflect {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    fn new_element(&self) -> Box<dyn Reflect>;

    /// Replaces the element at `index`; returns `false` when out of bounds
    /// or of the wrong type.
    fn set(&mut self, index: usize, value: Box<dyn Reflect>) -> bool;
}

/// Keyed container.
pub trait Map: Reflect {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entries(&self) -> Vec<(&dyn Reflect, &dyn Reflect)>;

    fn clear(&mut self);

    fn new_value(&self) -> Box<dyn Reflect>;

    /// Inserts `value` under a clone of `key`; returns `false` if either has
    /// the wrong type.
    fn insert(&mut self, key: &dyn Reflect, value: Box<dyn Reflect>) -> bool;
}

/// Nullable indirection.
pub trait Pointer: Reflect {
    fn get(&self) -> Option<&dyn Reflect>;

    fn get_mut(&mut self) -> Option<&mut dyn Reflect>;

    fn is_null(&self) -> bool {
        self.get().is_none()
    }

    /// Replaces the pointee with a default value and returns it.
    fn allocate(&mut self) -> &mut dyn Reflect;
}
