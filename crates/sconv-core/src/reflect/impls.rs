//! Reflection for primitives and standard containers.

use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use super::{
    Array, Map, Pointer, Reflect, ReflectMut, ReflectRef, ScalarKind, Seq, TypeInfo, TypeKind,
    Typed, assign_cloned,
};

macro_rules! reflect_common {
    ($view:ident) => {
        fn reflect_type(&self) -> TypeInfo {
            <Self as Typed>::type_info()
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }

        fn into_any(self: Box<Self>) -> Box<dyn Any> {
            self
        }

        fn reflect_ref(&self) -> ReflectRef<'_> {
            ReflectRef::$view(self)
        }

        fn reflect_mut(&mut self) -> ReflectMut<'_> {
            ReflectMut::$view(self)
        }

        fn assign(&mut self, value: &dyn Reflect) -> bool {
            assign_cloned(self, value)
        }

        fn clone_value(&self) -> Box<dyn Reflect> {
            Box::new(self.clone())
        }
    };
}

macro_rules! impl_scalar {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Typed for $ty {
                fn type_info() -> TypeInfo {
                    TypeInfo::of::<$ty>(TypeKind::Scalar(ScalarKind::$kind))
                }
            }

            impl Reflect for $ty {
                reflect_common!(Scalar);
            }
        )*
    };
}

impl_scalar! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    char => Char,
    String => String,
}

// Vec<T>

impl<T> Typed for Vec<T>
where
    T: Reflect + Typed + Clone + Default,
{
    fn type_info() -> TypeInfo {
        TypeInfo::of::<Self>(TypeKind::Seq(T::type_info))
    }
}

impl<T> Reflect for Vec<T>
where
    T: Reflect + Typed + Clone + Default,
{
    reflect_common!(Seq);
}

impl<T> Seq for Vec<T>
where
    T: Reflect + Typed + Clone + Default,
{
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        self.as_slice().get(index).map(|item| item as &dyn Reflect)
    }

    fn clear(&mut self) {
        Vec::clear(self);
    }

    fn new_element(&self) -> Box<dyn Reflect> {
        Box::new(T::default())
    }

    fn push(&mut self, value: Box<dyn Reflect>) -> bool {
        match value.take::<T>() {
            Some(item) => {
                Vec::push(self, item);
                true
            }
            None => false,
        }
    }
}

// [T; N]

impl<T, const N: usize> Typed for [T; N]
where
    T: Reflect + Typed + Clone + Default,
{
    fn type_info() -> TypeInfo {
        TypeInfo::of::<Self>(TypeKind::Array {
            len: N,
            element: T::type_info,
        })
    }
}

impl<T, const N: usize> Reflect for [T; N]
where
    T: Reflect + Typed + Clone + Default,
{
    reflect_common!(Array);
}

impl<T, const N: usize> Array for [T; N]
where
    T: Reflect + Typed + Clone + Default,
{
    fn len(&self) -> usize {
        N
    }

    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        self.as_slice().get(index).map(|item| item as &dyn Reflect)
    }

    fn new_element(&self) -> Box<dyn Reflect> {
        Box::new(T::default())
    }

    fn set(&mut self, index: usize, value: Box<dyn Reflect>) -> bool {
        if index >= N {
            return false;
        }
        match value.take::<T>() {
            Some(item) => {
                self[index] = item;
                true
            }
            None => false,
        }
    }
}

// HashMap<K, V>

impl<K, V> Typed for HashMap<K, V>
where
    K: Reflect + Typed + Clone + Eq + Hash,
    V: Reflect + Typed + Clone + Default,
{
    fn type_info() -> TypeInfo {
        TypeInfo::of::<Self>(TypeKind::Map {
            key: K::type_info,
            value: V::type_info,
        })
    }
}

impl<K, V> Reflect for HashMap<K, V>
where
    K: Reflect + Typed + Clone + Eq + Hash,
    V: Reflect + Typed + Clone + Default,
{
    reflect_common!(Map);
}

impl<K, V> Map for HashMap<K, V>
where
    K: Reflect + Typed + Clone + Eq + Hash,
    V: Reflect + Typed + Clone + Default,
{
    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn entries(&self) -> Vec<(&dyn Reflect, &dyn Reflect)> {
        self.iter()
            .map(|(key, value)| (key as &dyn Reflect, value as &dyn Reflect))
            .collect()
    }

    fn clear(&mut self) {
        HashMap::clear(self);
    }

    fn new_value(&self) -> Box<dyn Reflect> {
        Box::new(V::default())
    }

    fn insert(&mut self, key: &dyn Reflect, value: Box<dyn Reflect>) -> bool {
        let Some(key) = key.downcast_ref::<K>() else {
            return false;
        };
        let Some(value) = value.take::<V>() else {
            return false;
        };
        HashMap::insert(self, key.clone(), value);
        true
    }
}

// BTreeMap<K, V>

impl<K, V> Typed for BTreeMap<K, V>
where
    K: Reflect + Typed + Clone + Ord,
    V: Reflect + Typed + Clone + Default,
{
    fn type_info() -> TypeInfo {
        TypeInfo::of::<Self>(TypeKind::Map {
            key: K::type_info,
            value: V::type_info,
        })
    }
}

impl<K, V> Reflect for BTreeMap<K, V>
where
    K: Reflect + Typed + Clone + Ord,
    V: Reflect + Typed + Clone + Default,
{
    reflect_common!(Map);
}

impl<K, V> Map for BTreeMap<K, V>
where
    K: Reflect + Typed + Clone + Ord,
    V: Reflect + Typed + Clone + Default,
{
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn entries(&self) -> Vec<(&dyn Reflect, &dyn Reflect)> {
        self.iter()
            .map(|(key, value)| (key as &dyn Reflect, value as &dyn Reflect))
            .collect()
    }

    fn clear(&mut self) {
        BTreeMap::clear(self);
    }

    fn new_value(&self) -> Box<dyn Reflect> {
        Box::new(V::default())
    }

    fn insert(&mut self, key: &dyn Reflect, value: Box<dyn Reflect>) -> bool {
        let Some(key) = key.downcast_ref::<K>() else {
            return false;
        };
        let Some(value) = value.take::<V>() else {
            return false;
        };
        BTreeMap::insert(self, key.clone(), value);
        true
    }
}

// Option<T> is the nullable indirection.

impl<T> Typed for Option<T>
where
    T: Reflect + Typed + Clone + Default,
{
    fn type_info() -> TypeInfo {
        TypeInfo::of::<Self>(TypeKind::Pointer(T::type_info))
    }
}

impl<T> Reflect for Option<T>
where
    T: Reflect + Typed + Clone + Default,
{
    reflect_common!(Pointer);
}

impl<T> Pointer for Option<T>
where
    T: Reflect + Typed + Clone + Default,
{
    fn get(&self) -> Option<&dyn Reflect> {
        self.as_ref().map(|inner| inner as &dyn Reflect)
    }

    fn get_mut(&mut self) -> Option<&mut dyn Reflect> {
        self.as_mut().map(|inner| inner as &mut dyn Reflect)
    }

    fn allocate(&mut self) -> &mut dyn Reflect {
        self.insert(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::Kind;

    #[test]
    fn scalar_descriptors() {
        assert_eq!(i64::type_info().kind(), Kind::Scalar(ScalarKind::I64));
        assert_eq!(String::type_info().kind(), Kind::Scalar(ScalarKind::String));
        assert_ne!(i64::type_info(), i32::type_info());
    }

    #[test]
    fn container_descriptors_expose_children() {
        let seq = Vec::<String>::type_info();
        assert_eq!(seq.kind(), Kind::Seq);
        assert_eq!(seq.element(), Some(String::type_info()));

        let array = <[u8; 4]>::type_info();
        assert_eq!(array.array_len(), Some(4));
        assert_eq!(array.element(), Some(u8::type_info()));

        let map = BTreeMap::<String, i32>::type_info();
        assert_eq!(map.map_key(), Some(String::type_info()));
        assert_eq!(map.element(), Some(i32::type_info()));

        let pointer = Option::<bool>::type_info();
        assert!(pointer.is_pointer());
        assert_eq!(pointer.pointee(), Some(bool::type_info()));
    }

    #[test]
    fn assign_rejects_other_types() {
        let mut target = 5_i64;
        assert!(!target.assign(&"x".to_string()));
        assert_eq!(target, 5);
        assert!(target.assign(&9_i64));
        assert_eq!(target, 9);
    }

    #[test]
    fn seq_push_checks_element_type() {
        let mut items: Vec<i32> = Vec::new();
        assert!(Seq::push(&mut items, Box::new(3_i32)));
        assert!(!Seq::push(&mut items, Box::new(3_i64)));
        assert_eq!(items, vec![3]);
        assert_eq!(Seq::len(&items), 1);
    }

    #[test]
    fn array_set_is_bounded() {
        let mut slots = [0_u8; 2];
        assert!(Array::set(&mut slots, 1, Box::new(7_u8)));
        assert!(!Array::set(&mut slots, 2, Box::new(7_u8)));
        assert_eq!(slots, [0, 7]);
    }

    #[test]
    fn map_insert_clones_key() {
        let mut map: HashMap<String, u32> = HashMap::new();
        let key = "k".to_string();
        assert!(Map::insert(&mut map, &key, Box::new(1_u32)));
        assert!(!Map::insert(&mut map, &1_u32, Box::new(1_u32)));
        assert_eq!(map.get("k"), Some(&1));
    }

    #[test]
    fn option_allocates_default() {
        let mut value: Option<String> = None;
        assert!(Pointer::is_null(&value));
        Pointer::allocate(&mut value);
        assert_eq!(value, Some(String::new()));
    }
}
