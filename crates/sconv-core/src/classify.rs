//! Type compatibility classification.
//!
//! Decides, for a source value and a target slot, how the engine moves data
//! from one to the other. Rules are evaluated in order; the first match
//! wins:
//!
//! 1. identical types assign directly (even identical structs, which would
//!    otherwise recurse for nothing)
//! 2. two structs recurse field by field
//! 3. two sequences recurse when both elements are structs or pointers to
//!    structs
//! 4. two fixed arrays recurse when both elements are structs
//! 5. two maps recurse when the keys are identical and both values are
//!    structs
//! 6. a pointer on either side is adapted (a null source pointer is ignored)
//! 7. anything else is incompatible

use crate::reflect::{Kind, Reflect, ReflectRef, TypeInfo};

/// How a source value reaches a target slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    DirectAssign,
    StructRecurse,
    SequenceRecurse,
    ArrayRecurse,
    MapRecurse,
    PointerAdapt,
    /// Null source pointer: leave the target untouched.
    Ignore,
    Incompatible,
}

impl Decision {
    pub fn is_incompatible(&self) -> bool {
        matches!(self, Decision::Incompatible)
    }
}

/// Classifies a pair of types.
///
/// Never returns [`Decision::Ignore`], which depends on the source value.
pub fn classify_types(source: &TypeInfo, target: &TypeInfo) -> Decision {
    if source == target {
        return Decision::DirectAssign;
    }

    match (source.kind(), target.kind()) {
        (Kind::Struct, Kind::Struct) => Decision::StructRecurse,
        (Kind::Seq, Kind::Seq) => sequences(source, target),
        (Kind::Array, Kind::Array) => arrays(source, target),
        (Kind::Map, Kind::Map) => maps(source, target),
        (Kind::Pointer, _) | (_, Kind::Pointer) => Decision::PointerAdapt,
        _ => Decision::Incompatible,
    }
}

/// Classifies a source value against a target type.
pub fn classify_value(source: &dyn Reflect, target: &TypeInfo) -> Decision {
    let decision = classify_types(&source.reflect_type(), target);
    match (decision, source.reflect_ref()) {
        (Decision::PointerAdapt, ReflectRef::Pointer(pointer)) if pointer.is_null() => {
            Decision::Ignore
        }
        _ => decision,
    }
}

/// Classifies a source value against a target value.
pub fn classify(source: &dyn Reflect, target: &dyn Reflect) -> Decision {
    classify_value(source, &target.reflect_type())
}

fn struct_or_pointer_to_struct(info: &TypeInfo) -> bool {
    info.is_struct() || info.is_pointer_to_struct()
}

fn sequences(source: &TypeInfo, target: &TypeInfo) -> Decision {
    match (source.element(), target.element()) {
        (Some(s), Some(t)) if struct_or_pointer_to_struct(&s) && struct_or_pointer_to_struct(&t) => {
            Decision::SequenceRecurse
        }
        _ => Decision::Incompatible,
    }
}

fn arrays(source: &TypeInfo, target: &TypeInfo) -> Decision {
    match (source.element(), target.element()) {
        (Some(s), Some(t)) if s.is_struct() && t.is_struct() => Decision::ArrayRecurse,
        _ => Decision::Incompatible,
    }
}

fn maps(source: &TypeInfo, target: &TypeInfo) -> Decision {
    let same_keys = match (source.map_key(), target.map_key()) {
        (Some(s), Some(t)) => s == t,
        _ => false,
    };
    match (source.element(), target.element()) {
        (Some(s), Some(t)) if same_keys && s.is_struct() && t.is_struct() => Decision::MapRecurse,
        _ => Decision::Incompatible,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use super::*;
    use crate::reflect::Typed;

    crate::reflect_struct! {
        #[derive(Debug, Clone, Default)]
        struct Left {
            name: String,
        }
    }

    crate::reflect_struct! {
        #[derive(Debug, Clone, Default)]
        struct Right {
            name: String,
        }
    }

    fn decide<S: Typed, T: Typed>() -> Decision {
        classify_types(&S::type_info(), &T::type_info())
    }

    #[test]
    fn identical_types_assign_directly() {
        assert_eq!(decide::<i64, i64>(), Decision::DirectAssign);
        assert_eq!(decide::<Left, Left>(), Decision::DirectAssign);
        assert_eq!(decide::<Vec<String>, Vec<String>>(), Decision::DirectAssign);
        assert_eq!(
            decide::<Option<Left>, Option<Left>>(),
            Decision::DirectAssign
        );
    }

    #[test]
    fn distinct_structs_recurse() {
        assert_eq!(decide::<Left, Right>(), Decision::StructRecurse);
    }

    #[test]
    fn scalars_of_different_types_are_incompatible() {
        assert_eq!(decide::<i32, i64>(), Decision::Incompatible);
        assert_eq!(decide::<String, Left>(), Decision::Incompatible);
        assert_eq!(decide::<Vec<Left>, [Right; 2]>(), Decision::Incompatible);
    }

    #[test]
    fn sequences_need_struct_elements() {
        assert_eq!(decide::<Vec<Left>, Vec<Right>>(), Decision::SequenceRecurse);
        assert_eq!(
            decide::<Vec<Option<Left>>, Vec<Right>>(),
            Decision::SequenceRecurse
        );
        assert_eq!(
            decide::<Vec<Left>, Vec<Option<Right>>>(),
            Decision::SequenceRecurse
        );
        assert_eq!(decide::<Vec<i32>, Vec<String>>(), Decision::Incompatible);
        assert_eq!(decide::<Vec<Left>, Vec<String>>(), Decision::Incompatible);
    }

    #[test]
    fn arrays_need_plain_struct_elements() {
        assert_eq!(decide::<[Left; 3], [Right; 3]>(), Decision::ArrayRecurse);
        assert_eq!(decide::<[Left; 3], [Right; 2]>(), Decision::ArrayRecurse);
        assert_eq!(
            decide::<[Option<Left>; 2], [Right; 2]>(),
            Decision::Incompatible
        );
        assert_eq!(decide::<[i32; 2], [i64; 2]>(), Decision::Incompatible);
    }

    #[test]
    fn maps_need_identical_keys_and_struct_values() {
        assert_eq!(
            decide::<HashMap<String, Left>, HashMap<String, Right>>(),
            Decision::MapRecurse
        );
        assert_eq!(
            decide::<HashMap<String, Left>, BTreeMap<String, Right>>(),
            Decision::MapRecurse
        );
        assert_eq!(
            decide::<HashMap<u32, Left>, HashMap<String, Right>>(),
            Decision::Incompatible
        );
        assert_eq!(
            decide::<HashMap<String, i32>, HashMap<String, i64>>(),
            Decision::Incompatible
        );
    }

    #[test]
    fn pointers_are_adapted() {
        assert_eq!(decide::<Option<Left>, Right>(), Decision::PointerAdapt);
        assert_eq!(decide::<Left, Option<Right>>(), Decision::PointerAdapt);
        assert_eq!(decide::<Option<i32>, i32>(), Decision::PointerAdapt);
    }

    #[test]
    fn null_source_pointer_is_ignored() {
        let none: Option<Left> = None;
        let target = Right::default();
        assert_eq!(classify(&none, &target), Decision::Ignore);

        let some = Some(Left::default());
        assert_eq!(classify(&some, &target), Decision::PointerAdapt);
    }
}
