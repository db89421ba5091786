//! Property tests for same-shape mapping and type classification.

use proptest::prelude::*;
use proptest::sample::select;

use sconv_core::classify::classify_types;
use sconv_core::reflect::{Kind, TypeInfo, Typed};
use sconv_core::{Arguments, Decision, Mapper, RuleRegistry, reflect_struct};

reflect_struct! {
    #[derive(Debug, Clone, Default, PartialEq)]
    struct Inner {
        code: String,
        weight: i32,
    }
}

reflect_struct! {
    #[derive(Debug, Clone, Default, PartialEq)]
    struct InnerCopy {
        code: String,
        weight: i32,
    }
}

reflect_struct! {
    #[derive(Debug, Clone, Default, PartialEq)]
    struct Profile {
        id: u64,
        name: String,
        active: bool,
        tags: Vec<String>,
        nickname: Option<String>,
        inner: Inner,
        history: Vec<Inner>,
    }
}

reflect_struct! {
    #[derive(Debug, Clone, Default, PartialEq)]
    struct ProfileCopy {
        id: u64,
        name: String,
        active: bool,
        tags: Vec<String>,
        nickname: Option<String>,
        inner: InnerCopy,
        history: Vec<InnerCopy>,
    }
}

fn inner_strategy() -> impl Strategy<Value = Inner> {
    ("[a-z]{0,6}", any::<i32>()).prop_map(|(code, weight)| Inner { code, weight })
}

fn profile_strategy() -> impl Strategy<Value = Profile> {
    (
        any::<u64>(),
        ".{0,12}",
        any::<bool>(),
        prop::collection::vec("[a-z]{1,4}", 0..4),
        prop::option::of("[A-Z][a-z]{0,5}"),
        inner_strategy(),
        prop::collection::vec(inner_strategy(), 0..4),
    )
        .prop_map(|(id, name, active, tags, nickname, inner, history)| Profile {
            id,
            name,
            active,
            tags,
            nickname,
            inner,
            history,
        })
}

fn copy_inner(inner: &Inner) -> InnerCopy {
    InnerCopy {
        code: inner.code.clone(),
        weight: inner.weight,
    }
}

fn type_pool() -> Vec<fn() -> TypeInfo> {
    vec![
        i32::type_info,
        i64::type_info,
        String::type_info,
        Inner::type_info,
        InnerCopy::type_info,
        Option::<Inner>::type_info,
        Option::<i32>::type_info,
        Vec::<Inner>::type_info,
        Vec::<InnerCopy>::type_info,
        Vec::<Option<InnerCopy>>::type_info,
        Vec::<i32>::type_info,
        <[Inner; 2]>::type_info,
        <[InnerCopy; 3]>::type_info,
        std::collections::HashMap::<String, Inner>::type_info,
        std::collections::BTreeMap::<String, InnerCopy>::type_info,
        std::collections::BTreeMap::<u8, InnerCopy>::type_info,
    ]
}

proptest! {
    #[test]
    fn same_shape_mapping_copies_every_field(profile in profile_strategy()) {
        let registry = RuleRegistry::new();
        let mut target = ProfileCopy::default();
        let report = Mapper::new(&registry)
            .map(&profile, &mut target, &Arguments::new())
            .unwrap();

        let expected = ProfileCopy {
            id: profile.id,
            name: profile.name.clone(),
            active: profile.active,
            tags: profile.tags.clone(),
            nickname: profile.nickname.clone(),
            inner: copy_inner(&profile.inner),
            history: profile.history.iter().map(copy_inner).collect(),
        };
        prop_assert_eq!(target, expected);
        prop_assert!(report.is_clean());
    }

    #[test]
    fn mapping_a_type_onto_itself_is_identity(profile in profile_strategy()) {
        let registry = RuleRegistry::new();
        let mut target = Profile::default();
        Mapper::new(&registry)
            .map(&profile, &mut target, &Arguments::new())
            .unwrap();
        prop_assert_eq!(target, profile);
    }

    #[test]
    fn classification_is_symmetric(
        a in select(type_pool()),
        b in select(type_pool()),
    ) {
        prop_assert_eq!(classify_types(&a(), &b()), classify_types(&b(), &a()));
    }

    #[test]
    fn identical_types_always_assign_directly(a in select(type_pool())) {
        prop_assert_eq!(classify_types(&a(), &a()), Decision::DirectAssign);
    }

    #[test]
    fn distinct_kinds_without_pointers_are_incompatible(
        a in select(type_pool()),
        b in select(type_pool()),
    ) {
        let (a, b) = (a(), b());
        prop_assume!(a.kind() != b.kind());
        prop_assume!(a.kind() != Kind::Pointer && b.kind() != Kind::Pointer);
        prop_assert_eq!(classify_types(&a, &b), Decision::Incompatible);
    }

    #[test]
    fn classification_never_ignores(
        a in select(type_pool()),
        b in select(type_pool()),
    ) {
        prop_assert_ne!(classify_types(&a(), &b()), Decision::Ignore);
    }
}
