//! Declarative macros that make user structs mappable.

/// Declares a struct and makes it mappable.
///
/// The struct must also be `Clone + Default + Send + Sync + 'static`, and
/// every field type must itself be mappable.
///
/// ```
/// sconv_core::reflect_struct! {
///     #[derive(Debug, Clone, Default, PartialEq)]
///     pub struct Address {
///         pub street: String,
///         pub number: u32,
///     }
/// }
///
/// use sconv_core::reflect::Typed;
/// assert_eq!(Address::type_info().fields().len(), 2);
/// ```
#[macro_export]
macro_rules! reflect_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        $crate::impl_reflect_struct!($name { $($field: $ty),* });
    };
}

/// Makes an already-declared struct mappable, given its field list.
///
/// Only the listed fields are visible to the mapper; unlisted fields keep
/// whatever value `Default` gives them on the target side.
#[macro_export]
macro_rules! impl_reflect_struct {
    ($name:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        impl $crate::reflect::Typed for $name {
            fn type_info() -> $crate::reflect::TypeInfo {
                static FIELDS: &[$crate::reflect::FieldInfo] = &[
                    $(
                        $crate::reflect::FieldInfo::new(
                            stringify!($field),
                            <$ty as $crate::reflect::Typed>::type_info,
                        ),
                    )*
                ];
                $crate::reflect::TypeInfo::of::<$name>($crate::reflect::TypeKind::Struct(FIELDS))
            }
        }

        impl $crate::reflect::Reflect for $name {
            fn reflect_type(&self) -> $crate::reflect::TypeInfo {
                <$name as $crate::reflect::Typed>::type_info()
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
                self
            }

            fn into_any(self: ::std::boxed::Box<Self>) -> ::std::boxed::Box<dyn ::std::any::Any> {
                self
            }

            fn reflect_ref(&self) -> $crate::reflect::ReflectRef<'_> {
                $crate::reflect::ReflectRef::Struct(self)
            }

            fn reflect_mut(&mut self) -> $crate::reflect::ReflectMut<'_> {
                $crate::reflect::ReflectMut::Struct(self)
            }

            fn assign(&mut self, value: &dyn $crate::reflect::Reflect) -> bool {
                $crate::reflect::assign_cloned(self, value)
            }

            fn clone_value(&self) -> ::std::boxed::Box<dyn $crate::reflect::Reflect> {
                ::std::boxed::Box::new(::std::clone::Clone::clone(self))
            }
        }

        impl $crate::reflect::Struct for $name {
            #[allow(unused_variables)]
            fn field(&self, name: &str) -> ::std::option::Option<&dyn $crate::reflect::Reflect> {
                match name {
                    $(stringify!($field) => ::std::option::Option::Some(&self.$field),)*
                    _ => ::std::option::Option::None,
                }
            }

            #[allow(unused_variables)]
            fn field_mut(
                &mut self,
                name: &str,
            ) -> ::std::option::Option<&mut dyn $crate::reflect::Reflect> {
                match name {
                    $(stringify!($field) => ::std::option::Option::Some(&mut self.$field),)*
                    _ => ::std::option::Option::None,
                }
            }
        }
    };
}
