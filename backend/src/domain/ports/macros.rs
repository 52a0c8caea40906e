//! Helper macro for declaring driven-port error enums.
//!
//! Each variant gets a `thiserror` message and a snake_case constructor whose
//! parameters accept anything convertible into the field type.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = concat!("Build [`Self::", stringify!($variant), "`].")]
            #[must_use]
            pub const fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            #[doc = concat!("Build [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                // Fields are described by the variant message.
                $variant $( { $( #[allow(missing_docs)] $field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum SamplePortError {
            Connection { message: String } => "store unavailable: {message}",
            Duplicate { user_id: String } => "settings already exist for {user_id}",
            Timeout { seconds: u64, message: String } => "timed out after {seconds}s: {message}",
        }
    }

    #[test]
    fn string_fields_accept_str() {
        let err = SamplePortError::connection("refused");
        assert_eq!(err.to_string(), "store unavailable: refused");
    }

    #[test]
    fn constructor_names_are_snake_case() {
        let err = SamplePortError::duplicate("u-1");
        assert_eq!(err, SamplePortError::Duplicate { user_id: "u-1".into() });
    }

    #[test]
    fn mixed_field_types_keep_their_order() {
        let err = SamplePortError::timeout(5_u64, "pool checkout");
        assert_eq!(err.to_string(), "timed out after 5s: pool checkout");
    }
}
