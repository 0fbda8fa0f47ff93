//! Macros for declaring state ids.

/// Declare a `#[repr(u8)]` enum whose variants name states.
///
/// Every discriminant must be given explicitly and must be non-zero; a zero
/// discriminant fails to compile. The enum converts into `StateId`, so it can
/// be passed straight to table operations.
///
/// # Example
///
/// ```
/// use statetable::core::StateId;
/// use statetable::state_ids;
///
/// state_ids! {
///     pub enum Led {
///         On = 0x01,
///         Off = 0x02,
///     }
/// }
///
/// assert_eq!(StateId::from(Led::Off).get(), 0x02);
/// assert_eq!(Led::try_from(StateId::new(0x01).unwrap()), Ok(Led::On));
/// assert_eq!(Led::On.name(), "On");
/// ```
#[macro_export]
macro_rules! state_ids {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $value:expr
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        #[repr(u8)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant = $value
            ),*
        }

        $(
            const _: () = assert!(
                ($value) as u8 != 0,
                "state id 0 is reserved for empty slots"
            );
        )*

        impl $name {
            /// Variant name for display/logging.
            #[allow(dead_code)]
            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }

        impl ::core::convert::From<$name> for $crate::core::StateId {
            fn from(state: $name) -> Self {
                $crate::core::StateId::from_discriminant(state as u8)
            }
        }

        impl ::core::convert::TryFrom<$crate::core::StateId> for $name {
            type Error = $crate::table::TableError;

            fn try_from(id: $crate::core::StateId) -> ::core::result::Result<Self, Self::Error> {
                match id.get() {
                    $(raw if raw == Self::$variant as u8 => Ok(Self::$variant),)*
                    _ => Err($crate::table::TableError::UnknownState(id)),
                }
            }
        }
    };
}
