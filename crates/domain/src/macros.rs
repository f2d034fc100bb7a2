//! Macro for implementing Display and FromStr for wire-named enums
//!
//! Several API parameters are closed sets of string literals (`userType`,
//! `userStatus`, HTTP verbs). This macro maps each variant to its exact wire
//! spelling for `Display` and parses case-insensitively for `FromStr`.
//!
//! # Example
//!
//! ```rust
//! use hyperstore_domain::impl_wire_name_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Region {
//!     East,
//!     West,
//! }
//!
//! impl_wire_name_conversions!(Region {
//!     East => "us-east",
//!     West => "us-west",
//! });
//!
//! assert_eq!(Region::East.to_string(), "us-east");
//! assert_eq!("US-WEST".parse::<Region>().unwrap(), Region::West);
//! ```

/// Implements Display and FromStr for enums with fixed wire names
///
/// - `Display` writes the wire name verbatim
/// - `FromStr` matches wire names ignoring ASCII case and fails with
///   [`HyperStoreError::Decode`](crate::HyperStoreError::Decode)
#[macro_export]
macro_rules! impl_wire_name_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Wire spelling of this value.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = $crate::HyperStoreError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($str) {
                        return Ok(Self::$variant);
                    }
                )+
                Err($crate::HyperStoreError::Decode(format!(
                    "Invalid {}: {}",
                    stringify!($enum_name),
                    s
                )))
            }
        }
    };
}
