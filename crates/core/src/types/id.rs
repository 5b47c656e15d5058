//! Newtype IDs for type-safe row references.
//!
//! Row ids in the hosted backend are opaque: some tables use uuids, older
//! ones use bigserial integers. The `define_id!` macro accepts both JSON
//! shapes and always stores the id as a string.

/// Macro to define a type-safe opaque ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize` as a plain string, `Deserialize` from a string or integer
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`
/// - `From<String>`, `From<&str>` and `Into<String>` implementations
///
/// # Example
///
/// ```rust
/// # use invite_core::define_id;
/// define_id!(TableId);
/// define_id!(SeatId);
///
/// let table_id = TableId::new("7");
/// let seat_id = SeatId::new("7");
///
/// // These are different types, so this won't compile:
/// // let _: TableId = seat_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, ::serde::Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                match <::serde_json::Value as ::serde::Deserialize>::deserialize(deserializer)? {
                    ::serde_json::Value::String(s) => Ok(Self(s)),
                    ::serde_json::Value::Number(n) => Ok(Self(n.to_string())),
                    other => Err(<D::Error as ::serde::de::Error>::custom(format!(
                        "expected string or integer id, got {other}"
                    ))),
                }
            }
        }
    };
}

define_id!(ConfirmationId);
define_id!(SettingsId);
define_id!(GiftId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_id_from_uuid_string() {
        let id: ConfirmationId =
            serde_json::from_str("\"5c7d1c1e-4a57-4f0a-9d55-0d3c2a9b6f10\"").unwrap();
        assert_eq!(id.as_str(), "5c7d1c1e-4a57-4f0a-9d55-0d3c2a9b6f10");
    }

    #[test]
    fn test_id_from_integer() {
        let id: GiftId = serde_json::from_str("42").unwrap();
        assert_eq!(id, GiftId::new("42"));
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_id_rejects_other_shapes() {
        assert!(serde_json::from_str::<SettingsId>("true").is_err());
        assert!(serde_json::from_str::<SettingsId>("null").is_err());
    }

    #[test]
    fn test_id_serializes_as_string() {
        let json = serde_json::to_string(&GiftId::new("42")).unwrap();
        assert_eq!(json, "\"42\"");
    }
}
