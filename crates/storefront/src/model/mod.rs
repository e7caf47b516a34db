//! # Records
//!
//! Plain data structures for everything the storefront stores. Each record kind
//! implements [`ActorEntity`](resource_actor::ActorEntity) in its `*_actor` module and is
//! kept by its own [`ResourceActor`](resource_actor::ResourceActor).
//!
//! Identifiers are typed per kind and travel as `<kind>_<n>` strings (`area_3`,
//! `order_12`), both in JSON and in URL paths.

use std::fmt;
use thiserror::Error;

/// A string that does not name a record of the expected kind.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("invalid {kind} id: {value}")]
pub struct ParseIdError {
    pub kind: &'static str,
    pub value: String,
}

/// Declares a typed, sequential record id with its `<prefix>_<n>` text form.
macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub u32);

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::model::ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.strip_prefix(concat!($prefix, "_"))
                    .filter(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
                    .and_then(|n| n.parse().ok())
                    .map(Self)
                    .ok_or_else(|| $crate::model::ParseIdError {
                        kind: $prefix,
                        value: s.to_string(),
                    })
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use record_id;

pub mod admin;
pub mod area;
pub mod customer;
pub mod numeric;
pub mod order;
pub mod product;
pub mod scheme;

pub use admin::*;
pub use area::*;
pub use customer::*;
pub use order::*;
pub use product::*;
pub use scheme::*;

/// Output of the password hasher. Never printed.
#[derive(Clone, PartialEq)]
pub struct PasswordHash(pub String);

impl PasswordHash {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_text_form() {
        assert_eq!(AreaId(3).to_string(), "area_3");
        assert_eq!("area_3".parse::<AreaId>(), Ok(AreaId(3)));
        assert!("product_3".parse::<AreaId>().is_err());
        assert!("area_".parse::<AreaId>().is_err());
        assert!("area_+3".parse::<AreaId>().is_err());
        assert!("Kidwai Nagar".parse::<AreaId>().is_err());
    }

    #[test]
    fn test_id_json_is_a_string() {
        let json = serde_json::to_string(&OrderId(12)).unwrap();
        assert_eq!(json, "\"order_12\"");
        let back: OrderId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, OrderId(12));
    }

    #[test]
    fn test_password_hash_is_redacted() {
        let hash = PasswordHash("$2b$10$secret".to_string());
        assert_eq!(format!("{hash:?}"), "PasswordHash(..)");
    }
}
