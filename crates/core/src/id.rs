//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of an invoice draft (one editing session).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftId(Uuid);

/// Identifier of a line within a draft.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(Uuid);

macro_rules! impl_uuid_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Mint a new identifier.
            ///
            /// Uses UUIDv7 (time-ordered). Pass ids explicitly in tests that
            /// compare whole event sequences.
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $t {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<Uuid> for $t {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$t> for Uuid {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid = Uuid::from_str(s)
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(uuid))
            }
        }
    };
}

impl_uuid_newtype!(DraftId, "DraftId");
impl_uuid_newtype!(LineId, "LineId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minted_line_ids_are_distinct() {
        let a = LineId::new();
        let b = LineId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn line_id_parses_its_own_display() {
        let id = LineId::new();
        let parsed: LineId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn malformed_id_names_the_type() {
        let err = "not-a-uuid".parse::<LineId>().unwrap_err();
        match err {
            DomainError::InvalidId(msg) if msg.starts_with("LineId") => {}
            other => panic!("Expected InvalidId for LineId, got {other:?}"),
        }
    }
}
