//! Strongly-typed value objects used by domain entities.
//!
//! Identifiers are opaque UUIDs. They cross the database boundary as raw
//! 16-byte blobs and the HTTP boundary as hyphenated strings.
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided uuid failed format validation.
    #[error("invalid uuid value")]
    InvalidUuid,
    /// Provided age was negative or did not fit the storage column.
    #[error("invalid age: {0}")]
    InvalidAge(i64),
}

/// Macro to generate lightweight newtypes for UUID identifiers.
macro_rules! uuid_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Parse from raw bytes (DB boundary).
            pub fn from_bytes(bytes: &[u8]) -> Result<Self, TypeConstraintError> {
                Ok(Self(
                    Uuid::from_slice(bytes).map_err(|_| TypeConstraintError::InvalidUuid)?,
                ))
            }

            /// Convert to raw bytes (DB boundary).
            pub fn as_bytes(&self) -> &[u8; 16] {
                self.0.as_bytes()
            }

            /// Returns the wrapped [`Uuid`].
            pub const fn get(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = TypeConstraintError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(
                    Uuid::parse_str(s.trim()).map_err(|_| TypeConstraintError::InvalidUuid)?,
                ))
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$name> for Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

uuid_newtype!(CompanyId, "Unique identifier for a company.");
uuid_newtype!(EmployeeId, "Unique identifier for an employee.");

/// Converts a stored age into the unsigned domain representation.
pub fn age_from_db(value: i32) -> Result<u32, TypeConstraintError> {
    u32::try_from(value).map_err(|_| TypeConstraintError::InvalidAge(i64::from(value)))
}

/// Converts a domain age into the signed storage column type.
pub fn age_to_db(value: u32) -> Result<i32, TypeConstraintError> {
    i32::try_from(value).map_err(|_| TypeConstraintError::InvalidAge(i64::from(value)))
}
