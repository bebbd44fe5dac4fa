//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// The intensity value was out of range.
    #[error("intensity must be between 1 and 10, got {value}")]
    IntensityOutOfRange { value: i64 },

    /// The email address is missing an '@'.
    #[error("invalid email address: {value}")]
    InvalidEmail { value: String },

    /// Invalid trend direction value.
    #[error("invalid trend direction: {value}")]
    InvalidTrendDirection { value: String },
}

/// Direction of recent activity for a habit.
///
/// Computed by comparing this week's entry count against last week's.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    /// More entries this week than last.
    Increasing,
    /// Fewer entries this week than last.
    Decreasing,
    /// Equal counts, or too few entries to classify.
    #[default]
    Stable,
}

impl TrendDirection {
    /// String representation for display and JSON output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
            Self::Stable => "stable",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TrendDirection {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "increasing" => Ok(Self::Increasing),
            "decreasing" => Ok(Self::Decreasing),
            "stable" => Ok(Self::Stable),
            _ => Err(ValidationError::InvalidTrendDirection {
                value: s.to_string(),
            }),
        }
    }
}

/// Generates a validated string ID newtype with common trait implementations.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new ID after validation.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                Ok(Self(id))
            }

            /// Creates a random UUIDv4 ID.
            #[must_use]
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            /// Returns the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(
    /// A validated user identifier.
    ///
    /// User IDs must be non-empty strings. Uniqueness is enforced at the
    /// database level.
    UserId, "user ID"
);

define_string_id!(
    /// A validated habit identifier.
    HabitId, "habit ID"
);

define_string_id!(
    /// A validated entry identifier.
    EntryId, "entry ID"
);

/// An entry intensity on the 1-10 scale.
///
/// Users can optionally rate how strong an urge or episode was. Values are
/// clamped during deserialization to be lenient with external data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Intensity(i64);

impl Intensity {
    /// The maximum intensity (10).
    pub const MAX: Self = Self(10);

    /// The minimum intensity (1).
    pub const MIN: Self = Self(1);

    /// Creates a new intensity after validation.
    ///
    /// Returns an error if the value is outside 1..=10.
    pub const fn new(value: i64) -> Result<Self, ValidationError> {
        if value < 1 || value > 10 {
            return Err(ValidationError::IntensityOutOfRange { value });
        }
        Ok(Self(value))
    }

    /// Creates an intensity, clamping to 1..=10.
    #[must_use]
    pub const fn clamped(value: i64) -> Self {
        if value < 1 {
            Self(1)
        } else if value > 10 {
            Self(10)
        } else {
            Self(value)
        }
    }

    /// Returns the inner value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for Intensity {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Intensity> for i64 {
    fn from(intensity: Intensity) -> Self {
        intensity.0
    }
}

impl Serialize for Intensity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Intensity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = i64::deserialize(deserializer)?;
        // Clamp on deserialization to be lenient with external data
        Ok(Self::clamped(value))
    }
}

/// Validates an email address for sign-in.
///
/// Mirrors the original sign-in check: non-empty and contains an '@'. Real
/// address verification is out of scope for a local-only session.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::Empty { field: "email" });
    }
    if !email.contains('@') {
        return Err(ValidationError::InvalidEmail {
            value: email.to_string(),
        });
    }
    Ok(())
}
