//! Strongly-typed value objects used by package entities.
//!
//! Once a value is wrapped here it satisfied the constraint the backend
//! enforces for it (positive identifiers, percentages within range, one of
//! the offered durations), so the wizard never has to re-check it.
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Percentage outside of `[0, 100]` or not a finite number.
    #[error("percentage must be between 0 and 100")]
    PercentageOutOfRange,
    /// Duration not in the offered set of months.
    #[error("duration must be 3, 6, 9 or 12 months")]
    UnsupportedDuration,
    /// Gift threshold must be strictly positive.
    #[error("threshold must be greater than zero")]
    NonPositiveThreshold,
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
        )]
        #[serde(try_from = "i32", into = "i32")]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(PackageId, "Backend identifier of a package.");
id_newtype!(BusinessId, "Identifier of the business owning a package.");
id_newtype!(
    VipExperienceId,
    "Identifier of a VIP experience definition in the catalog."
);

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for NonEmptyString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for NonEmptyString {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

/// Discount percentage within `[0, 100]`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, PartialOrd)]
#[serde(try_from = "f64", into = "f64")]
pub struct Percentage(f64);

impl Percentage {
    pub fn new(value: f64) -> Result<Self, TypeConstraintError> {
        if value.is_finite() && (0.0..=100.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::PercentageOutOfRange)
        }
    }

    pub const fn get(self) -> f64 {
        self.0
    }
}

impl Display for Percentage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<f64> for Percentage {
    type Error = TypeConstraintError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Percentage> for f64 {
    fn from(value: Percentage) -> Self {
        value.0
    }
}

/// Validity period a business can pick for a package.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "u32", into = "u32")]
pub enum DurationMonths {
    Three,
    Six,
    Nine,
    Twelve,
}

impl DurationMonths {
    /// Every offered duration, shortest first.
    pub const ALL: [DurationMonths; 4] = [
        DurationMonths::Three,
        DurationMonths::Six,
        DurationMonths::Nine,
        DurationMonths::Twelve,
    ];

    pub const fn months(self) -> u32 {
        match self {
            DurationMonths::Three => 3,
            DurationMonths::Six => 6,
            DurationMonths::Nine => 9,
            DurationMonths::Twelve => 12,
        }
    }
}

impl Display for DurationMonths {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} months", self.months())
    }
}

impl TryFrom<u32> for DurationMonths {
    type Error = TypeConstraintError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            3 => Ok(DurationMonths::Three),
            6 => Ok(DurationMonths::Six),
            9 => Ok(DurationMonths::Nine),
            12 => Ok(DurationMonths::Twelve),
            _ => Err(TypeConstraintError::UnsupportedDuration),
        }
    }
}

impl From<DurationMonths> for u32 {
    fn from(value: DurationMonths) -> Self {
        value.months()
    }
}
