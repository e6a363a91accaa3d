//! Weight value object for pro/con items (-10 to +10 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Largest magnitude a single item may carry.
pub const MAX_WEIGHT: i32 = 10;

/// Signed item weight. Positive for pros, negative for cons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Weight(i8);

impl Weight {
    /// Zero weight.
    pub const ZERO: Weight = Weight(0);

    /// Creates a Weight, returning error if outside [-10, 10].
    pub fn new(value: i32) -> Result<Self, ValidationError> {
        if !(-MAX_WEIGHT..=MAX_WEIGHT).contains(&value) {
            return Err(ValidationError::out_of_range(
                "weight",
                -MAX_WEIGHT,
                MAX_WEIGHT,
                value,
            ));
        }
        Ok(Self(value as i8))
    }

    /// Returns the signed value.
    pub fn value(&self) -> i32 {
        self.0 as i32
    }

    /// Returns the unsigned magnitude.
    pub fn magnitude(&self) -> i32 {
        self.value().abs()
    }

    /// Returns true if this weight counts in favour.
    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Returns true if this weight counts against.
    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl TryFrom<i32> for Weight {
    type Error = ValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Weight::new(value)
    }
}

impl From<Weight> for i32 {
    fn from(weight: Weight) -> Self {
        weight.value()
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 > 0 { "+" } else { "" };
        write!(f, "{}{}", sign, self.0)
    }
}
