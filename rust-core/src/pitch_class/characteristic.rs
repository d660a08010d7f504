//! Characteristic functions over the 12 pitch classes
//!
//! A characteristic function assigns a weight to each pitch class of the
//! chromatic scale (C = 0, C# = 1, ..., B = 11). It is the input vector of
//! the spectral analyzer.

use std::fmt;
use std::ops::Index;
use std::str::FromStr;
use thiserror::Error;

/// Number of pitch classes in the chromatic scale
pub const PITCH_CLASSES: usize = 12;

#[derive(Error, Debug, Clone)]
pub enum InvalidInputError {
    #[error("Characteristic Function must have {expected} entries (found {found})")]
    WrongLength { expected: usize, found: usize },

    #[error("Characteristic Function entries must be finite (entry {index} is {value})")]
    NonFinite { index: usize, value: f64 },

    #[error("Characteristic Function entries must be numeric (entry {index} is {token:?})")]
    NotNumeric { index: usize, token: String },
}

/// Check that `values` has exactly `expected` finite entries
///
/// Length is checked before content.
pub fn validate(values: &[f64], expected: usize) -> Result<(), InvalidInputError> {
    if values.len() != expected {
        return Err(InvalidInputError::WrongLength {
            expected,
            found: values.len(),
        });
    }

    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(InvalidInputError::NonFinite {
            index,
            value: values[index],
        }),
        None => Ok(()),
    }
}

/// Validated weights for the 12 pitch classes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CharacteristicFunction([f64; PITCH_CLASSES]);

impl CharacteristicFunction {
    /// Create a characteristic function, rejecting non-finite weights
    pub fn new(values: [f64; PITCH_CLASSES]) -> Result<Self, InvalidInputError> {
        validate(&values, PITCH_CLASSES)?;
        Ok(Self(values))
    }

    /// Build the 0/1 indicator of a pitch-class set
    ///
    /// Pitch classes are taken modulo 12, so 12 and 0 both mean C.
    pub fn from_pitch_classes(classes: &[usize]) -> Self {
        let mut values = [0.0; PITCH_CLASSES];
        for &pc in classes {
            values[pc % PITCH_CLASSES] = 1.0;
        }
        Self(values)
    }

    /// Weights as a slice
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Weights as an array
    pub fn values(&self) -> [f64; PITCH_CLASSES] {
        self.0
    }
}

impl Index<usize> for CharacteristicFunction {
    type Output = f64;

    fn index(&self, pitch_class: usize) -> &f64 {
        &self.0[pitch_class]
    }
}

impl TryFrom<&[f64]> for CharacteristicFunction {
    type Error = InvalidInputError;

    fn try_from(values: &[f64]) -> Result<Self, Self::Error> {
        validate(values, PITCH_CLASSES)?;
        let mut weights = [0.0; PITCH_CLASSES];
        weights.copy_from_slice(values);
        Ok(Self(weights))
    }
}

impl TryFrom<Vec<f64>> for CharacteristicFunction {
    type Error = InvalidInputError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::try_from(values.as_slice())
    }
}

/// Parse a comma-separated list such as `"1, 0, 0, 0, 1, 0, 0, 1, 0, 0, 0, 0"`
impl FromStr for CharacteristicFunction {
    type Err = InvalidInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split(',').map(str::trim).collect();

        // Entry count is reported before any numeric problem
        if tokens.len() != PITCH_CLASSES {
            return Err(InvalidInputError::WrongLength {
                expected: PITCH_CLASSES,
                found: tokens.len(),
            });
        }

        let mut values = [0.0; PITCH_CLASSES];
        for (index, (slot, token)) in values.iter_mut().zip(&tokens).enumerate() {
            match token.parse::<f64>() {
                Ok(v) if v.is_finite() => *slot = v,
                _ => {
                    return Err(InvalidInputError::NotNumeric {
                        index,
                        token: token.to_string(),
                    })
                }
            }
        }

        Ok(Self(values))
    }
}

impl fmt::Display for CharacteristicFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", v)?;
        }
        Ok(())
    }
}
