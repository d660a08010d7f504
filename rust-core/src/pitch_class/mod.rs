//! Pitch-class input vectors and their validation

pub mod characteristic;

pub use characteristic::{CharacteristicFunction, InvalidInputError, PITCH_CLASSES};
