//! Pitch-Class DFT - Spectral Analysis of Characteristic Functions
//! 
//! Discrete Fourier transform of 12-entry pitch-class vectors, with
//! magnitude, power and phase per coefficient. Optional Python bindings.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![allow(non_local_definitions)]

pub mod pitch_class;
pub mod spectrum;
#[cfg(feature = "python")]
pub mod python_bindings;

pub use pitch_class::{CharacteristicFunction, InvalidInputError};
pub use spectrum::{compute_dft, derive_spectral_bins, SpectralAnalyzer, SpectralBin};
