//! Spectral analysis of characteristic functions with a direct DFT

pub mod dft;
pub mod bins;
pub mod analysis;
pub mod report;

pub use dft::{ComplexCoefficient, DftEngine};
pub use bins::{derive_spectral_bins, SpectralBin};
pub use analysis::{compute_dft, AnalyzerConfig, SpectralAnalyzer};
pub use report::{to_precision, SpectralReport};
