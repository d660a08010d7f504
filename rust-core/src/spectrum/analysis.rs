//! High-level spectral analyzer
//!
//! Combines the DFT engine with bin derivation for characteristic functions

use log::{debug, trace, warn};
use ndarray::{Array2, ArrayView2};

use super::bins::SpectralBin;
use super::dft::{ComplexCoefficient, DftEngine, DEFAULT_EPSILON};
use crate::pitch_class::{CharacteristicFunction, InvalidInputError, PITCH_CLASSES};

/// Number of DFT bins reported for a 12-point characteristic function
pub const CHROMATIC_BINS: usize = 8;

/// Spectral analyzer configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerConfig {
    /// Transform length N (input vector length)
    pub size: usize,

    /// Number of leading bins to report (clamped to `size`)
    pub retained_bins: usize,

    /// Snap threshold for coefficient components and phase angles
    pub epsilon: f64,
}

impl AnalyzerConfig {
    /// 12 pitch classes, bins 0..=7
    pub fn chromatic() -> Self {
        Self {
            size: PITCH_CLASSES,
            retained_bins: CHROMATIC_BINS,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self::chromatic()
    }
}

/// Spectral analyzer for characteristic functions
///
/// Holds no per-call state; every method takes `&self`.
#[derive(Debug, Clone)]
pub struct SpectralAnalyzer {
    config: AnalyzerConfig,
    engine: DftEngine,
}

impl SpectralAnalyzer {
    /// Create new spectral analyzer
    ///
    /// A negative or non-finite `epsilon` disables snapping (stored as 0).
    pub fn new(mut config: AnalyzerConfig) -> Self {
        if !(config.epsilon.is_finite() && config.epsilon >= 0.0) {
            warn!("epsilon {} is not a finite non-negative value, using 0", config.epsilon);
            config.epsilon = 0.0;
        }

        if config.retained_bins > config.size {
            warn!(
                "retained_bins {} exceeds transform size {}, clamping",
                config.retained_bins, config.size
            );
        }

        let engine = DftEngine::new(config.size, config.retained_bins, config.epsilon);
        debug!(
            "spectral analyzer ready: size={}, bins={}, epsilon={:e}",
            engine.size(),
            engine.num_bins(),
            engine.epsilon()
        );

        Self { config, engine }
    }

    /// Compute the retained DFT coefficients of `input`
    ///
    /// # Errors
    /// `InvalidInputError` on a wrong length or a non-finite entry
    pub fn compute_dft(&self, input: &[f64]) -> Result<Vec<ComplexCoefficient>, InvalidInputError> {
        self.engine.compute(input).map_err(|e| {
            debug!("rejected input: {}", e);
            e
        })
    }

    /// Derive magnitude, power and phase for each coefficient
    ///
    /// Bin indices are the coefficients' positions in `coefficients`.
    pub fn derive_spectral_bins(&self, coefficients: &[ComplexCoefficient]) -> Vec<SpectralBin> {
        coefficients
            .iter()
            .enumerate()
            .map(|(index, &c)| SpectralBin::with_epsilon(index, c, self.config.epsilon))
            .collect()
    }

    /// Compute the DFT of `input` and derive its spectral bins
    pub fn analyze(&self, input: &[f64]) -> Result<Vec<SpectralBin>, InvalidInputError> {
        let coefficients = self.compute_dft(input)?;
        let bins = self.derive_spectral_bins(&coefficients);

        trace!("analyzed {} samples into {} bins", input.len(), bins.len());

        Ok(bins)
    }

    /// Analyze an already validated characteristic function
    ///
    /// # Errors
    /// `InvalidInputError::WrongLength` if the analyzer is not configured for
    /// 12 pitch classes
    pub fn analyze_function(
        &self,
        function: &CharacteristicFunction,
    ) -> Result<Vec<SpectralBin>, InvalidInputError> {
        self.analyze(function.as_slice())
    }

    /// Magnitudes for many input vectors at once
    ///
    /// # Arguments
    /// * `inputs` - One input vector per row, `size` columns
    ///
    /// # Returns
    /// `rows × num_bins` matrix of |X[k]|
    pub fn magnitudes_batch(&self, inputs: ArrayView2<f64>) -> Result<Array2<f64>, InvalidInputError> {
        self.batch(inputs, |bin| bin.magnitude)
    }

    /// Squared magnitudes for many input vectors at once
    pub fn power_batch(&self, inputs: ArrayView2<f64>) -> Result<Array2<f64>, InvalidInputError> {
        self.batch(inputs, |bin| bin.magnitude_squared)
    }

    fn batch<F>(&self, inputs: ArrayView2<f64>, quantity: F) -> Result<Array2<f64>, InvalidInputError>
    where
        F: Fn(&SpectralBin) -> f64,
    {
        if inputs.ncols() != self.config.size {
            return Err(InvalidInputError::WrongLength {
                expected: self.config.size,
                found: inputs.ncols(),
            });
        }

        let mut output = Array2::zeros((inputs.nrows(), self.num_bins()));

        for (row_idx, (row, mut out)) in inputs.outer_iter().zip(output.outer_iter_mut()).enumerate() {
            // Rows of a non-standard layout are not contiguous
            let samples = row.to_vec();
            let bins = self.analyze(&samples).map_err(|e| {
                debug!("batch row {} rejected", row_idx);
                e
            })?;

            for (slot, bin) in out.iter_mut().zip(bins.iter()) {
                *slot = quantity(bin);
            }
        }

        Ok(output)
    }

    /// Update configuration
    pub fn update_config(&mut self, config: AnalyzerConfig) {
        if config != self.config {
            *self = Self::new(config);
        }
    }

    /// Get current configuration
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Get number of bins per analysis
    pub fn num_bins(&self) -> usize {
        self.engine.num_bins()
    }
}

impl Default for SpectralAnalyzer {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}

/// Compute the 8 retained DFT bins of a 12-entry characteristic function
pub fn compute_dft(input: &[f64]) -> Result<Vec<ComplexCoefficient>, InvalidInputError> {
    SpectralAnalyzer::default().compute_dft(input)
}
