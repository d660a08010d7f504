//! Python bindings for spectral analysis

use pyo3::prelude::*;
use numpy::{IntoPyArray, PyArray2, PyReadonlyArray1, PyReadonlyArray2};

use super::invalid_input;
use crate::pitch_class::CharacteristicFunction;
use crate::spectrum::{AnalyzerConfig, ComplexCoefficient, SpectralAnalyzer, SpectralBin, SpectralReport};

/// Spectral bin exposed to Python
#[pyclass(name = "SpectralBin")]
#[derive(Clone)]
pub struct PySpectralBin {
    #[pyo3(get)]
    index: usize,
    #[pyo3(get)]
    magnitude: f64,
    #[pyo3(get)]
    magnitude_squared: f64,
    #[pyo3(get)]
    angle_radians: f64,
    #[pyo3(get)]
    angle_degrees: f64,
    #[pyo3(get)]
    real_part: f64,
    #[pyo3(get)]
    imaginary_part: f64,
}

impl From<SpectralBin> for PySpectralBin {
    fn from(bin: SpectralBin) -> Self {
        Self {
            index: bin.index,
            magnitude: bin.magnitude,
            magnitude_squared: bin.magnitude_squared,
            angle_radians: bin.angle_radians,
            angle_degrees: bin.angle_degrees,
            real_part: bin.real_part,
            imaginary_part: bin.imaginary_part,
        }
    }
}

#[pymethods]
impl PySpectralBin {
    fn __repr__(&self) -> String {
        format!(
            "SpectralBin(index={}, magnitude={}, angle_degrees={}, real_part={}, imaginary_part={})",
            self.index, self.magnitude, self.angle_degrees, self.real_part, self.imaginary_part
        )
    }
}

/// Spectral analyzer exposed to Python
#[pyclass(name = "SpectralAnalyzer")]
pub struct PySpectralAnalyzer {
    analyzer: SpectralAnalyzer,
}

impl PySpectralAnalyzer {
    fn bins_to_py(bins: Vec<SpectralBin>) -> Vec<PySpectralBin> {
        bins.into_iter().map(PySpectralBin::from).collect()
    }
}

#[pymethods]
impl PySpectralAnalyzer {
    /// Create a new spectral analyzer
    ///
    /// Args:
    ///     size: Input vector length (12 pitch classes)
    ///     retained_bins: Number of leading DFT bins to report
    ///     epsilon: Components below this are reported as exactly 0
    #[new]
    #[pyo3(signature = (size=12, retained_bins=8, epsilon=1e-7))]
    fn new(size: usize, retained_bins: usize, epsilon: f64) -> Self {
        let config = AnalyzerConfig {
            size,
            retained_bins,
            epsilon,
        };

        Self {
            analyzer: SpectralAnalyzer::new(config),
        }
    }

    /// Compute the retained DFT coefficients
    ///
    /// Args:
    ///     values: Characteristic function as numpy array
    ///
    /// Returns:
    ///     List of (real, imaginary) tuples
    ///
    /// Raises:
    ///     ValueError: wrong length or non-finite entry
    fn compute_dft(&self, values: PyReadonlyArray1<f64>) -> PyResult<Vec<(f64, f64)>> {
        let input = values.as_array().to_vec();
        let coefficients = self.analyzer.compute_dft(&input).map_err(invalid_input)?;

        Ok(coefficients.iter().map(|c| (c.re, c.im)).collect())
    }

    /// Derive magnitude, power and phase for (real, imaginary) pairs
    fn derive_spectral_bins(&self, coefficients: Vec<(f64, f64)>) -> Vec<PySpectralBin> {
        let coefficients: Vec<ComplexCoefficient> = coefficients
            .into_iter()
            .map(|(re, im)| ComplexCoefficient::new(re, im))
            .collect();

        Self::bins_to_py(self.analyzer.derive_spectral_bins(&coefficients))
    }

    /// Compute the DFT and derive its spectral bins
    fn analyze(&self, values: PyReadonlyArray1<f64>) -> PyResult<Vec<PySpectralBin>> {
        let input = values.as_array().to_vec();
        let bins = self.analyzer.analyze(&input).map_err(invalid_input)?;

        Ok(Self::bins_to_py(bins))
    }

    /// Parse a comma-separated characteristic function and analyze it
    ///
    /// Args:
    ///     text: e.g. "1, 0, 0, 0, 1, 0, 0, 1, 0, 0, 0, 0"
    fn analyze_text(&self, text: &str) -> PyResult<Vec<PySpectralBin>> {
        let function: CharacteristicFunction = text.parse().map_err(invalid_input)?;
        let bins = self.analyzer.analyze_function(&function).map_err(invalid_input)?;

        Ok(Self::bins_to_py(bins))
    }

    /// Magnitudes for a batch of characteristic functions
    ///
    /// Args:
    ///     values: 2-D numpy array, one characteristic function per row
    ///
    /// Returns:
    ///     rows x retained_bins numpy array
    fn magnitudes_batch<'py>(
        &self,
        py: Python<'py>,
        values: PyReadonlyArray2<f64>,
    ) -> PyResult<&'py PyArray2<f64>> {
        let magnitudes = self
            .analyzer
            .magnitudes_batch(values.as_array())
            .map_err(invalid_input)?;

        Ok(magnitudes.into_pyarray(py))
    }

    /// Render the spectral bins of a characteristic function as a text table
    fn report(&self, values: PyReadonlyArray1<f64>) -> PyResult<String> {
        let input = values.as_array().to_vec();
        let bins = self.analyzer.analyze(&input).map_err(invalid_input)?;

        Ok(SpectralReport::new(&bins).to_string())
    }

    /// Get number of bins per analysis
    fn num_bins(&self) -> usize {
        self.analyzer.num_bins()
    }

    /// Get input vector length
    fn get_size(&self) -> usize {
        self.analyzer.config().size
    }

    /// Get snap threshold
    fn get_epsilon(&self) -> f64 {
        self.analyzer.config().epsilon
    }
}
