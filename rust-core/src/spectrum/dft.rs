//! Direct-summation DFT engine
//!
//! The transform length is tiny (12 for pitch-class vectors), so the
//! O(N²) sum over a precomputed twiddle table beats planning an FFT.

use num_complex::Complex64;
use std::f64::consts::PI;

use crate::pitch_class::characteristic::{validate, InvalidInputError};

/// One DFT output bin as a (real, imaginary) pair
pub type ComplexCoefficient = Complex64;

/// Components with absolute value below this are reported as exactly zero
pub const DEFAULT_EPSILON: f64 = 1e-7;

/// DFT engine for short real-valued vectors
///
/// Computes `X[k] = Σ x[j]·cos(2πkj/N) + i·Σ x[j]·sin(2πkj/N)`,
/// i.e. the positive-exponent convention used in pitch-class set theory.
#[derive(Debug, Clone)]
pub struct DftEngine {
    /// Transform length N
    size: usize,

    /// Bins kept in the output (k = 0..retained_bins)
    retained_bins: usize,

    /// Snap threshold for real and imaginary parts
    epsilon: f64,

    /// cos(2πm/N) for m = 0..N
    cos_table: Vec<f64>,

    /// sin(2πm/N) for m = 0..N
    sin_table: Vec<f64>,
}

impl DftEngine {
    /// Create new DFT engine
    ///
    /// # Arguments
    /// * `size` - Transform length N
    /// * `retained_bins` - Number of leading bins to return (clamped to N)
    /// * `epsilon` - Components with |x| < epsilon are snapped to 0
    pub fn new(size: usize, retained_bins: usize, epsilon: f64) -> Self {
        let (cos_table, sin_table): (Vec<f64>, Vec<f64>) = (0..size)
            .map(|m| {
                let angle = 2.0 * PI * m as f64 / size as f64;
                (angle.cos(), angle.sin())
            })
            .unzip();

        Self {
            size,
            retained_bins: retained_bins.min(size),
            epsilon,
            cos_table,
            sin_table,
        }
    }

    /// Compute the retained DFT bins of `input`
    ///
    /// # Returns
    /// `retained_bins` coefficients in ascending k, each component snapped
    /// to zero when below epsilon
    ///
    /// # Errors
    /// `InvalidInputError` if `input.len() != size` or an entry is not finite
    pub fn compute(&self, input: &[f64]) -> Result<Vec<ComplexCoefficient>, InvalidInputError> {
        validate(input, self.size)?;

        let coefficients = (0..self.retained_bins)
            .map(|k| {
                let (mut re, mut im) = (0.0, 0.0);
                for (j, &x) in input.iter().enumerate() {
                    // cos/sin are periodic in N, reduce before lookup
                    let m = (k * j) % self.size;
                    re += x * self.cos_table[m];
                    im += x * self.sin_table[m];
                }
                ComplexCoefficient::new(self.snap(re), self.snap(im))
            })
            .collect();

        Ok(coefficients)
    }

    fn snap(&self, value: f64) -> f64 {
        if value.abs() < self.epsilon {
            0.0
        } else {
            value
        }
    }

    /// Get transform length
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get number of bins returned by `compute`
    pub fn num_bins(&self) -> usize {
        self.retained_bins
    }

    /// Get snap threshold
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustfft::FftPlanner;

    fn chromatic() -> DftEngine {
        DftEngine::new(12, 8, DEFAULT_EPSILON)
    }

    #[test]
    fn test_dft_zero_vector() {
        let coeffs = chromatic().compute(&[0.0; 12]).unwrap();

        assert_eq!(coeffs.len(), 8);
        assert!(coeffs.iter().all(|c| c.re == 0.0 && c.im == 0.0));
    }

    #[test]
    fn test_dft_dc_signal() {
        for &c in &[1.0, 0.25, -3.0, 7.5] {
            let coeffs = chromatic().compute(&[c; 12]).unwrap();

            assert!((coeffs[0].re - 12.0 * c).abs() < 1e-12);
            assert_eq!(coeffs[0].im, 0.0);

            // Orthogonality: everything else cancels and snaps to exact zero
            for coeff in &coeffs[1..] {
                assert_eq!(coeff.re, 0.0);
                assert_eq!(coeff.im, 0.0);
            }
        }
    }

    #[test]
    fn test_dft_impulse() {
        let mut input = [0.0; 12];
        input[0] = 1.0;

        let coeffs = chromatic().compute(&input).unwrap();

        for coeff in &coeffs {
            assert_eq!(coeff.re, 1.0);
            assert_eq!(coeff.im, 0.0);
        }
    }

    #[test]
    fn test_dft_shifted_impulse_phase() {
        // x[1] = 1 gives X[k] = e^{+i·2πk/12}
        let mut input = [0.0; 12];
        input[1] = 1.0;

        let coeffs = chromatic().compute(&input).unwrap();

        for (k, coeff) in coeffs.iter().enumerate() {
            let angle = 2.0 * PI * k as f64 / 12.0;
            assert!((coeff.re - angle.cos()).abs() < 1e-12);
            assert!((coeff.im - angle.sin()).abs() < 1e-12);
        }

        // Bin 3 is exactly i, bin 6 exactly -1 once snapped
        assert_eq!(coeffs[3].re, 0.0);
        assert_eq!(coeffs[6].im, 0.0);
    }

    #[test]
    fn test_dft_epsilon_snap() {
        let engine = chromatic();

        let mut input = [0.0; 12];
        input[0] = 5e-8;
        let coeffs = engine.compute(&input).unwrap();
        assert!(coeffs.iter().all(|c| c.re == 0.0 && c.im == 0.0));

        input[0] = 2e-7;
        let coeffs = engine.compute(&input).unwrap();
        assert!(coeffs.iter().all(|c| c.re == 2e-7));
    }

    #[test]
    fn test_dft_rejects_invalid_input() {
        let engine = chromatic();

        assert!(matches!(
            engine.compute(&[0.0; 11]),
            Err(InvalidInputError::WrongLength { expected: 12, found: 11 })
        ));
        assert!(matches!(
            engine.compute(&[0.0; 13]),
            Err(InvalidInputError::WrongLength { expected: 12, found: 13 })
        ));

        let mut input = [1.0; 12];
        input[9] = f64::NAN;
        assert!(matches!(
            engine.compute(&input),
            Err(InvalidInputError::NonFinite { index: 9, .. })
        ));

        input[9] = f64::NEG_INFINITY;
        assert!(engine.compute(&input).is_err());
    }

    #[test]
    fn test_dft_matches_fft_conjugate() {
        let input = [0.3, 1.0, -0.7, 0.0, 2.5, 0.1, 0.0, 1.0, -1.2, 0.4, 0.0, 0.9];
        let coeffs = chromatic().compute(&input).unwrap();

        // rustfft uses e^{-i...}, so the reference is the conjugate
        let mut buffer: Vec<Complex64> = input.iter().map(|&x| Complex64::new(x, 0.0)).collect();
        FftPlanner::<f64>::new().plan_fft_forward(12).process(&mut buffer);

        for (ours, reference) in coeffs.iter().zip(buffer.iter()) {
            assert!((ours - reference.conj()).norm() < 1e-9);
        }
    }

    #[test]
    fn test_generalized_size() {
        let engine = DftEngine::new(7, 20, DEFAULT_EPSILON);
        assert_eq!(engine.num_bins(), 7);

        let coeffs = engine.compute(&[1.0; 7]).unwrap();
        assert_eq!(coeffs.len(), 7);
        assert!((coeffs[0].re - 7.0).abs() < 1e-12);
        assert!(coeffs[1..].iter().all(|c| c.re == 0.0 && c.im == 0.0));
    }
}
