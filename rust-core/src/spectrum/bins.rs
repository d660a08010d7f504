//! Per-bin spectral quantities derived from DFT coefficients

use std::f64::consts::PI;

use super::dft::{ComplexCoefficient, DEFAULT_EPSILON};

/// Magnitude, power and phase of one DFT bin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectralBin {
    /// Position of the coefficient in the DFT output
    pub index: usize,

    /// |X[k]|
    pub magnitude: f64,

    /// |X[k]|²
    pub magnitude_squared: f64,

    /// Phase in [0, 2π)
    pub angle_radians: f64,

    /// Phase in [0, 360)
    pub angle_degrees: f64,

    pub real_part: f64,

    pub imaginary_part: f64,
}

impl SpectralBin {
    /// Derive the bin at position `index` from its coefficient
    pub fn from_coefficient(index: usize, coefficient: ComplexCoefficient) -> Self {
        Self::with_epsilon(index, coefficient, DEFAULT_EPSILON)
    }

    /// Same as `from_coefficient` with a custom angle snap threshold
    pub fn with_epsilon(index: usize, coefficient: ComplexCoefficient, epsilon: f64) -> Self {
        let magnitude_squared = coefficient.norm_sqr();
        let mut angle_radians = normalize_angle(coefficient.arg(), epsilon);
        let mut angle_degrees = angle_radians.to_degrees();

        // Just under 2π can still scale to 360° exactly
        if angle_degrees >= 360.0 {
            angle_radians = 0.0;
            angle_degrees = 0.0;
        }

        Self {
            index,
            magnitude: magnitude_squared.sqrt(),
            magnitude_squared,
            angle_radians,
            angle_degrees,
            real_part: coefficient.re,
            imaginary_part: coefficient.im,
        }
    }

    /// The coefficient this bin was derived from
    pub fn coefficient(&self) -> ComplexCoefficient {
        ComplexCoefficient::new(self.real_part, self.imaginary_part)
    }
}

/// Map an `atan2` result from (-π, π] into [0, 2π)
///
/// Angles within `epsilon` of zero become exactly 0 so that noise around
/// the positive real axis does not wrap to just under 2π. A wrapped angle
/// that rounds up to 2π is reported as 0, whatever `epsilon` is.
pub fn normalize_angle(angle: f64, epsilon: f64) -> f64 {
    if angle.abs() < epsilon {
        return 0.0;
    }
    if angle >= 0.0 {
        return angle;
    }

    let wrapped = angle + 2.0 * PI;
    if wrapped >= 2.0 * PI {
        0.0
    } else {
        wrapped
    }
}

/// Derive one `SpectralBin` per coefficient, indexed by position
pub fn derive_spectral_bins(coefficients: &[ComplexCoefficient]) -> Vec<SpectralBin> {
    coefficients
        .iter()
        .enumerate()
        .map(|(index, &c)| SpectralBin::from_coefficient(index, c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bins_keep_position_for_equal_coefficients() {
        let coeffs = vec![ComplexCoefficient::new(0.0, 0.0); 8];
        let bins = derive_spectral_bins(&coeffs);

        assert_eq!(bins.len(), 8);
        for (i, bin) in bins.iter().enumerate() {
            assert_eq!(bin.index, i);
            assert_eq!(bin.magnitude, 0.0);
            assert_eq!(bin.angle_radians, 0.0);
            assert_eq!(bin.angle_degrees, 0.0);
        }
    }

    #[test]
    fn test_angle_normalization() {
        let cases = [
            (ComplexCoefficient::new(1.0, 0.0), 0.0),
            (ComplexCoefficient::new(0.0, 1.0), PI / 2.0),
            (ComplexCoefficient::new(-1.0, 0.0), PI),
            (ComplexCoefficient::new(0.0, -1.0), 1.5 * PI),
            (ComplexCoefficient::new(1.0, -1.0), 1.75 * PI),
            (ComplexCoefficient::new(-1.0, -0.0), PI),
        ];

        for (c, expected) in cases {
            let bin = SpectralBin::from_coefficient(0, c);
            assert!((bin.angle_radians - expected).abs() < 1e-12, "{c}: {}", bin.angle_radians);
            assert!(bin.angle_radians >= 0.0 && bin.angle_radians < 2.0 * PI);
            assert!(bin.angle_degrees >= 0.0 && bin.angle_degrees < 360.0);
        }

        let bin = SpectralBin::from_coefficient(0, ComplexCoefficient::new(0.0, -1.0));
        assert!((bin.angle_degrees - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_angle_noise_snaps_to_zero() {
        // atan2 would give about -1e-9, which must not wrap to ~2π
        let bin = SpectralBin::from_coefficient(0, ComplexCoefficient::new(1.0, -1e-9));
        assert_eq!(bin.angle_radians, 0.0);
        assert_eq!(bin.angle_degrees, 0.0);
    }

    #[test]
    fn test_angle_stays_below_full_turn_without_snap() {
        // -1e-20 + 2π rounds to exactly 2π in f64
        for epsilon in [0.0, -1.0, f64::NAN] {
            let bin = SpectralBin::with_epsilon(0, ComplexCoefficient::new(1.0, -1e-20), epsilon);
            assert_eq!(bin.angle_radians, 0.0);
            assert_eq!(bin.angle_degrees, 0.0);
        }

        // A small negative angle still wraps to just under 2π
        let bin = SpectralBin::with_epsilon(0, ComplexCoefficient::new(1.0, -1e-9), 0.0);
        assert!(bin.angle_radians > 0.0 && bin.angle_radians < 2.0 * PI);
        assert!(bin.angle_degrees < 360.0);

        assert_eq!(normalize_angle(-1e-20, 0.0), 0.0);
        assert!(normalize_angle(-1e-3, 0.0) < 2.0 * PI);
    }

    #[test]
    fn test_magnitude_consistency() {
        let coeffs = [
            ComplexCoefficient::new(3.0, 4.0),
            ComplexCoefficient::new(-1.5, 0.25),
            ComplexCoefficient::new(0.0, -2.0),
        ];

        for bin in derive_spectral_bins(&coeffs) {
            assert!(bin.magnitude >= 0.0);
            assert!((bin.magnitude * bin.magnitude - bin.magnitude_squared).abs() < 1e-9);
            let expected = (bin.real_part.powi(2) + bin.imaginary_part.powi(2)).sqrt();
            assert!((bin.magnitude - expected).abs() < 1e-12);
        }

        let bin = SpectralBin::from_coefficient(2, coeffs[0]);
        assert_eq!(bin.magnitude, 5.0);
        assert_eq!(bin.magnitude_squared, 25.0);
        assert_eq!(bin.coefficient(), coeffs[0]);
    }
}
