//! Linear-phase and frequency-response checks on designed coefficients.
//!
//! These are advisory: the designer logs them but never refuses a vector
//! because of them.

use std::f64::consts::PI;

use num_complex::Complex64;
use serde::Serialize;

/// Linear-phase class of a coefficient vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinearPhase {
    /// `h[i] == h[len-1-i]` (Type I)
    Symmetric,
    /// `h[i] == -h[len-1-i]` (Type III)
    AntiSymmetric,
    None,
}

impl LinearPhase {
    pub fn classify(coeffs: &[f64]) -> Self {
        if is_symmetric(coeffs) {
            LinearPhase::Symmetric
        } else if is_anti_symmetric(coeffs) {
            LinearPhase::AntiSymmetric
        } else {
            LinearPhase::None
        }
    }
}

/// Exact mirror symmetry of an odd-length vector
///
/// Even lengths always report `false`.
pub fn is_symmetric(coeffs: &[f64]) -> bool {
    mirrored_pairs(coeffs).is_some_and(|mut pairs| pairs.all(|(a, b)| a == b))
}

/// Exact mirror anti-symmetry of an odd-length vector
///
/// The centre tap is not inspected. Even lengths always report `false`.
pub fn is_anti_symmetric(coeffs: &[f64]) -> bool {
    mirrored_pairs(coeffs).is_some_and(|mut pairs| pairs.all(|(a, b)| a == -b))
}

/// Mirror symmetry of an odd-length vector within an absolute tolerance
pub fn is_symmetric_within(coeffs: &[f64], tolerance: f64) -> bool {
    mirrored_pairs(coeffs).is_some_and(|mut pairs| pairs.all(|(a, b)| (a - b).abs() <= tolerance))
}

fn mirrored_pairs(coeffs: &[f64]) -> Option<impl Iterator<Item = (f64, f64)> + '_> {
    if coeffs.len().is_multiple_of(2) {
        return None;
    }
    let half = coeffs.len() / 2;
    Some(
        coeffs[..half]
            .iter()
            .zip(coeffs.iter().rev())
            .map(|(&a, &b)| (a, b)),
    )
}

/// Complex gain of the filter at `freq_hz`
pub fn frequency_response(coeffs: &[f64], freq_hz: f64, sample_rate: f64) -> Complex64 {
    let w = 2.0 * PI * freq_hz / sample_rate;
    coeffs
        .iter()
        .enumerate()
        .map(|(n, &h)| Complex64::from_polar(h, -w * n as f64))
        .sum()
}

/// Gain in dB at `freq_hz`, floored at -400 dB for exact zeros
pub fn magnitude_db(coeffs: &[f64], freq_hz: f64, sample_rate: f64) -> f64 {
    let mag = frequency_response(coeffs, freq_hz, sample_rate).norm();
    20.0 * mag.max(1e-20).log10()
}
