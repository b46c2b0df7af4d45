//! Taper windows applied to ideal (sinc) impulse responses.
//!
//! Every window is evaluated on the offset from the centre of the window,
//! `t = n - (len - 1) / 2`, so mirrored indices get bit-identical weights.
//! An odd-length windowed sinc is therefore exactly symmetric.
//!
//! | Window | Highest sidelobe |
//! |--------|------------------|
//! | Rectangular | -13 dB |
//! | Triangular | -27 dB |
//! | Hann | -31 dB |
//! | Hamming | -43 dB |
//! | Blackman | -58 dB |
//! | Blackman-Harris | -92 dB |
//! | Kaiser | set by beta |

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::math::bessel_i0;

/// Window shapes available to the window and Kaiser design methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum WindowType {
    Rectangular,
    Triangular,
    Welch,
    Sine,
    Hann,
    Hamming,
    Blackman,
    Nuttall,
    BlackmanNuttall,
    BlackmanHarris,
    FlatTop,
    /// Parametric window; needs a beta derived from the stopband attenuation.
    Kaiser,
}

impl WindowType {
    pub const ALL: [WindowType; 12] = [
        WindowType::Rectangular,
        WindowType::Triangular,
        WindowType::Welch,
        WindowType::Sine,
        WindowType::Hann,
        WindowType::Hamming,
        WindowType::Blackman,
        WindowType::Nuttall,
        WindowType::BlackmanNuttall,
        WindowType::BlackmanHarris,
        WindowType::FlatTop,
        WindowType::Kaiser,
    ];

    /// Cosine-sum coefficients `a0..a4` for the generalised cosine windows.
    ///
    /// Expressed for the centred form `a0 + a1 cos(2πx) + a2 cos(4πx) + ...`.
    fn cosine_terms(self) -> Option<&'static [f64]> {
        match self {
            WindowType::Hann => Some(&[0.5, 0.5]),
            WindowType::Hamming => Some(&[25.0 / 46.0, 21.0 / 46.0]),
            WindowType::Blackman => Some(&[0.42, 0.5, 0.08]),
            WindowType::Nuttall => Some(&[0.355768, 0.487396, 0.144232, 0.012604]),
            WindowType::BlackmanNuttall => Some(&[0.3635819, 0.4891775, 0.1365995, 0.0106411]),
            WindowType::BlackmanHarris => Some(&[0.35875, 0.48829, 0.14128, 0.01168]),
            WindowType::FlatTop => Some(&[
                0.21557895,
                0.41663158,
                0.277263158,
                0.083578947,
                0.006947368,
            ]),
            _ => None,
        }
    }
}

/// Window weight at index `n` of a `len`-point window
///
/// `beta` is only read for [`WindowType::Kaiser`].
///
/// # Panics
/// Panics if `n >= len`, or if the window is Kaiser and `beta < 0`.
pub fn weight(n: usize, len: usize, window: WindowType, beta: f64) -> f64 {
    assert!(n < len, "window index {n} out of range for length {len}");

    if window == WindowType::Kaiser {
        return kaiser(n, len, beta);
    }
    if len == 1 {
        return 1.0;
    }

    let t = n as f64 - (len - 1) as f64 / 2.0;
    let half = len as f64 / 2.0;
    // Fraction of the full span, in [-0.5, 0.5]
    let x = t / (len - 1) as f64;

    match window {
        WindowType::Rectangular => 1.0,
        WindowType::Triangular => 1.0 - (t / half).abs(),
        WindowType::Welch => 1.0 - (t / half).powi(2),
        WindowType::Sine => (PI * x).cos(),
        other => other
            .cosine_terms()
            .map(|terms| {
                terms
                    .iter()
                    .enumerate()
                    .map(|(k, a)| a * (2.0 * PI * k as f64 * x).cos())
                    .sum()
            })
            .unwrap_or(1.0),
    }
}

/// Kaiser window weight
///
/// `I0(beta * sqrt(1 - r^2)) / I0(beta)` with `r = 2 (n - (len-1)/2) / len`.
///
/// # Panics
/// Panics if `beta < 0`; beta is always derived from an attenuation, so a
/// negative value is a programming error.
pub fn kaiser(n: usize, len: usize, beta: f64) -> f64 {
    assert!(beta >= 0.0, "kaiser beta must be >= 0 (got {beta})");

    let t = n as f64 - (len - 1) as f64 / 2.0;
    let r = 2.0 * t / len as f64;
    bessel_i0(beta * (1.0 - r * r).sqrt()) / bessel_i0(beta)
}

/// Fill a whole window into a freshly allocated vector
pub fn generate(len: usize, window: WindowType, beta: f64) -> Vec<f64> {
    (0..len).map(|n| weight(n, len, window, beta)).collect()
}
