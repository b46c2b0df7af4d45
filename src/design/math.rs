//! Special functions behind the Kaiser window.

use std::f64::consts::PI;

use crate::constants::{BESSEL_I0_TERMS, LN_GAMMA_ASYMPTOTIC_MIN};

/// Natural log of the gamma function for `z > 0`
///
/// Arguments below [`LN_GAMMA_ASYMPTOTIC_MIN`] are shifted upward with
/// `ln Γ(z) = ln Γ(z + 1) - ln z` (at most ten steps) before a Stirling-style
/// expansion is evaluated.
pub fn ln_gamma(z: f64) -> f64 {
    assert!(z > 0.0, "ln_gamma undefined for z <= 0 (got {z})");

    let mut z = z;
    let mut shift = 0.0;
    while z < LN_GAMMA_ASYMPTOTIC_MIN {
        shift -= z.ln();
        z += 1.0;
    }

    let g = 0.5 * ((2.0 * PI).ln() - z.ln()) + z * ((z + 1.0 / (12.0 * z - 0.1 / z)).ln() - 1.0);
    shift + g
}

/// Zeroth-order modified Bessel function of the first kind
///
/// Power series evaluated in the log domain, so `(k!)^2` never overflows.
pub fn bessel_i0(z: f64) -> f64 {
    if z == 0.0 {
        return 1.0;
    }

    let log_half_z = (0.5 * z.abs()).ln();
    (0..BESSEL_I0_TERMS)
        .map(|k| {
            let k = k as f64;
            let t = k * log_half_z - ln_gamma(k + 1.0);
            (2.0 * t).exp()
        })
        .sum()
}

/// Kaiser shape parameter for a target stopband attenuation in dB
///
/// The sign of `attenuation_db` is ignored, so -60 and 60 give the same beta.
pub fn kaiser_beta(attenuation_db: f64) -> f64 {
    let a = attenuation_db.abs();
    if a > 50.0 {
        0.1102 * (a - 8.7)
    } else if a > 21.0 {
        0.5842 * (a - 21.0).powf(0.4) + 0.07886 * (a - 21.0)
    } else {
        0.0
    }
}

/// Kaiser's empirical filter order for a given attenuation and transition width
///
/// `transition_width` is normalised to the sample rate (cycles per sample).
/// The result is not rounded and may be negative for very mild attenuations.
pub fn kaiser_order(attenuation_db: f64, transition_width: f64) -> f64 {
    (attenuation_db.abs() - 7.95) / (2.285 * 2.0 * PI * transition_width)
}
