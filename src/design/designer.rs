use std::f64::consts::PI;

use super::coefficients::CoefficientVector;
use super::diagnostics::{is_anti_symmetric, is_symmetric};
use super::math::{kaiser_beta, kaiser_order};
use super::spec::{DesignMethod, FilterSpec, FilterType};
use super::window::{self, WindowType};
use super::{halfband, least_squares};
use crate::constants::{CUSTOM_TAPS, MAX_ORDER};
use crate::error::{FirError, Result};

/// Design the coefficient vector described by `spec`
///
/// Pure apart from a debug log of the symmetry diagnostics. Runs at control
/// rate and may allocate.
///
/// # Errors
/// Returns `FirError::InvalidFilterSpec` if the spec fails validation, and
/// `FirError::FilterDesign` if a numeric back-end fails on a valid spec.
pub fn design(spec: &FilterSpec) -> Result<CoefficientVector> {
    spec.validate()?;

    let taps = match spec.method {
        DesignMethod::Window => {
            let beta = window_beta(spec.window_type, spec.stopband_attenuation_db);
            windowed_sinc(spec, spec.order, spec.window_type, beta)
        }
        DesignMethod::Kaiser { transition_width } => {
            let beta = kaiser_beta(spec.stopband_attenuation_db);
            let num_taps = kaiser_num_taps(spec.stopband_attenuation_db, transition_width)?;
            windowed_sinc(spec, num_taps, WindowType::Kaiser, beta)
        }
        DesignMethod::Transition {
            transition_width,
            spline,
        } => compose(spec, |cutoff| {
            Ok(transition_lowpass(spec.order, cutoff, transition_width, spline))
        })?,
        DesignMethod::LeastSquares {
            transition_width,
            stopband_weight,
        } => compose(spec, |cutoff| {
            least_squares::lowpass(spec.order, cutoff, transition_width, stopband_weight)
        })?,
        DesignMethod::HalfBandEquiripple { transition_width } => {
            halfband::lowpass(transition_width, spec.stopband_attenuation_db)?
        }
        DesignMethod::Custom => CUSTOM_TAPS.to_vec(),
    };

    log::debug!(
        "Designed {} taps ({:?}, {:?}): symmetric={} anti-symmetric={}",
        taps.len(),
        spec.method,
        spec.filter_type,
        is_symmetric(&taps),
        is_anti_symmetric(&taps)
    );

    Ok(CoefficientVector::new(taps))
}

/// Beta used when the window method is asked for a Kaiser window
fn window_beta(window_type: WindowType, attenuation_db: f64) -> f64 {
    match window_type {
        WindowType::Kaiser => kaiser_beta(attenuation_db),
        _ => 0.0,
    }
}

/// Odd tap count from Kaiser's order estimate, at most `MAX_ORDER`
fn kaiser_num_taps(attenuation_db: f64, transition_width: f64) -> Result<usize> {
    let order = kaiser_order(attenuation_db, transition_width).round().max(0.0);
    let too_long = |taps: f64| {
        FirError::InvalidFilterSpec(format!(
            "Kaiser estimate of {} taps exceeds the maximum of {}",
            taps, MAX_ORDER
        ))
    };
    if order >= MAX_ORDER as f64 {
        return Err(too_long(order + 1.0));
    }
    let num_taps = order as usize + 1;
    let num_taps = if num_taps.is_multiple_of(2) {
        num_taps + 1
    } else {
        num_taps
    };
    if num_taps > MAX_ORDER {
        return Err(too_long(num_taps as f64));
    }
    Ok(num_taps)
}

/// Offset of tap `n` from the centre tap `len / 2`
fn offset(n: usize, len: usize) -> f64 {
    n as f64 - (len / 2) as f64
}

/// Ideal (unwindowed) impulse response tap for any filter type
///
/// Cutoffs are normalised to the sample rate. The spectral-inversion term
/// `sin(pi m)` vanishes at every integer offset, leaving only the centre
/// impulse.
fn ideal_tap(filter_type: FilterType, m: f64, f1: f64, f2: f64) -> f64 {
    if m == 0.0 {
        return match filter_type {
            FilterType::LowPass => 2.0 * f1,
            FilterType::HighPass => 1.0 - 2.0 * f1,
            FilterType::BandPass => 2.0 * (f2 - f1),
            FilterType::BandStop => 1.0 - 2.0 * (f2 - f1),
        };
    }

    let sin_at = |f: f64| (2.0 * PI * f * m).sin();
    let denom = PI * m;
    match filter_type {
        FilterType::LowPass => sin_at(f1) / denom,
        FilterType::HighPass => -sin_at(f1) / denom,
        FilterType::BandPass => (sin_at(f2) - sin_at(f1)) / denom,
        FilterType::BandStop => (sin_at(f1) - sin_at(f2)) / denom,
    }
}

/// Ideal response of `spec.filter_type` multiplied by a window taper
fn windowed_sinc(spec: &FilterSpec, num_taps: usize, window_type: WindowType, beta: f64) -> Vec<f64> {
    let f1 = spec.normalized_low();
    let f2 = spec.normalized_high();

    (0..num_taps)
        .map(|n| {
            let ideal = ideal_tap(spec.filter_type, offset(n, num_taps), f1, f2);
            ideal * window::weight(n, num_taps, window_type, beta)
        })
        .collect()
}

/// Lowpass with a spline-shaped transition band instead of a window
///
/// The sinc is multiplied by `sinc(tw m / p)^p`, which widens the cutoff
/// edge into a transition of `tw` with smoothness `p`. `spline` is rounded to
/// the nearest whole order.
fn transition_lowpass(num_taps: usize, cutoff: f64, transition_width: f64, spline: f64) -> Vec<f64> {
    let p = spline.round().max(1.0);

    (0..num_taps)
        .map(|n| {
            let m = offset(n, num_taps);
            if m == 0.0 {
                return 2.0 * cutoff;
            }
            let sinc = (2.0 * PI * cutoff * m).sin() / (PI * m);
            let x = PI * transition_width * m / p;
            sinc * (x.sin() / x).powi(p as i32)
        })
        .collect()
}

/// Build any filter type out of a lowpass prototype designer
///
/// Highpass and bandstop subtract from a unit impulse at the centre tap and so
/// need an odd length.
fn compose<F>(spec: &FilterSpec, lowpass: F) -> Result<Vec<f64>>
where
    F: Fn(f64) -> Result<Vec<f64>>,
{
    let len = spec.order;
    if spec.filter_type.needs_centre_tap() && len.is_multiple_of(2) {
        return Err(FirError::InvalidFilterSpec(format!(
            "{:?} needs an odd number of taps, got {}",
            spec.filter_type, len
        )));
    }

    let f1 = spec.normalized_low();
    let f2 = spec.normalized_high();

    let mut taps = match spec.filter_type {
        FilterType::LowPass => return lowpass(f1),
        FilterType::HighPass => lowpass(f1)?.into_iter().map(|h| -h).collect(),
        FilterType::BandPass | FilterType::BandStop => {
            let upper = lowpass(f2)?;
            let lower = lowpass(f1)?;
            let band: Vec<f64> = upper.iter().zip(&lower).map(|(u, l)| u - l).collect();
            if spec.filter_type == FilterType::BandPass {
                return Ok(band);
            }
            band.into_iter().map(|h| -h).collect::<Vec<_>>()
        }
    };
    taps[len / 2] += 1.0;
    Ok(taps)
}
