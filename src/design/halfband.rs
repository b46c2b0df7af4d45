use pm_remez::{BandSetting, constant, pm_parameters, pm_remez};

use crate::constants::MAX_ORDER;
use crate::error::{FirError, Result};

/// Equiripple half-band lowpass
///
/// Uses the Parks-McClellan (Remez) algorithm with bands mirrored around a
/// quarter of the sample rate, then snaps the result onto the exact half-band
/// structure: centre tap 0.5, every even offset zero, odd offsets mirrored.
///
/// The tap count follows from the transition width (normalised to the
/// sample rate) and the target stopband level, rounded up to `4k + 3` so the
/// outermost taps are non-zero.
///
/// # Errors
/// Returns `FirError::InvalidFilterSpec` if the required length exceeds the
/// supported maximum, and `FirError::FilterDesign` if the exchange fails.
pub fn lowpass(transition_width: f64, attenuation_db: f64) -> Result<Vec<f64>> {
    let num_taps = num_taps(transition_width, attenuation_db);
    if num_taps > MAX_ORDER {
        return Err(FirError::InvalidFilterSpec(format!(
            "half-band design needs {} taps, maximum is {}",
            num_taps, MAX_ORDER
        )));
    }

    let pass_end = 0.25 - transition_width / 2.0;
    let stop_start = 0.25 + transition_width / 2.0;

    let bands = [
        BandSetting::new(0.0, pass_end, constant(1.0))
            .map_err(|e| FirError::FilterDesign(format!("Passband: {:?}", e)))?,
        BandSetting::new(stop_start, 0.5, constant(0.0))
            .map_err(|e| FirError::FilterDesign(format!("Stopband: {:?}", e)))?,
    ];

    let params = pm_parameters(num_taps, &bands)
        .map_err(|e| FirError::FilterDesign(format!("PM parameters: {:?}", e)))?;

    let design =
        pm_remez(&params).map_err(|e| FirError::FilterDesign(format!("PM Remez: {:?}", e)))?;

    Ok(project_half_band(design.impulse_response))
}

/// Tap count estimate, `4k + 3` with `k >= 0`
fn num_taps(transition_width: f64, attenuation_db: f64) -> usize {
    let estimate = ((attenuation_db.abs() - 7.95) / (14.36 * transition_width)).ceil() + 1.0;
    let estimate = estimate.max(3.0) as usize;
    let k = (estimate - 3).div_ceil(4);
    4 * k + 3
}

fn project_half_band(mut taps: Vec<f64>) -> Vec<f64> {
    let centre = taps.len() / 2;
    taps[centre] = 0.5;
    for k in 1..=centre {
        let value = if k % 2 == 0 {
            0.0
        } else {
            0.5 * (taps[centre - k] + taps[centre + k])
        };
        taps[centre - k] = value;
        taps[centre + k] = value;
    }
    taps
}
