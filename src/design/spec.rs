use serde::{Deserialize, Serialize};

use super::window::WindowType;
use crate::constants::{MAX_ORDER, MIN_ORDER};
use crate::error::{FirError, Result};

/// Frequency response shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FilterType {
    LowPass,
    HighPass,
    BandPass,
    BandStop,
}

impl FilterType {
    /// Whether the design uses both cutoff frequencies
    pub fn is_band(self) -> bool {
        matches!(self, FilterType::BandPass | FilterType::BandStop)
    }

    /// Whether the response needs a centre impulse (spectral inversion)
    pub fn needs_centre_tap(self) -> bool {
        matches!(self, FilterType::HighPass | FilterType::BandStop)
    }
}

/// How coefficients are derived, with the controls each method reads
///
/// Transition widths are normalised to the sample rate (cycles per sample).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "kebab-case")]
pub enum DesignMethod {
    /// Windowed sinc with an explicit order and window shape.
    Window,
    /// Kaiser window; order and beta both derived from the transition width
    /// and the stopband attenuation.
    Kaiser { transition_width: f64 },
    /// Sinc shaped by a spline transition band instead of a window.
    Transition { transition_width: f64, spline: f64 },
    /// Weighted least-squares fit of passband and stopband.
    LeastSquares {
        transition_width: f64,
        stopband_weight: f64,
    },
    /// Equiripple half-band lowpass centred on a quarter of the sample rate.
    HalfBandEquiripple { transition_width: f64 },
    /// Fixed literal coefficient vector.
    Custom,
}

/// Immutable description of the filter to design
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub method: DesignMethod,
    pub filter_type: FilterType,
    pub window_type: WindowType,
    /// Coefficient count; ignored by methods that derive their own length.
    pub order: usize,
    pub sample_rate: f64,
    /// First cutoff in Hz (the only one for lowpass / highpass).
    pub cutoff_low: f64,
    /// Second cutoff in Hz, read for band types only.
    pub cutoff_high: f64,
    /// Target stopband level in dB; the sign is ignored.
    pub stopband_attenuation_db: f64,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            method: DesignMethod::Window,
            filter_type: FilterType::LowPass,
            window_type: WindowType::Hamming,
            order: 21,
            sample_rate: 44100.0,
            cutoff_low: 1000.0,
            cutoff_high: 2000.0,
            stopband_attenuation_db: -100.0,
        }
    }
}

impl FilterSpec {
    /// Lowpass window-method spec
    pub fn lowpass(order: usize, sample_rate: f64, cutoff: f64, window_type: WindowType) -> Self {
        Self {
            order,
            sample_rate,
            cutoff_low: cutoff,
            window_type,
            ..Self::default()
        }
    }

    pub fn with_method(mut self, method: DesignMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_filter_type(mut self, filter_type: FilterType) -> Self {
        self.filter_type = filter_type;
        self
    }

    pub fn with_band(mut self, low_hz: f64, high_hz: f64) -> Self {
        self.cutoff_low = low_hz;
        self.cutoff_high = high_hz;
        self
    }

    pub fn with_attenuation(mut self, attenuation_db: f64) -> Self {
        self.stopband_attenuation_db = attenuation_db;
        self
    }

    pub fn nyquist(&self) -> f64 {
        self.sample_rate / 2.0
    }

    /// First cutoff as a fraction of the sample rate
    pub fn normalized_low(&self) -> f64 {
        self.cutoff_low / self.sample_rate
    }

    /// Second cutoff as a fraction of the sample rate
    pub fn normalized_high(&self) -> f64 {
        self.cutoff_high / self.sample_rate
    }

    /// Check every field the selected method reads
    ///
    /// # Errors
    /// Returns `FirError::InvalidFilterSpec` describing the first violation.
    pub fn validate(&self) -> Result<()> {
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(invalid(format!(
                "sample rate must be positive, got {}",
                self.sample_rate
            )));
        }
        if !self.stopband_attenuation_db.is_finite() {
            return Err(invalid("stopband attenuation must be finite".to_string()));
        }

        match self.method {
            DesignMethod::Custom => return Ok(()),
            DesignMethod::HalfBandEquiripple { transition_width } => {
                if self.filter_type != FilterType::LowPass {
                    return Err(invalid(format!(
                        "half-band design is lowpass only, got {:?}",
                        self.filter_type
                    )));
                }
                // Passband edge 0.25 - tw/2 must stay above DC
                return check_transition_width(transition_width, false);
            }
            DesignMethod::Window | DesignMethod::Transition { .. } | DesignMethod::LeastSquares { .. } => {
                if !(MIN_ORDER..=MAX_ORDER).contains(&self.order) {
                    return Err(invalid(format!(
                        "order must be in [{}, {}], got {}",
                        MIN_ORDER, MAX_ORDER, self.order
                    )));
                }
            }
            DesignMethod::Kaiser { .. } => {}
        }

        self.validate_cutoffs()?;

        match self.method {
            DesignMethod::Kaiser { transition_width } => check_transition_width(transition_width, true),
            DesignMethod::Transition {
                transition_width,
                spline,
            } => {
                check_transition_width(transition_width, true)?;
                if !spline.is_finite() || spline < 1.0 {
                    return Err(invalid(format!("spline must be >= 1, got {}", spline)));
                }
                Ok(())
            }
            DesignMethod::LeastSquares {
                transition_width,
                stopband_weight,
            } => {
                check_transition_width(transition_width, false)?;
                if !stopband_weight.is_finite() || stopband_weight <= 0.0 {
                    return Err(invalid(format!(
                        "stopband weight must be positive, got {}",
                        stopband_weight
                    )));
                }
                // Both band edges of every cutoff must fall strictly inside (0, 0.5)
                let half = transition_width / 2.0;
                let mut edges = vec![self.normalized_low()];
                if self.filter_type.is_band() {
                    edges.push(self.normalized_high());
                }
                for edge in edges {
                    if edge - half <= 0.0 || edge + half >= 0.5 {
                        return Err(invalid(format!(
                            "transition band {:.4}..{:.4} leaves (0, 0.5)",
                            edge - half,
                            edge + half
                        )));
                    }
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn validate_cutoffs(&self) -> Result<()> {
        let nyquist = self.nyquist();
        let in_range = |hz: f64| hz.is_finite() && hz > 0.0 && hz < nyquist;

        if !in_range(self.cutoff_low) {
            return Err(invalid(format!(
                "cutoff {} Hz outside (0, {}) Hz",
                self.cutoff_low, nyquist
            )));
        }
        if self.filter_type.is_band() {
            if !in_range(self.cutoff_high) {
                return Err(invalid(format!(
                    "upper cutoff {} Hz outside (0, {}) Hz",
                    self.cutoff_high, nyquist
                )));
            }
            if self.cutoff_high <= self.cutoff_low {
                return Err(invalid(format!(
                    "upper cutoff {} Hz must exceed lower cutoff {} Hz",
                    self.cutoff_high, self.cutoff_low
                )));
            }
        }
        Ok(())
    }
}

/// Transition width must lie in `(0, 0.5)`, or `(0, 0.5]` for the methods
/// whose band edges are not derived from it
fn check_transition_width(width: f64, allow_half: bool) -> Result<()> {
    let above_max = if allow_half { width > 0.5 } else { width >= 0.5 };
    if !width.is_finite() || width <= 0.0 || above_max {
        let upper = if allow_half { "0.5]" } else { "0.5)" };
        return Err(invalid(format!(
            "transition width must be in (0, {}, got {}",
            upper, width
        )));
    }
    Ok(())
}

fn invalid(msg: String) -> FirError {
    FirError::InvalidFilterSpec(msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_invalid(result: Result<()>) -> bool {
        matches!(result, Err(FirError::InvalidFilterSpec(_)))
    }

    #[test]
    fn test_default_spec_is_valid() {
        assert!(FilterSpec::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_sample_rate() {
        let mut spec = FilterSpec::default();
        spec.sample_rate = 0.0;
        assert!(is_invalid(spec.validate()));
        spec.sample_rate = f64::NAN;
        assert!(is_invalid(spec.validate()));
    }

    #[test]
    fn test_rejects_order_out_of_range() {
        let mut spec = FilterSpec::default();
        spec.order = 0;
        assert!(is_invalid(spec.validate()));
        spec.order = MAX_ORDER + 1;
        assert!(is_invalid(spec.validate()));
        spec.order = MAX_ORDER;
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_rejects_inverted_band() {
        let spec = FilterSpec::default()
            .with_filter_type(FilterType::BandPass)
            .with_band(1000.0, 500.0);
        assert!(is_invalid(spec.validate()));

        let spec = spec.with_filter_type(FilterType::BandStop);
        assert!(is_invalid(spec.validate()));
    }

    #[test]
    fn test_upper_cutoff_ignored_for_lowpass() {
        let spec = FilterSpec::default().with_band(1000.0, 500.0);
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_rejects_cutoff_above_nyquist() {
        let spec = FilterSpec::lowpass(21, 44100.0, 30000.0, WindowType::Hann);
        assert!(is_invalid(spec.validate()));
    }

    #[test]
    fn test_custom_skips_order_checks() {
        let mut spec = FilterSpec::default().with_method(DesignMethod::Custom);
        spec.order = 0;
        spec.cutoff_low = -1.0;
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_least_squares_band_edges() {
        let spec = FilterSpec::lowpass(31, 48000.0, 6000.0, WindowType::Hann).with_method(
            DesignMethod::LeastSquares {
                transition_width: 0.05,
                stopband_weight: 1.0,
            },
        );
        assert!(spec.validate().is_ok());

        // Default 0.5 transition width cannot fit around any cutoff
        let spec = spec.with_method(DesignMethod::LeastSquares {
            transition_width: 0.5,
            stopband_weight: 1.0,
        });
        assert!(is_invalid(spec.validate()));
    }

    #[test]
    fn test_half_band_is_lowpass_only() {
        let spec = FilterSpec::default()
            .with_method(DesignMethod::HalfBandEquiripple {
                transition_width: 0.1,
            })
            .with_filter_type(FilterType::HighPass);
        assert!(is_invalid(spec.validate()));
    }

    #[test]
    fn test_full_transition_width_bounds() {
        let kaiser = |tw| FilterSpec::default().with_method(DesignMethod::Kaiser { transition_width: tw });
        let transition = |tw| {
            FilterSpec::default().with_method(DesignMethod::Transition {
                transition_width: tw,
                spline: 1.0,
            })
        };
        let half_band = |tw| {
            FilterSpec::default().with_method(DesignMethod::HalfBandEquiripple { transition_width: tw })
        };

        // Upper end of the host range is usable where no band edge depends on it
        assert!(kaiser(0.5).validate().is_ok());
        assert!(transition(0.5).validate().is_ok());
        assert!(is_invalid(half_band(0.5).validate()));

        for spec in [kaiser(0.5001), transition(0.5001), kaiser(0.0), transition(-0.1)] {
            assert!(is_invalid(spec.validate()), "{:?}", spec.method);
        }
    }
}
